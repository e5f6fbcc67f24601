pub mod catalog;
pub mod category;
pub mod cursor;
pub mod filters;
pub mod item;
pub mod provider;

pub use catalog::{Catalog, ExtraCapability};
pub use category::MediaCategory;
pub use cursor::{PageCursor, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
pub use filters::{FilterKind, FilterSet, FilterUiSpec};
pub use item::{parse_year, MetaPreview, PreviewItem};
pub use provider::{CapabilityManifest, CatalogDef, ContentProvider};
