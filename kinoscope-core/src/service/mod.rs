pub mod catalog_directory;
pub mod controller;
pub mod filter_resolver;
pub mod session;

pub use catalog_directory::{choose_catalog, CatalogDirectory};
pub use controller::{DiscoveryController, DiscoverySnapshot, Presentation};
pub use filter_resolver::resolve_filters;
pub use session::{DiscoverySession, PageOutcome, SessionPhase};
