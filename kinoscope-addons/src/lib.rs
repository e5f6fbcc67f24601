// Kinoscope Addon Protocol Client
//
// Pure HTTP client for the addon catalog protocol: manifest discovery and
// windowed catalog queries. This crate has no dependency on the discovery
// engine; it only knows how to talk to an addon over HTTP and how to
// deserialize its wire shapes.
//
// Architecture:
// - kinoscope-addons: protocol client + wire types (this crate)
// - kinoscope-core/provider: ProviderDirectory / CatalogQueryService
//   adapters calling this client
// - kinoscope-core/service: discovery session services on top of the traits

pub mod client;
pub mod error;
pub mod types;

pub use client::AddonClient;
pub use error::AddonError;
pub use types::{CatalogResponse, ExtraProp, Manifest, ManifestCatalog, MetaPreviewWire};
