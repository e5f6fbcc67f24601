// Provider System
//
// Two-tier architecture:
//
// Tier 1: kinoscope-addons (pure addon protocol HTTP client)
//   - AddonClient, wire types
//   - Independent library with no engine dependency
//
// Tier 2: kinoscope-core/provider (collaborator traits + adapters)
//   - ProviderDirectory / CatalogQueryService traits
//   - AddonDirectory adapter calling the addon client
//   - DirectoryClient bootstrap convenience wrapper
//
// Tier 3: kinoscope-core/service (discovery services on top of the traits)

pub mod addon;
pub mod directory;
pub mod error;
pub mod traits;

pub use addon::AddonDirectory;
pub use directory::DirectoryClient;
pub use error::ProviderError;
pub use traits::{CatalogQueryService, ProviderDirectory, QueryExtras};
