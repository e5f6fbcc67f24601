// Collaborator Traits
//
// The discovery engine consumes two external interfaces: a provider
// directory (what is installed) and a catalog query service (what a
// catalog contains). Everything above these traits is engine-owned;
// everything below is replaceable.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::ProviderError;
use crate::models::{Catalog, ContentProvider, MediaCategory, MetaPreview};

/// Window plus filter slots for one catalog page query.
///
/// Each filter kind occupies its own slot; a later-applied filter can
/// never overwrite an earlier one mapped to the same parameter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryExtras {
    pub skip: u64,
    pub limit: u32,
    /// Active filter slots in stable order (genre, search, year)
    pub filters: Vec<(String, String)>,
}

impl QueryExtras {
    /// Flatten into wire pairs, window first, order stable.
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("skip".to_string(), self.skip.to_string()),
            ("limit".to_string(), self.limit.to_string()),
        ];
        pairs.extend(self.filters.iter().cloned());
        pairs
    }
}

/// Enumerates installed content providers and installs new ones.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProviderDirectory: Send + Sync {
    /// All installed providers, in stable enumeration order.
    async fn list(&self) -> Result<Vec<ContentProvider>, ProviderError>;

    /// Install the provider at `locator`; returns its id.
    async fn install(&self, locator: &str) -> Result<String, ProviderError>;

    /// Remove an installed provider entirely.
    async fn uninstall(&self, id: &str) -> Result<(), ProviderError>;

    /// Toggle a provider without destroying it.
    async fn set_enabled(&self, id: &str, enabled: bool) -> Result<(), ProviderError>;
}

/// Answers catalog listings and windowed preview queries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogQueryService: Send + Sync {
    /// Catalogs of all enabled providers serving `category`, merged, with
    /// owning provider display names attached. Ties keep provider
    /// enumeration order.
    async fn list_catalogs(
        &self,
        category: &MediaCategory,
    ) -> Result<Vec<Catalog>, ProviderError>;

    /// Up to `extras.limit` raw preview records for `catalog` starting at
    /// `extras.skip`.
    async fn query(
        &self,
        catalog: &Catalog,
        extras: &QueryExtras,
    ) -> Result<Vec<MetaPreview>, ProviderError>;
}
