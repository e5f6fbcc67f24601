//! Catalog directory
//!
//! Lists catalogs for a category across all enabled providers and applies
//! the selection policy for fresh listings.

use std::sync::Arc;

use crate::error::{Error, Result};
use crate::models::{Catalog, MediaCategory};
use crate::provider::CatalogQueryService;

/// Read-side directory over the catalog query service.
#[derive(Clone)]
pub struct CatalogDirectory {
    svc: Arc<dyn CatalogQueryService>,
}

impl CatalogDirectory {
    pub fn new(svc: Arc<dyn CatalogQueryService>) -> Self {
        Self { svc }
    }

    /// Merged catalog listing for `category`.
    ///
    /// An empty listing is a normal state ("no content sources"), not an
    /// error; transport failures map to the retriable `CatalogList` kind.
    pub async fn list(&self, category: &MediaCategory) -> Result<Vec<Catalog>> {
        self.svc
            .list_catalogs(category)
            .await
            .map_err(Error::CatalogList)
    }
}

/// Selection policy for a fresh listing: the first catalog wins unless the
/// caller names a preferred catalog, matched case-insensitively as a
/// substring of the catalog name.
#[must_use]
pub fn choose_catalog<'a>(catalogs: &'a [Catalog], preferred: Option<&str>) -> Option<&'a Catalog> {
    if let Some(wanted) = preferred {
        let wanted = wanted.to_lowercase();
        if let Some(found) = catalogs
            .iter()
            .find(|c| c.name.to_lowercase().contains(&wanted))
        {
            return Some(found);
        }
    }
    catalogs.first()
}
