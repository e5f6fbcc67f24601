//! Provider directory client
//!
//! Thin wrapper over a `ProviderDirectory` adding the bootstrap-facing
//! convenience contract: list, and install a default provider only when
//! nothing is installed yet.

use std::sync::Arc;

use crate::error::{Error, Result};
use crate::models::ContentProvider;

use super::traits::ProviderDirectory;

#[derive(Clone)]
pub struct DirectoryClient {
    inner: Arc<dyn ProviderDirectory>,
}

impl DirectoryClient {
    pub fn new(inner: Arc<dyn ProviderDirectory>) -> Self {
        Self { inner }
    }

    pub async fn list_providers(&self) -> Result<Vec<ContentProvider>> {
        self.inner.list().await.map_err(Error::ProviderList)
    }

    /// Install the provider at `locator` iff the directory is empty.
    ///
    /// Returns whether an install was performed. The list-first check is
    /// what makes calling this twice in one process lifetime safe: the
    /// second call sees a non-empty directory and does nothing.
    pub async fn install_default_if_empty(&self, locator: &str) -> Result<bool> {
        let existing = self.inner.list().await.map_err(Error::ProviderList)?;
        if !existing.is_empty() {
            tracing::debug!(
                installed = existing.len(),
                "Providers already present, skipping default install"
            );
            return Ok(false);
        }

        tracing::info!(locator, "No providers installed, installing default");
        self.inner.install(locator).await.map_err(Error::Install)?;
        Ok(true)
    }
}
