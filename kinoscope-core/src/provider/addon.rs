//! Addon-backed collaborator implementation
//!
//! Adapts the `kinoscope-addons` protocol client to the engine's
//! `ProviderDirectory` and `CatalogQueryService` traits. Installed addons
//! live in memory, in install order; that order is what makes merged
//! catalog listings stable.

use async_trait::async_trait;
use kinoscope_addons::{client::base_url_from_locator, AddonClient, Manifest, MetaPreviewWire};
use tokio::sync::RwLock;

use super::traits::{CatalogQueryService, ProviderDirectory, QueryExtras};
use super::ProviderError;
use crate::models::{
    CapabilityManifest, Catalog, CatalogDef, ContentProvider, ExtraCapability, MediaCategory,
    MetaPreview,
};

struct InstalledAddon {
    provider: ContentProvider,
    base_url: String,
}

/// In-memory directory of installed addons, doubling as the catalog query
/// service that routes windowed queries to the owning addon.
pub struct AddonDirectory {
    client: AddonClient,
    addons: RwLock<Vec<InstalledAddon>>,
}

impl AddonDirectory {
    pub fn new(client: AddonClient) -> Self {
        Self {
            client,
            addons: RwLock::new(Vec::new()),
        }
    }

    /// Register an already-fetched manifest, e.g. a bundled addon.
    /// Duplicate ids are rejected rather than doubled.
    pub async fn register_manifest(
        &self,
        manifest: &Manifest,
        base_url: String,
    ) -> Result<String, ProviderError> {
        let provider = provider_from_manifest(manifest);
        let mut addons = self.addons.write().await;
        if addons.iter().any(|a| a.provider.id == provider.id) {
            return Err(ProviderError::AlreadyInstalled(provider.id));
        }
        let id = provider.id.clone();
        tracing::info!(provider = %id, %base_url, "Installed content provider");
        addons.push(InstalledAddon { provider, base_url });
        Ok(id)
    }
}

#[async_trait]
impl ProviderDirectory for AddonDirectory {
    async fn list(&self) -> Result<Vec<ContentProvider>, ProviderError> {
        Ok(self
            .addons
            .read()
            .await
            .iter()
            .map(|a| a.provider.clone())
            .collect())
    }

    async fn install(&self, locator: &str) -> Result<String, ProviderError> {
        let base_url = base_url_from_locator(locator)?;
        let manifest = self.client.fetch_manifest(locator).await?;
        self.register_manifest(&manifest, base_url).await
    }

    async fn uninstall(&self, id: &str) -> Result<(), ProviderError> {
        let mut addons = self.addons.write().await;
        let before = addons.len();
        addons.retain(|a| a.provider.id != id);
        if addons.len() == before {
            return Err(ProviderError::ProviderNotFound(id.to_string()));
        }
        tracing::info!(provider = %id, "Uninstalled content provider");
        Ok(())
    }

    async fn set_enabled(&self, id: &str, enabled: bool) -> Result<(), ProviderError> {
        let mut addons = self.addons.write().await;
        let addon = addons
            .iter_mut()
            .find(|a| a.provider.id == id)
            .ok_or_else(|| ProviderError::ProviderNotFound(id.to_string()))?;
        addon.provider.enabled = enabled;
        Ok(())
    }
}

#[async_trait]
impl CatalogQueryService for AddonDirectory {
    async fn list_catalogs(
        &self,
        category: &MediaCategory,
    ) -> Result<Vec<Catalog>, ProviderError> {
        let addons = self.addons.read().await;
        let mut catalogs = Vec::new();
        for addon in addons.iter() {
            if !addon.provider.enabled {
                continue;
            }
            for def in &addon.provider.manifest.catalogs {
                if &def.category == category {
                    catalogs.push(Catalog {
                        id: def.id.clone(),
                        name: def.name.clone(),
                        provider_id: addon.provider.id.clone(),
                        provider_name: addon.provider.name.clone(),
                        category: def.category.clone(),
                        genres: def.genres.clone(),
                        extras: def.extras.clone(),
                    });
                }
            }
        }
        Ok(catalogs)
    }

    async fn query(
        &self,
        catalog: &Catalog,
        extras: &QueryExtras,
    ) -> Result<Vec<MetaPreview>, ProviderError> {
        let base_url = {
            let addons = self.addons.read().await;
            let addon = addons
                .iter()
                .find(|a| a.provider.id == catalog.provider_id && a.provider.enabled)
                .ok_or_else(|| ProviderError::ProviderNotFound(catalog.provider_id.clone()))?;
            addon.base_url.clone()
        };

        let metas = self
            .client
            .fetch_catalog(
                &base_url,
                catalog.category.as_tag(),
                &catalog.id,
                &extras.to_pairs(),
            )
            .await?;
        Ok(metas.iter().map(meta_from_wire).collect())
    }
}

/// Build a capability manifest from an addon manifest.
fn provider_from_manifest(manifest: &Manifest) -> ContentProvider {
    let catalogs = manifest
        .catalogs
        .iter()
        .map(|c| {
            // Genre labels come from either the flat `genres` list or the
            // options of a declared `genre` extra; merge both.
            let mut genres = c.genres.clone().unwrap_or_default();
            if let Some(extra) = &c.extra {
                for prop in extra {
                    if prop.name == "genre" {
                        for option in prop.options.iter().flatten() {
                            if !genres.contains(option) {
                                genres.push(option.clone());
                            }
                        }
                    }
                }
            }
            CatalogDef {
                id: c.id.clone(),
                name: c.name.clone().unwrap_or_else(|| c.id.clone()),
                category: MediaCategory::from_tag(&c.category),
                genres,
                extras: c
                    .extra_names()
                    .into_iter()
                    .map(ExtraCapability::from_name)
                    .collect(),
            }
        })
        .collect();

    ContentProvider {
        id: manifest.id.clone(),
        name: manifest.name.clone(),
        version: manifest.version.clone(),
        enabled: true,
        manifest: CapabilityManifest {
            categories: manifest.types.iter().map(|t| MediaCategory::from_tag(t)).collect(),
            catalogs,
        },
    }
}

fn meta_from_wire(wire: &MetaPreviewWire) -> MetaPreview {
    MetaPreview {
        id: wire.id.clone(),
        category_tag: wire.category.clone(),
        name: wire.name.clone(),
        poster: wire.poster.clone(),
        background: wire.background.clone(),
        release_info: wire.release_info.clone(),
        rating: wire.imdb_rating,
        genres: wire.genres.clone().unwrap_or_default(),
    }
}
