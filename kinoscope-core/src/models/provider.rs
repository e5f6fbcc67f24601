//! Installed content providers

use serde::{Deserialize, Serialize};

use super::catalog::ExtraCapability;
use super::category::MediaCategory;

/// An installed content provider (plugin).
///
/// Owned by the provider directory; the discovery engine only reads it.
/// Enable/disable toggles do not destroy the provider, uninstall does.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentProvider {
    /// Globally unique provider id
    pub id: String,
    /// Display name attached to catalogs in merged listings
    pub name: String,
    pub version: String,
    pub enabled: bool,
    pub manifest: CapabilityManifest,
}

impl ContentProvider {
    /// Whether any of this provider's catalogs serve `category`.
    #[must_use]
    pub fn supports(&self, category: &MediaCategory) -> bool {
        self.manifest.categories.contains(category)
            || self
                .manifest
                .catalogs
                .iter()
                .any(|c| &c.category == category)
    }
}

/// What a provider can do: which categories it serves and which catalogs
/// it exposes per category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CapabilityManifest {
    pub categories: Vec<MediaCategory>,
    pub catalogs: Vec<CatalogDef>,
}

/// Catalog definition inside a provider's capability manifest.
/// Not yet merged with provider identity; see `models::Catalog` for the
/// listing-ready shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogDef {
    pub id: String,
    pub name: String,
    pub category: MediaCategory,
    pub genres: Vec<String>,
    pub extras: Vec<ExtraCapability>,
}
