//! Addon protocol wire types
//!
//! Shapes are deserialized tolerantly: addons in the wild omit optional
//! fields, use camelCase aliases, and serve ratings as either numbers or
//! numeric strings. Unknown fields are ignored everywhere.

use serde::{Deserialize, Serialize};

/// Addon manifest, served at `{base}/manifest.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    /// Globally unique addon id (reverse-domain by convention)
    pub id: String,
    /// Human-readable addon name
    pub name: String,
    /// Addon version string
    pub version: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Media categories this addon serves (e.g., "movie", "series")
    #[serde(default)]
    pub types: Vec<String>,
    /// Catalog definitions, one per feed
    #[serde(default)]
    pub catalogs: Vec<ManifestCatalog>,
}

impl Manifest {
    /// Validate the fields the discovery engine depends on.
    pub fn validate(&self) -> Result<(), String> {
        if self.id.trim().is_empty() {
            return Err("manifest id is empty".to_string());
        }
        if self.name.trim().is_empty() {
            return Err("manifest name is empty".to_string());
        }
        if self.version.trim().is_empty() {
            return Err("manifest version is empty".to_string());
        }
        Ok(())
    }
}

/// One catalog entry in a manifest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestCatalog {
    /// Media category this catalog belongs to
    #[serde(rename = "type")]
    pub category: String,
    /// Catalog id, opaque and scoped to the owning addon
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    /// Genre labels advertised by the catalog
    #[serde(default)]
    pub genres: Option<Vec<String>>,
    /// Newer-style extra declarations with per-property metadata
    #[serde(default)]
    pub extra: Option<Vec<ExtraProp>>,
    /// Older-style flat list of supported extra names
    #[serde(default, alias = "extraSupported")]
    pub extra_supported: Option<Vec<String>>,
}

impl ManifestCatalog {
    /// Names of all extras the catalog declares, across both manifest styles.
    pub fn extra_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        if let Some(extra) = &self.extra {
            names.extend(extra.iter().map(|e| e.name.as_str()));
        }
        if let Some(flat) = &self.extra_supported {
            for name in flat {
                if !names.contains(&name.as_str()) {
                    names.push(name);
                }
            }
        }
        names
    }
}

/// Declaration of a single supported extra query property.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtraProp {
    pub name: String,
    #[serde(default, alias = "isRequired")]
    pub is_required: bool,
    #[serde(default)]
    pub options: Option<Vec<String>>,
}

/// Raw preview record in a catalog response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetaPreviewWire {
    pub id: String,
    /// Media category tag; free-form on the wire
    #[serde(rename = "type", default)]
    pub category: String,
    #[serde(alias = "title")]
    pub name: String,
    #[serde(default)]
    pub poster: Option<String>,
    #[serde(default)]
    pub background: Option<String>,
    /// Free-form release text, e.g. "2019", "2019-2021", "2019-"
    #[serde(default, alias = "releaseInfo")]
    pub release_info: Option<String>,
    #[serde(default, alias = "imdbRating", deserialize_with = "de_rating")]
    pub imdb_rating: Option<f32>,
    #[serde(default)]
    pub genres: Option<Vec<String>>,
}

/// Catalog query response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogResponse {
    #[serde(default)]
    pub metas: Vec<MetaPreviewWire>,
}

/// Accept a rating as a JSON number, a numeric string, or null.
/// Anything unparseable becomes `None` rather than a deserialization error.
fn de_rating<'de, D>(deserializer: D) -> Result<Option<f32>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(f32),
        Text(String),
        Other(serde_json::Value),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Num(n)) => Some(n),
        Some(Raw::Text(s)) => s.trim().parse::<f32>().ok(),
        _ => None,
    })
}
