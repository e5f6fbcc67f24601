//! Catalogs and their advertised query capabilities

use serde::{Deserialize, Serialize};

use super::category::MediaCategory;

/// An extra query capability a catalog advertises.
///
/// `Skip` (offset paging) is assumed universally supported; it is still
/// modeled so manifests that declare it round-trip cleanly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ExtraCapability {
    Skip,
    Genre,
    Search,
    Other(String),
}

impl ExtraCapability {
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "skip" => Self::Skip,
            "genre" => Self::Genre,
            "search" => Self::Search,
            _ => Self::Other(name.trim().to_string()),
        }
    }

    #[must_use]
    pub fn as_name(&self) -> &str {
        match self {
            Self::Skip => "skip",
            Self::Genre => "genre",
            Self::Search => "search",
            Self::Other(name) => name,
        }
    }
}

impl From<String> for ExtraCapability {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl From<ExtraCapability> for String {
    fn from(cap: ExtraCapability) -> Self {
        cap.as_name().to_string()
    }
}

/// A content feed within one provider for one media category.
///
/// Immutable for the lifetime of a discovery session; listings are
/// re-derived whenever the category changes or a provider is added or
/// removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    /// Opaque id, scoped to the owning provider
    pub id: String,
    pub name: String,
    /// Id of the owning provider, used to route page queries
    pub provider_id: String,
    /// Display name of the owning provider, shown alongside the catalog
    pub provider_name: String,
    pub category: MediaCategory,
    /// Advertised genre labels; empty means the genre filter is hidden
    pub genres: Vec<String>,
    pub extras: Vec<ExtraCapability>,
}

impl Catalog {
    /// Session-wide key for this catalog. Catalog ids are only unique
    /// within their provider, so the key includes the provider id.
    #[must_use]
    pub fn key(&self) -> String {
        format!("{}/{}", self.provider_id, self.id)
    }

    #[must_use]
    pub fn supports_search(&self) -> bool {
        self.extras.contains(&ExtraCapability::Search)
    }

    #[must_use]
    pub fn has_genre(&self, genre: &str) -> bool {
        self.genres.iter().any(|g| g == genre)
    }
}
