//! Media categories
//!
//! Providers tag their content with free-form category strings. The engine
//! normalizes them into a tagged variant with an explicit fallback so the
//! rest of the code can match exhaustively instead of sniffing strings.

use serde::{Deserialize, Serialize};

/// Media category of a catalog or preview item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MediaCategory {
    Movie,
    Series,
    Channel,
    Tv,
    /// Anything a provider invents beyond the well-known tags.
    /// Carries the original tag so queries can round-trip it.
    Other(String),
}

impl MediaCategory {
    /// Normalize a provider-native category tag.
    ///
    /// Unknown tags fall back to `Other` with the original (trimmed) tag;
    /// a blank tag falls back to `Other("other")`.
    pub fn from_tag(tag: &str) -> Self {
        let trimmed = tag.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "movie" => Self::Movie,
            "series" => Self::Series,
            "channel" => Self::Channel,
            "tv" => Self::Tv,
            "" => Self::Other("other".to_string()),
            _ => Self::Other(trimmed.to_string()),
        }
    }

    /// The wire tag used in provider queries.
    #[must_use]
    pub fn as_tag(&self) -> &str {
        match self {
            Self::Movie => "movie",
            Self::Series => "series",
            Self::Channel => "channel",
            Self::Tv => "tv",
            Self::Other(tag) => tag,
        }
    }
}

impl std::fmt::Display for MediaCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_tag())
    }
}

impl From<String> for MediaCategory {
    fn from(tag: String) -> Self {
        Self::from_tag(&tag)
    }
}

impl From<MediaCategory> for String {
    fn from(category: MediaCategory) -> Self {
        category.as_tag().to_string()
    }
}
