//! Preview records: raw provider payloads and their normalized form
//!
//! `MetaPreview` is what a catalog query yields: heterogeneous, with most
//! fields optional and free-form. `PreviewItem` is the uniform record the
//! feed accumulates. Normalization is a pure function and never panics on
//! partial data.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::category::MediaCategory;

/// Raw preview record as received from a provider. Tolerant by design.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetaPreview {
    pub id: String,
    /// Provider-native category tag, free-form
    pub category_tag: String,
    pub name: String,
    pub poster: Option<String>,
    pub background: Option<String>,
    /// Free-form release text, e.g. "2019", "2019-2021", "2019-"
    pub release_info: Option<String>,
    pub rating: Option<f32>,
    pub genres: Vec<String>,
}

/// Normalized, display-ready preview item.
///
/// Never mutated after creation; the session only looks items up by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviewItem {
    /// Provider-scoped id; unique within one session's accumulated set
    pub id: String,
    pub title: String,
    pub category: MediaCategory,
    /// Parsed out of the release text; absent when unparseable
    pub year: Option<u16>,
    pub poster: Option<String>,
    pub backdrop: Option<String>,
    pub rating: Option<f32>,
    pub genres: Vec<String>,
}

impl PreviewItem {
    /// Normalize a raw provider record. Pure and panic-free: missing or
    /// malformed optional fields degrade to `None`, never to an error.
    pub fn from_meta(meta: &MetaPreview) -> Self {
        Self {
            id: meta.id.clone(),
            title: meta.name.clone(),
            category: MediaCategory::from_tag(&meta.category_tag),
            year: meta.release_info.as_deref().and_then(parse_year),
            poster: meta.poster.clone(),
            backdrop: meta.background.clone(),
            rating: meta.rating,
            genres: meta.genres.clone(),
        }
    }
}

static YEAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d{4})\b").expect("year regex is valid"));

/// Extract a plausible four-digit year from free-form release text.
/// Ranges like "2019-2021" yield the first year.
pub fn parse_year(text: &str) -> Option<u16> {
    let captures = YEAR_RE.captures(text)?;
    let year: u16 = captures.get(1)?.as_str().parse().ok()?;
    if (1880..=2100).contains(&year) {
        Some(year)
    } else {
        None
    }
}
