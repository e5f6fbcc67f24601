//! Catalog-scoped filters and their UI capability spec

use serde::{Deserialize, Serialize};

use super::catalog::Catalog;

/// Recognized filter kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterKind {
    Genre,
    Search,
    Year,
}

/// At most one active value per filter kind.
///
/// Filters are catalog-scoped: switching catalog or category clears them.
/// Each kind maps to its own query-parameter slot; two kinds never share
/// one underlying parameter, so applying a second filter cannot silently
/// overwrite the first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSet {
    pub genre: Option<String>,
    pub search: Option<String>,
    pub year: Option<String>,
}

impl FilterSet {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.genre.is_none() && self.search.is_none() && self.year.is_none()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Set one filter kind; an empty string clears that kind ("all").
    pub fn set(&mut self, kind: FilterKind, value: Option<String>) {
        let value = value.filter(|v| !v.is_empty());
        match kind {
            FilterKind::Genre => self.genre = value,
            FilterKind::Search => self.search = value,
            FilterKind::Year => self.year = value,
        }
    }

    /// Validate against the advertised capabilities of `catalog`.
    ///
    /// Returns the offending description on the first violation: a genre
    /// the catalog does not advertise, a search on a catalog without
    /// search capability, or a year that is not four digits.
    pub fn validate_for(&self, catalog: &Catalog) -> Result<(), String> {
        if let Some(genre) = &self.genre {
            if !catalog.has_genre(genre) {
                return Err(format!(
                    "genre {genre:?} is not advertised by catalog {:?}",
                    catalog.name
                ));
            }
        }
        if self.search.is_some() && !catalog.supports_search() {
            return Err(format!(
                "catalog {:?} does not support free-text search",
                catalog.name
            ));
        }
        if let Some(year) = &self.year {
            if year.len() != 4 || !year.chars().all(|c| c.is_ascii_digit()) {
                return Err(format!("year must be a four-digit string, got {year:?}"));
            }
        }
        Ok(())
    }

    /// Emit the active, catalog-applicable filters as distinct query
    /// parameter slots, in stable order. Values the catalog cannot honor
    /// are dropped rather than sent.
    #[must_use]
    pub fn to_slots(&self, catalog: &Catalog) -> Vec<(String, String)> {
        let mut slots = Vec::new();
        if let Some(genre) = &self.genre {
            if catalog.has_genre(genre) {
                slots.push(("genre".to_string(), genre.clone()));
            }
        }
        if let Some(search) = &self.search {
            if catalog.supports_search() {
                slots.push(("search".to_string(), search.clone()));
            }
        }
        if let Some(year) = &self.year {
            slots.push(("year".to_string(), year.clone()));
        }
        slots
    }
}

/// Which filter controls are meaningful for a catalog, and the option
/// lists to render. When `visible` is false the filter panel is hidden
/// entirely rather than shown with zero controls.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterUiSpec {
    pub visible: bool,
    /// Genre options including the implicit "all" (empty string) entry;
    /// `None` hides the genre control
    pub genre_options: Option<Vec<String>>,
    pub search: bool,
    /// Year options, newest first; `None` hides the year control
    pub year_options: Option<Vec<String>>,
}
