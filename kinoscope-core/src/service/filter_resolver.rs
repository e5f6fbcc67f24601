//! Filter capability resolver
//!
//! Derives which filter controls are meaningful for a catalog from its
//! advertised capabilities. Pure; the controller feeds in the year range.

use crate::models::{Catalog, FilterUiSpec};

/// Resolve the filter UI spec for `catalog`.
///
/// - genre is shown iff the catalog advertises a non-empty genre list;
///   options are that list preceded by the implicit "all" (empty string)
/// - search is shown iff the catalog advertises search capability
/// - year is shown whenever any other filter is shown, spanning
///   `current_year` down to `year_floor`
/// - when nothing applies the whole panel is hidden
pub fn resolve_filters(catalog: &Catalog, year_floor: u16, current_year: u16) -> FilterUiSpec {
    let genre_options = if catalog.genres.is_empty() {
        None
    } else {
        let mut options = Vec::with_capacity(catalog.genres.len() + 1);
        options.push(String::new());
        options.extend(catalog.genres.iter().cloned());
        Some(options)
    };
    let search = catalog.supports_search();
    let visible = genre_options.is_some() || search;

    let year_options = if visible {
        Some(
            (year_floor..=current_year)
                .rev()
                .map(|y| y.to_string())
                .collect(),
        )
    } else {
        None
    };

    FilterUiSpec {
        visible,
        genre_options,
        search,
        year_options,
    }
}
