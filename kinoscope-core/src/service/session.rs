//! Discovery session state
//!
//! The session is the only shared mutable state of the engine. It is
//! owned by the controller; presentation code reads snapshots and never
//! mutates it directly. All state transitions flow through the
//! controller's documented operations.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::models::{
    Catalog, FilterSet, MediaCategory, MetaPreview, PageCursor, PreviewItem,
};

/// Lifecycle phase of a discovery session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    Idle,
    CatalogsLoading,
    CatalogsReady,
    ItemsLoading,
    ItemsReady,
}

/// Result of absorbing one catalog page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageOutcome {
    /// Items appended after de-duplication, in received order
    pub accepted: Vec<PreviewItem>,
    /// Raw item count before de-duplication; what the cursor advanced by
    pub raw_count: usize,
    pub has_more: bool,
}

impl PageOutcome {
    /// The quiescent outcome: nothing requested, nothing changed.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            accepted: Vec::new(),
            raw_count: 0,
            has_more: false,
        }
    }
}

/// Mutable state of one discovery view activation.
///
/// Created when the view activates, discarded on teardown; nothing
/// persists across activations.
#[derive(Debug, Clone)]
pub struct DiscoverySession {
    pub category: MediaCategory,
    /// Catalogs listed for the current category
    pub catalogs: Vec<Catalog>,
    /// Selected catalog; `None` is a valid quiescent state
    pub catalog: Option<Catalog>,
    pub filters: FilterSet,
    pub cursor: PageCursor,
    /// Accumulated feed, unique by id, insertion order = first-seen order
    items: IndexMap<String, PreviewItem>,
    /// Guards against a second windowed query starting while one is
    /// outstanding
    pub loading: bool,
    /// Bumped on every reset edge; responses stamped with an older value
    /// are stale and must be discarded
    generation: u64,
    pub phase: SessionPhase,
    /// Message of the last recoverable failure, cleared on success
    pub last_error: Option<String>,
}

impl DiscoverySession {
    #[must_use]
    pub fn new(category: MediaCategory, page_size: u32) -> Self {
        Self {
            category,
            catalogs: Vec::new(),
            catalog: None,
            filters: FilterSet::default(),
            cursor: PageCursor::new(Some(page_size)),
            items: IndexMap::new(),
            loading: false,
            generation: 0,
            phase: SessionPhase::Idle,
            last_error: None,
        }
    }

    /// Accumulated items in first-seen order.
    #[must_use]
    pub fn items(&self) -> Vec<PreviewItem> {
        self.items.values().cloned().collect()
    }

    #[must_use]
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Mark a reset edge: any in-flight response becomes stale.
    pub fn bump_generation(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    /// Discard accumulated items and rewind the cursor.
    pub fn reset_items(&mut self) {
        self.items.clear();
        self.cursor.reset();
    }

    /// Switch category: discards catalogs, selection, filters and items.
    pub fn set_category(&mut self, category: MediaCategory) {
        self.category = category;
        self.catalogs.clear();
        self.catalog = None;
        self.filters.clear();
        self.reset_items();
        self.bump_generation();
    }

    /// Switch catalog: filters are catalog-scoped and must not leak, so
    /// they are cleared along with the accumulated items.
    pub fn set_catalog(&mut self, catalog: Option<Catalog>) {
        self.catalog = catalog;
        self.filters.clear();
        self.reset_items();
        self.bump_generation();
    }

    /// Absorb one raw page: normalize, de-duplicate against the
    /// accumulated set, append survivors in received order, and advance
    /// the cursor by the raw count.
    pub fn absorb_page(&mut self, raw: &[MetaPreview]) -> PageOutcome {
        let raw_count = raw.len();
        let mut accepted = Vec::new();
        for meta in raw {
            let item = PreviewItem::from_meta(meta);
            if self.items.contains_key(&item.id) {
                continue;
            }
            self.items.insert(item.id.clone(), item.clone());
            accepted.push(item);
        }
        self.cursor.advance(raw_count);
        PageOutcome {
            accepted,
            raw_count,
            has_more: self.cursor.has_more,
        }
    }
}
