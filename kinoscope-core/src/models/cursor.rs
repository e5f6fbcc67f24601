//! Pagination cursor for windowed catalog queries
//!
//! The offset only ever advances, and it advances by the number of raw
//! items the last query returned, not by the number accepted after
//! de-duplication. Repeated loads therefore never re-request a window
//! that was already seen.

use serde::{Deserialize, Serialize};

/// Default window size for catalog page queries
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// Maximum allowed window size
pub const MAX_PAGE_SIZE: u32 = 100;

/// Pagination cursor: `(offset, page_size)` plus the derived `has_more`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageCursor {
    /// Number of raw positions already requested
    pub offset: u64,
    /// Window size for the next query
    pub page_size: u32,
    /// Whether the most recent page filled the window; the sole gate for
    /// exposing "load more"
    pub has_more: bool,
}

impl PageCursor {
    /// Create a cursor at offset 0, clamping the page size to a sane range.
    #[must_use]
    pub fn new(page_size: Option<u32>) -> Self {
        Self {
            offset: 0,
            page_size: page_size.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE),
            has_more: false,
        }
    }

    /// The skip value for the next windowed query.
    #[must_use]
    pub const fn skip(&self) -> u64 {
        self.offset
    }

    /// The limit value for the next windowed query.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.page_size
    }

    /// Advance past a completed page: offset grows by the raw count and
    /// `has_more` is derived from whether the page filled the window.
    pub fn advance(&mut self, raw_count: usize) {
        self.offset += raw_count as u64;
        self.has_more = raw_count >= self.page_size as usize;
    }

    /// Rewind to the start, keeping the page size.
    pub fn reset(&mut self) {
        self.offset = 0;
        self.has_more = false;
    }
}

impl Default for PageCursor {
    fn default() -> Self {
        Self::new(None)
    }
}
