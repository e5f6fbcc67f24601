//! Discovery session controller
//!
//! The single mutation entry point for the discovery session. Category
//! change, catalog change, filter change, refresh and load-more all route
//! through here; presentation code only reads snapshots.
//!
//! State machine:
//! `Idle → CatalogsLoading → CatalogsReady → ItemsLoading → ItemsReady`,
//! with a self-loop `ItemsReady → ItemsLoading` on load-more / filter
//! apply / refresh, a reset edge `* → CatalogsLoading` on category
//! change, and `CatalogsReady/ItemsReady → ItemsLoading` on catalog
//! change.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::Datelike;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::config::DiscoveryConfig;
use crate::error::{Error, Result};
use crate::models::{
    Catalog, FilterSet, FilterUiSpec, MediaCategory, PreviewItem,
};
use crate::provider::{CatalogQueryService, QueryExtras};

use super::catalog_directory::{choose_catalog, CatalogDirectory};
use super::filter_resolver::resolve_filters;
use super::session::{DiscoverySession, PageOutcome, SessionPhase};

/// What the view should show right now. The three empty-ish cases are
/// deliberately distinct and must never collapse into one generic banner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Presentation {
    /// A listing or page query is in flight
    Loading,
    /// Zero enabled providers serve this category; a normal state
    NoSources,
    /// A recoverable failure; the user can retry
    Failed(String),
    /// Catalogs (and possibly items) are available
    Content,
}

/// Read-only view of the session for the presentation layer.
#[derive(Debug, Clone)]
pub struct DiscoverySnapshot {
    pub category: MediaCategory,
    pub catalogs: Vec<Catalog>,
    pub catalog: Option<Catalog>,
    pub filters: FilterSet,
    pub filter_spec: Option<FilterUiSpec>,
    pub items: Vec<PreviewItem>,
    pub loading: bool,
    pub has_more: bool,
    pub phase: SessionPhase,
    pub presentation: Presentation,
}

/// Owns the discovery session and drives all its transitions.
pub struct DiscoveryController {
    svc: Arc<dyn CatalogQueryService>,
    catalogs: CatalogDirectory,
    session: RwLock<DiscoverySession>,
    config: DiscoveryConfig,
    started: AtomicBool,
}

impl DiscoveryController {
    pub fn new(svc: Arc<dyn CatalogQueryService>, config: DiscoveryConfig) -> Self {
        let category = MediaCategory::from_tag(&config.default_category);
        Self {
            catalogs: CatalogDirectory::new(svc.clone()),
            svc,
            session: RwLock::new(DiscoverySession::new(category, config.page_size)),
            config,
            started: AtomicBool::new(false),
        }
    }

    /// One-shot guard for the autostart flow. Returns true exactly once.
    pub fn mark_started(&self) -> bool {
        !self.started.swap(true, Ordering::SeqCst)
    }

    pub async fn snapshot(&self) -> DiscoverySnapshot {
        let s = self.session.read().await;
        let current_year = chrono::Utc::now().year().clamp(0, i32::from(u16::MAX)) as u16;
        let filter_spec = s
            .catalog
            .as_ref()
            .map(|c| resolve_filters(c, self.config.year_floor, current_year));
        DiscoverySnapshot {
            category: s.category.clone(),
            catalogs: s.catalogs.clone(),
            catalog: s.catalog.clone(),
            filters: s.filters.clone(),
            filter_spec,
            items: s.items(),
            loading: s.loading,
            has_more: s.cursor.has_more,
            phase: s.phase,
            presentation: presentation_of(&s),
        }
    }

    /// Switch media category: re-lists catalogs, auto-selects per policy,
    /// and loads the first page of the selected catalog.
    pub async fn select_category(&self, category: MediaCategory) -> Result<()> {
        let generation = {
            let mut s = self.session.write().await;
            s.set_category(category.clone());
            s.phase = SessionPhase::CatalogsLoading;
            s.last_error = None;
            s.generation()
        };

        let listed = self.catalogs.list(&category).await;

        {
            let mut s = self.session.write().await;
            if s.generation() != generation {
                tracing::debug!(%category, "Discarding stale catalog listing");
                return Ok(());
            }
            match listed {
                Ok(catalogs) => {
                    tracing::info!(%category, count = catalogs.len(), "Catalogs listed");
                    s.catalogs = catalogs;
                    s.phase = SessionPhase::CatalogsReady;
                }
                Err(e) => {
                    tracing::warn!(%category, error = %e, "Catalog listing failed");
                    s.phase = SessionPhase::CatalogsReady;
                    s.last_error = Some(e.to_string());
                    return Err(e);
                }
            }

            let chosen =
                choose_catalog(&s.catalogs, self.config.preferred_catalog.as_deref()).cloned();
            match chosen {
                Some(catalog) => s.set_catalog(Some(catalog)),
                // Empty listing: quiescent "no sources" state
                None => return Ok(()),
            }
        }

        self.load_page(true).await.map(|_| ())
    }

    /// Select a catalog from the current listing by its session key.
    pub async fn select_catalog(&self, key: &str) -> Result<()> {
        {
            let mut s = self.session.write().await;
            let found = s.catalogs.iter().find(|c| c.key() == key).cloned();
            let Some(catalog) = found else {
                return Err(Error::UnknownCatalog(key.to_string()));
            };
            s.set_catalog(Some(catalog));
            s.last_error = None;
        }
        self.load_page(true).await.map(|_| ())
    }

    /// Replace the filter set and reload from offset 0.
    ///
    /// Values are validated against the selected catalog's capabilities
    /// before anything is touched; an invalid set leaves the session
    /// unchanged.
    pub async fn apply_filters(&self, filters: FilterSet) -> Result<()> {
        {
            let mut s = self.session.write().await;
            let Some(catalog) = s.catalog.clone() else {
                return Err(Error::UnknownCatalog("no catalog selected".to_string()));
            };
            filters
                .validate_for(&catalog)
                .map_err(Error::InvalidFilter)?;
            s.filters = filters;
            s.reset_items();
            s.bump_generation();
            s.last_error = None;
        }
        self.load_page(true).await.map(|_| ())
    }

    /// Reload the selected catalog from offset 0.
    pub async fn refresh(&self) -> Result<PageOutcome> {
        self.load_page(true).await
    }

    /// Load the next window. `has_more` from the previous page is the
    /// caller's gate; calling past the end just yields a short page.
    pub async fn load_more(&self) -> Result<PageOutcome> {
        self.load_page(false).await
    }

    /// Core pagination step: window build, query, absorb.
    ///
    /// Reentrancy-safe: a call arriving while a query is outstanding is a
    /// silent no-op, neither queued nor an error. Responses are stamped
    /// with the session generation at issue time; a response arriving
    /// after a reset edge is discarded.
    async fn load_page(&self, reset: bool) -> Result<PageOutcome> {
        let (generation, catalog, extras) = {
            let mut s = self.session.write().await;
            if s.loading {
                tracing::debug!("Page load already in flight, ignoring trigger");
                return Ok(PageOutcome::empty());
            }
            if reset {
                s.reset_items();
            }
            // No catalog selected is a valid quiescent state, not a failure
            let Some(catalog) = s.catalog.clone() else {
                return Ok(PageOutcome::empty());
            };
            s.loading = true;
            s.phase = SessionPhase::ItemsLoading;
            let extras = QueryExtras {
                skip: s.cursor.skip(),
                limit: s.cursor.limit(),
                filters: s.filters.to_slots(&catalog),
            };
            (s.generation(), catalog, extras)
        };

        let result = self.svc.query(&catalog, &extras).await;

        let mut s = self.session.write().await;
        s.loading = false;
        if s.generation() != generation {
            tracing::debug!(catalog = %catalog.key(), "Discarding stale page response");
            // The discard must also leave a settled phase: nothing is in
            // flight anymore, so reporting a loading state would be a lie
            s.phase = if s.item_count() == 0 {
                SessionPhase::CatalogsReady
            } else {
                SessionPhase::ItemsReady
            };
            return Ok(PageOutcome::empty());
        }
        match result {
            Ok(raw) => {
                let outcome = s.absorb_page(&raw);
                s.phase = SessionPhase::ItemsReady;
                s.last_error = None;
                tracing::debug!(
                    catalog = %catalog.key(),
                    raw = outcome.raw_count,
                    accepted = outcome.accepted.len(),
                    offset = s.cursor.offset,
                    has_more = outcome.has_more,
                    "Absorbed catalog page"
                );
                Ok(outcome)
            }
            Err(e) => {
                // Accumulated items are left untouched; the failure is
                // retriable from exactly where we stopped.
                let err = Error::PageQuery(e);
                tracing::warn!(catalog = %catalog.key(), error = %err, "Page query failed");
                s.phase = SessionPhase::ItemsReady;
                s.last_error = Some(err.to_string());
                Err(err)
            }
        }
    }
}

fn presentation_of(s: &DiscoverySession) -> Presentation {
    if s.loading
        || matches!(
            s.phase,
            SessionPhase::Idle | SessionPhase::CatalogsLoading | SessionPhase::ItemsLoading
        )
    {
        return Presentation::Loading;
    }
    if let Some(msg) = &s.last_error {
        return Presentation::Failed(msg.clone());
    }
    if s.catalogs.is_empty() {
        return Presentation::NoSources;
    }
    Presentation::Content
}
