//! Integration tests for the discovery engine
//!
//! These drive the controller through a scripted catalog service to
//! verify end-to-end pagination, reentrancy, and bootstrap behavior.
//!
//! Run with: cargo test --test integration_tests

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, Notify};

use kinoscope_core::bootstrap::run_autostart;
use kinoscope_core::config::{BootstrapConfig, DiscoveryConfig};
use kinoscope_core::models::{
    CapabilityManifest, Catalog, ContentProvider, ExtraCapability, MediaCategory, MetaPreview,
};
use kinoscope_core::provider::{
    CatalogQueryService, DirectoryClient, ProviderDirectory, ProviderError, QueryExtras,
};
use kinoscope_core::service::{DiscoveryController, Presentation, SessionPhase};

fn catalog(id: &str, name: &str) -> Catalog {
    Catalog {
        id: id.to_string(),
        name: name.to_string(),
        provider_id: "org.example".to_string(),
        provider_name: "Example".to_string(),
        category: MediaCategory::Movie,
        genres: vec!["Action".to_string(), "Drama".to_string()],
        extras: vec![ExtraCapability::Skip, ExtraCapability::Search],
    }
}

fn meta(id: &str) -> MetaPreview {
    MetaPreview {
        id: id.to_string(),
        category_tag: "movie".to_string(),
        name: format!("Item {id}"),
        ..Default::default()
    }
}

fn metas(range: std::ops::Range<u32>) -> Vec<MetaPreview> {
    range.map(|i| meta(&format!("i{i}"))).collect()
}

fn discovery_config(page_size: u32) -> DiscoveryConfig {
    DiscoveryConfig {
        page_size,
        default_category: "movie".to_string(),
        year_floor: 1990,
        preferred_catalog: None,
    }
}

/// Catalog service that replays a scripted sequence of page results and
/// records every query it receives. An optional gate blocks queries so
/// tests can observe in-flight behavior.
struct ScriptedService {
    catalogs: Vec<Catalog>,
    pages: Mutex<VecDeque<Result<Vec<MetaPreview>, ProviderError>>>,
    queries: Mutex<Vec<QueryExtras>>,
    gate: Option<GateHandle>,
}

/// Blocks queries while armed so a test can act mid-flight.
#[derive(Clone)]
struct GateHandle {
    armed: Arc<std::sync::atomic::AtomicBool>,
    entered: Arc<Notify>,
    release: Arc<Notify>,
}

impl GateHandle {
    fn arm(&self) {
        self.armed.store(true, Ordering::SeqCst);
    }

    fn disarm(&self) {
        self.armed.store(false, Ordering::SeqCst);
    }
}

impl ScriptedService {
    fn new(catalogs: Vec<Catalog>) -> Self {
        Self {
            catalogs,
            pages: Mutex::new(VecDeque::new()),
            queries: Mutex::new(Vec::new()),
            gate: None,
        }
    }

    fn gated(mut self) -> (Self, GateHandle) {
        let gate = GateHandle {
            armed: Arc::new(std::sync::atomic::AtomicBool::new(true)),
            entered: Arc::new(Notify::new()),
            release: Arc::new(Notify::new()),
        };
        self.gate = Some(gate.clone());
        (self, gate)
    }

    async fn push_page(&self, page: Vec<MetaPreview>) {
        self.pages.lock().await.push_back(Ok(page));
    }

    async fn push_failure(&self, message: &str) {
        self.pages
            .lock()
            .await
            .push_back(Err(ProviderError::Network(message.to_string())));
    }

    async fn recorded_queries(&self) -> Vec<QueryExtras> {
        self.queries.lock().await.clone()
    }
}

#[async_trait]
impl CatalogQueryService for ScriptedService {
    async fn list_catalogs(
        &self,
        category: &MediaCategory,
    ) -> Result<Vec<Catalog>, ProviderError> {
        Ok(self
            .catalogs
            .iter()
            .filter(|c| c.category == *category)
            .cloned()
            .collect())
    }

    async fn query(
        &self,
        _catalog: &Catalog,
        extras: &QueryExtras,
    ) -> Result<Vec<MetaPreview>, ProviderError> {
        self.queries.lock().await.push(extras.clone());
        if let Some(gate) = &self.gate {
            if gate.armed.load(Ordering::SeqCst) {
                gate.entered.notify_one();
                gate.release.notified().await;
            }
        }
        self.pages
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}

/// In-memory provider directory counting installs.
#[derive(Default)]
struct CountingDirectory {
    providers: Mutex<Vec<ContentProvider>>,
    installs: AtomicUsize,
}

#[async_trait]
impl ProviderDirectory for CountingDirectory {
    async fn list(&self) -> Result<Vec<ContentProvider>, ProviderError> {
        Ok(self.providers.lock().await.clone())
    }

    async fn install(&self, locator: &str) -> Result<String, ProviderError> {
        self.installs.fetch_add(1, Ordering::SeqCst);
        let id = format!("org.installed.{}", self.installs.load(Ordering::SeqCst));
        self.providers.lock().await.push(ContentProvider {
            id: id.clone(),
            name: locator.to_string(),
            version: "1.0.0".to_string(),
            enabled: true,
            manifest: CapabilityManifest::default(),
        });
        Ok(id)
    }

    async fn uninstall(&self, id: &str) -> Result<(), ProviderError> {
        self.providers.lock().await.retain(|p| p.id != id);
        Ok(())
    }

    async fn set_enabled(&self, id: &str, enabled: bool) -> Result<(), ProviderError> {
        let mut providers = self.providers.lock().await;
        match providers.iter_mut().find(|p| p.id == id) {
            Some(p) => {
                p.enabled = enabled;
                Ok(())
            }
            None => Err(ProviderError::ProviderNotFound(id.to_string())),
        }
    }
}

#[tokio::test]
async fn test_pagination_scenario_end_to_end() {
    let svc = ScriptedService::new(vec![catalog("top", "Top")]);
    // Page 1: 20 raw, all new
    svc.push_page(metas(0..20)).await;
    // Page 2: 20 raw, 5 duplicates of page 1
    let mut page2 = metas(20..35);
    page2.extend(metas(0..5));
    svc.push_page(page2).await;
    // Page 3: short page ends the feed
    svc.push_page(vec![meta("x"), meta("y"), meta("z")]).await;

    let svc = Arc::new(svc);
    let controller = DiscoveryController::new(svc.clone(), discovery_config(20));

    controller
        .select_category(MediaCategory::Movie)
        .await
        .unwrap();
    let snap = controller.snapshot().await;
    assert_eq!(snap.items.len(), 20);
    assert!(snap.has_more);

    let outcome = controller.load_more().await.unwrap();
    assert_eq!(outcome.accepted.len(), 15);
    assert_eq!(controller.snapshot().await.items.len(), 35);

    let outcome = controller.load_more().await.unwrap();
    assert_eq!(outcome.accepted.len(), 3);
    assert!(!outcome.has_more);
    assert_eq!(controller.snapshot().await.items.len(), 38);

    // The window always advances by raw count, duplicates included
    let queries = svc.recorded_queries().await;
    let skips: Vec<u64> = queries.iter().map(|q| q.skip).collect();
    assert_eq!(skips, vec![0, 20, 40]);
    assert!(queries.iter().all(|q| q.limit == 20));
}

#[tokio::test]
async fn test_concurrent_load_is_a_silent_no_op() {
    let (svc, gate) = ScriptedService::new(vec![catalog("top", "Top")]).gated();
    svc.push_page(metas(0..20)).await;
    let svc = Arc::new(svc);
    let controller = Arc::new(DiscoveryController::new(svc.clone(), discovery_config(20)));

    let background = {
        let controller = controller.clone();
        tokio::spawn(async move { controller.refresh().await })
    };
    gate.entered.notified().await;

    // Second trigger while the first query is outstanding: no error, no
    // second query
    let outcome = controller.load_more().await.unwrap();
    assert_eq!(outcome.raw_count, 0);

    gate.release.notify_one();
    let outcome = background.await.unwrap().unwrap();
    assert_eq!(outcome.raw_count, 20);
    assert_eq!(svc.recorded_queries().await.len(), 1);
}

#[tokio::test]
async fn test_stale_response_is_discarded_after_reset() {
    let (svc, gate) =
        ScriptedService::new(vec![catalog("top", "Top"), catalog("new", "New")]).gated();
    svc.push_page(metas(0..20)).await;
    svc.push_page(metas(20..40)).await;
    let svc = Arc::new(svc);
    let controller = Arc::new(DiscoveryController::new(svc.clone(), discovery_config(20)));

    // Initial load runs ungated
    gate.disarm();
    controller
        .select_category(MediaCategory::Movie)
        .await
        .unwrap();
    assert_eq!(controller.snapshot().await.items.len(), 20);
    gate.arm();

    let background = {
        let controller = controller.clone();
        tokio::spawn(async move { controller.refresh().await })
    };
    gate.entered.notified().await;

    // Reset edge while the page query is in flight
    controller
        .select_catalog("org.example/new")
        .await
        .unwrap();

    gate.release.notify_one();
    let outcome = background.await.unwrap().unwrap();
    assert_eq!(outcome.raw_count, 0);

    let snap = controller.snapshot().await;
    assert_eq!(snap.catalog.unwrap().id, "new");
    assert!(snap.items.is_empty());
    assert!(!snap.loading);
    // The discard settles the phase; nothing is in flight, so the view
    // must not be stuck on a loading state
    assert_eq!(snap.phase, SessionPhase::CatalogsReady);
    assert_eq!(snap.presentation, Presentation::Content);

    // The session is not wedged: a refresh loads the new catalog
    gate.disarm();
    svc.push_page(metas(100..105)).await;
    controller.refresh().await.unwrap();
    assert_eq!(controller.snapshot().await.items.len(), 5);
}

#[tokio::test]
async fn test_page_failure_keeps_accumulated_feed() {
    let svc = ScriptedService::new(vec![catalog("top", "Top")]);
    svc.push_page(metas(0..20)).await;
    svc.push_failure("upstream timeout").await;
    let svc = Arc::new(svc);
    let controller = DiscoveryController::new(svc, discovery_config(20));

    controller
        .select_category(MediaCategory::Movie)
        .await
        .unwrap();
    assert!(controller.load_more().await.is_err());

    let snap = controller.snapshot().await;
    assert_eq!(snap.items.len(), 20);
    assert!(matches!(snap.presentation, Presentation::Failed(_)));

    // Retry resumes from the same offset
    let outcome = controller.load_more().await.unwrap();
    assert_eq!(outcome.raw_count, 0);
}

#[tokio::test(start_paused = true)]
async fn test_autostart_installs_default_once_and_loads_feed() {
    let directory_impl = Arc::new(CountingDirectory::default());
    let directory = DirectoryClient::new(directory_impl.clone());

    let svc = ScriptedService::new(vec![catalog("top", "Top")]);
    svc.push_page(metas(0..10)).await;
    let svc = Arc::new(svc);
    let controller = DiscoveryController::new(svc, discovery_config(20));

    let bootstrap = BootstrapConfig {
        autostart: true,
        default_addon_url: "https://addon.example/manifest.json".to_string(),
        settle_delay_ms: 300,
        install_settle_delay_ms: 1500,
    };

    run_autostart(&bootstrap, &directory, &controller, None)
        .await
        .unwrap();
    assert_eq!(directory_impl.installs.load(Ordering::SeqCst), 1);
    assert_eq!(controller.snapshot().await.items.len(), 10);

    // Second run: start guard plus list-first install check both hold
    run_autostart(&bootstrap, &directory, &controller, None)
        .await
        .unwrap();
    assert_eq!(directory_impl.installs.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn test_autostart_disabled_does_nothing() {
    let directory_impl = Arc::new(CountingDirectory::default());
    let directory = DirectoryClient::new(directory_impl.clone());
    let svc = Arc::new(ScriptedService::new(vec![catalog("top", "Top")]));
    let controller = DiscoveryController::new(svc, discovery_config(20));

    let bootstrap = BootstrapConfig {
        autostart: false,
        ..Default::default()
    };
    run_autostart(&bootstrap, &directory, &controller, None)
        .await
        .unwrap();
    assert_eq!(directory_impl.installs.load(Ordering::SeqCst), 0);
    assert!(controller.snapshot().await.items.is_empty());
}

#[tokio::test]
async fn test_filters_reset_feed_and_are_catalog_scoped() {
    use kinoscope_core::models::{FilterKind, FilterSet};

    let svc = ScriptedService::new(vec![catalog("top", "Top"), catalog("new", "New")]);
    svc.push_page(metas(0..20)).await;
    svc.push_page(metas(50..55)).await;
    svc.push_page(metas(60..62)).await;
    let svc = Arc::new(svc);
    let controller = DiscoveryController::new(svc.clone(), discovery_config(20));

    controller
        .select_category(MediaCategory::Movie)
        .await
        .unwrap();

    let mut filters = FilterSet::default();
    filters.set(FilterKind::Genre, Some("Drama".to_string()));
    filters.set(FilterKind::Search, Some("heat".to_string()));
    controller.apply_filters(filters).await.unwrap();

    let snap = controller.snapshot().await;
    assert_eq!(snap.items.len(), 5);

    // Filtered query carries distinct slots and restarts the window
    let queries = svc.recorded_queries().await;
    let filtered = &queries[1];
    assert_eq!(filtered.skip, 0);
    assert_eq!(
        filtered.filters,
        vec![
            ("genre".to_string(), "Drama".to_string()),
            ("search".to_string(), "heat".to_string()),
        ]
    );

    // Switching catalogs drops the filters entirely
    controller
        .select_catalog("org.example/new")
        .await
        .unwrap();
    let snap = controller.snapshot().await;
    assert!(snap.filters.is_empty());
    assert_eq!(snap.items.len(), 2);
    assert!(svc.recorded_queries().await[2].filters.is_empty());
}
