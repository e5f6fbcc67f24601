//! Addon HTTP client
//!
//! Pure protocol client: fetches manifests from a locator URL and issues
//! windowed catalog queries. No discovery-engine dependency.

use std::sync::LazyLock;
use std::time::Duration;

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use reqwest::Client;

use crate::error::{check_response, json_with_limit, AddonError};
use crate::types::{CatalogResponse, Manifest, MetaPreviewWire};

/// Shared HTTP client for all addon requests (connection pooling).
/// Redirects are disabled to prevent SSRF via redirect to private IPs.
static SHARED_CLIENT: LazyLock<Client> = LazyLock::new(|| {
    Client::builder()
        .connect_timeout(Duration::from_secs(10))
        .timeout(Duration::from_secs(30))
        .pool_max_idle_per_host(10)
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("Failed to build addon shared HTTP client")
});

/// Characters escaped inside a path segment or extra-property value.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'+')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'=')
    .add(b'?');

const MANIFEST_SUFFIX: &str = "/manifest.json";

/// Derive the addon base URL from a manifest locator.
///
/// A locator must be an absolute http(s) URL ending in `/manifest.json`;
/// everything before that suffix is the base all other requests hang off.
pub fn base_url_from_locator(locator: &str) -> Result<String, AddonError> {
    let locator = locator.trim();
    let parsed = url::Url::parse(locator)
        .map_err(|e| AddonError::InvalidLocator(format!("{locator}: {e}")))?;
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(AddonError::InvalidLocator(format!(
            "unsupported scheme: {}",
            parsed.scheme()
        )));
    }
    let Some(base) = locator.strip_suffix(MANIFEST_SUFFIX) else {
        return Err(AddonError::InvalidLocator(format!(
            "{locator}: expected a URL ending in {MANIFEST_SUFFIX}"
        )));
    };
    Ok(base.to_string())
}

/// Build the request path for a catalog query, relative to the addon base.
///
/// Without extras: `catalog/{category}/{id}.json`.
/// With extras: `catalog/{category}/{id}/{name=value&...}.json`, values
/// percent-encoded, pair order preserved as given by the caller.
pub fn catalog_path(category: &str, catalog_id: &str, extras: &[(String, String)]) -> String {
    let category = utf8_percent_encode(category, SEGMENT);
    let id = utf8_percent_encode(catalog_id, SEGMENT);
    if extras.is_empty() {
        return format!("catalog/{category}/{id}.json");
    }
    let props = extras
        .iter()
        .map(|(k, v)| {
            format!(
                "{}={}",
                utf8_percent_encode(k, SEGMENT),
                utf8_percent_encode(v, SEGMENT)
            )
        })
        .collect::<Vec<_>>()
        .join("&");
    format!("catalog/{category}/{id}/{props}.json")
}

/// Addon protocol client (reuses the shared connection pool).
#[derive(Clone)]
pub struct AddonClient {
    client: Client,
}

impl AddonClient {
    pub fn new() -> Self {
        Self {
            client: SHARED_CLIENT.clone(),
        }
    }

    /// Fetch and validate the manifest at `locator`.
    pub async fn fetch_manifest(&self, locator: &str) -> Result<Manifest, AddonError> {
        // Locator is validated up front so a bad URL fails before any I/O.
        let _ = base_url_from_locator(locator)?;

        tracing::debug!(locator, "Fetching addon manifest");
        let response = self.client.get(locator.trim()).send().await?;
        let response = check_response(response)?;
        let manifest: Manifest = json_with_limit(response).await?;
        manifest.validate().map_err(AddonError::InvalidManifest)?;
        Ok(manifest)
    }

    /// Issue a windowed catalog query against an addon.
    pub async fn fetch_catalog(
        &self,
        base_url: &str,
        category: &str,
        catalog_id: &str,
        extras: &[(String, String)],
    ) -> Result<Vec<MetaPreviewWire>, AddonError> {
        let path = catalog_path(category, catalog_id, extras);
        let url = format!("{}/{}", base_url.trim_end_matches('/'), path);

        tracing::debug!(url, "Fetching catalog page");
        let response = self.client.get(&url).send().await?;
        let response = check_response(response)?;
        let body: CatalogResponse = json_with_limit(response).await?;
        Ok(body.metas)
    }
}

impl Default for AddonClient {
    fn default() -> Self {
        Self::new()
    }
}
