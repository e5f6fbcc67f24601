//! One-shot autostart flow
//!
//! On a fresh install the provider directory is empty and the discovery
//! view would sit on "no sources" forever. The autostart flow installs a
//! configured default provider when the directory is empty, waits for it
//! to settle, and kicks off the first category selection.

use std::time::Duration;

use tracing::{info, warn};

use crate::config::BootstrapConfig;
use crate::error::Result;
use crate::models::MediaCategory;
use crate::provider::DirectoryClient;
use crate::service::DiscoveryController;

/// Run the autostart flow once per controller lifetime.
///
/// `category` overrides the controller's configured default when given.
/// The controller's start guard makes repeated calls no-ops, so wiring
/// this into more than one startup path is harmless. A failed default
/// install is logged and swallowed: the view degrades to "no sources"
/// instead of refusing to start.
pub async fn run_autostart(
    config: &BootstrapConfig,
    directory: &DirectoryClient,
    controller: &DiscoveryController,
    category: Option<MediaCategory>,
) -> Result<()> {
    if !config.autostart {
        return Ok(());
    }
    if !controller.mark_started() {
        return Ok(());
    }

    let installed = match directory
        .install_default_if_empty(&config.default_addon_url)
        .await
    {
        Ok(installed) => installed,
        Err(e) => {
            warn!(error = %e, "Default provider install failed, continuing without it");
            false
        }
    };

    // A just-installed provider gets a longer settle window before the
    // first listing
    let delay = if installed {
        config.install_settle_delay_ms
    } else {
        config.settle_delay_ms
    };
    if delay > 0 {
        tokio::time::sleep(Duration::from_millis(delay)).await;
    }

    let category = match category {
        Some(category) => category,
        None => controller.snapshot().await.category,
    };
    info!(%category, installed, "Autostart selecting initial category");
    controller.select_category(category).await
}
