//! Interactive browser startup.

use anyhow::{Context, Result};
use vcmd_core::config::Config;
use vcmd_core::store::{VaultClient, VaultStore};
use vcmd_core::{logging, mounts, token};
use vcmd_tui::Settings;

/// Loads configuration and credentials, lists the eligible mounts and hands
/// over to the TUI.
///
/// Every failure before the first frame is fatal.
pub fn run(mount: Option<&str>) -> Result<()> {
    let config = Config::load()?;
    let _log_guard = logging::init(&config.log_path())?;

    let token = token::read_token(&config.token_path())?;
    let client = VaultClient::new(&config.vault_addr, token, config.request_timeout())
        .with_context(|| format!("Failed to create Vault client for {}", config.vault_addr))?;
    let store = VaultStore::new(client)?;

    let mounts = mounts::eligible_mounts(&store, &config.allowed_mount_types)
        .with_context(|| format!("Failed to list mounts on {}", config.vault_addr))?;
    tracing::info!(addr = %config.vault_addr, count = mounts.len(), "loaded mounts");

    let settings = Settings {
        editor_command: config.editor.resolve_command(),
        fail_on_unmodified: config.editor.fail_on_unmodified,
    };
    vcmd_tui::run_browser(Box::new(store), &mounts, settings, mount)
}
