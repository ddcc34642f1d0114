//! Full-screen terminal browser and editor for vcmd.

pub mod common;
pub mod effects;
pub mod error;
pub mod events;
pub mod features;
pub mod intents;
pub mod keymap;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;
pub mod views;

use std::io::{IsTerminal, stdout};

use anyhow::Result;
pub use error::FatalError;
pub use runtime::TuiRuntime;
pub use state::{AppState, Settings};
use vcmd_core::SecretStore;

/// Runs the interactive browser over `mounts` until the user quits.
///
/// With `start_mount` the session opens directly on that mount's keys.
///
/// # Errors
/// Returns an error when stdout is not a terminal, the terminal cannot be set
/// up, or the session hits a [`FatalError`].
pub fn run_browser(
    store: Box<dyn SecretStore>,
    mounts: &[String],
    settings: Settings,
    start_mount: Option<&str>,
) -> Result<()> {
    if !stdout().is_terminal() {
        anyhow::bail!("vcmd requires a terminal.");
    }

    tracing::info!(mounts = mounts.len(), "starting browser");
    let mut runtime = TuiRuntime::new(store, mounts, settings)?;
    runtime.start(start_mount)?;
    let result = runtime.run();
    drop(runtime);

    match &result {
        Ok(()) => tracing::info!("browser closed"),
        Err(err) => tracing::error!(error = %format!("{err:#}"), "browser aborted"),
    }
    result
}
