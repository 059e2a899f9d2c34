//! Full-screen banner generator for figart.

pub mod common;
pub mod effects;
pub mod events;
pub mod features;
pub mod mutations;
pub mod overlays;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod theme;
pub mod update;

use std::io::{IsTerminal, stderr, stdout};
use std::sync::Arc;

use anyhow::Result;
use figart_core::config::Config;
use figart_core::fonts::FontStore;
pub use runtime::TuiRuntime;
pub use state::Prefill;

/// Runs the interactive generator until the user quits.
///
/// # Errors
/// Fails without a terminal, or when the terminal cannot be set up.
pub async fn run_generator(config: &Config, prefill: Prefill) -> Result<()> {
    if !stdout().is_terminal() || !stderr().is_terminal() {
        anyhow::bail!(
            "The interactive generator requires a terminal.\n\
             Use `figart render <TEXT>` for non-interactive output."
        );
    }

    let store = Arc::new(FontStore::from_config(config));
    tracing::info!(
        font = %config.default_font,
        dirs = store.search_dirs().len(),
        "starting generator"
    );

    let mut runtime = TuiRuntime::new(config, &prefill, store)?;
    runtime.run()
}
