//! Interactive generator (the default command).

use anyhow::Result;
use figart_core::config::Config;
use figart_tui::Prefill;

pub async fn run(config: &Config, prefill: Prefill) -> Result<()> {
    figart_tui::run_generator(config, prefill).await
}
