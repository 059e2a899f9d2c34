use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};

const CONFIG_TEMPLATE: &str = "crates/figart-core/default_config.toml";

#[derive(Debug, Parser)]
#[command(name = "xtask", about = "figart maintainer tasks")]
struct Cli {
    #[command(subcommand)]
    task: Option<Task>,
}

#[derive(Debug, Default, Subcommand)]
enum Task {
    /// Regenerate the embedded config template from `Config::default()`.
    #[default]
    UpdateDefaultConfig,
}

fn main() -> Result<()> {
    let root = workspace_root()?;
    match Cli::parse().task.unwrap_or_default() {
        Task::UpdateDefaultConfig => regenerate_config_template(&root),
    }
}

fn regenerate_config_template(root: &Path) -> Result<()> {
    // An empty home keeps a broken user config from failing the run.
    let home = tempfile::tempdir().context("create temp FIGART_HOME")?;
    let generated = Command::new("cargo")
        .current_dir(root)
        .env("FIGART_HOME", home.path())
        .args(["run", "--quiet", "-p", "figart", "--", "config", "generate"])
        .output()
        .context("spawn `figart config generate`")?;

    if !generated.status.success() {
        bail!(
            "`figart config generate` exited with {}:\n{}",
            generated.status,
            String::from_utf8_lossy(&generated.stderr)
        );
    }

    let template = root.join(CONFIG_TEMPLATE);
    fs::write(&template, &generated.stdout)
        .with_context(|| format!("write {}", template.display()))?;
    println!("Regenerated {CONFIG_TEMPLATE}");
    Ok(())
}

/// This crate lives at `<root>/crates/xtask`.
fn workspace_root() -> Result<PathBuf> {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .ancestors()
        .nth(2)
        .map(Path::to_path_buf)
        .context("workspace root above CARGO_MANIFEST_DIR")
}
