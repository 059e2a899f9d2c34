//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use figart_core::generator::LayoutChoice;
use figart_core::{config, logging};
use figart_tui::Prefill;

mod commands;

#[derive(Parser)]
#[command(name = "figart")]
#[command(version)]
#[command(about = "Turn text into FIGlet banners")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Prefill the text field
    #[arg(long)]
    text: Option<String>,

    /// Prefill the font (a catalog name)
    #[arg(long)]
    font: Option<String>,

    /// Prefill the width field
    #[arg(long)]
    width: Option<String>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Render a banner to stdout
    Render {
        /// Text to render; each newline starts a new row of characters
        #[arg(value_name = "TEXT")]
        text: String,

        /// Font name (defaults to `default_font` from config)
        #[arg(short, long)]
        font: Option<String>,

        /// Maximum output width in columns
        #[arg(short, long)]
        width: Option<String>,

        /// Print the banner JSON-escaped, without surrounding quotes
        #[arg(long)]
        escaped: bool,

        /// Horizontal layout: default, full-size, fitting or smushing
        #[arg(long, value_name = "LAYOUT")]
        horizontal_layout: Option<LayoutChoice>,

        /// Vertical layout: default, full-size, fitting or smushing
        #[arg(long, value_name = "LAYOUT")]
        vertical_layout: Option<LayoutChoice>,

        /// Break long lines anywhere instead of at whitespace
        #[arg(long)]
        no_whitespace_break: bool,
    },

    /// List the fonts offered by the generator
    Fonts {
        /// Mark fonts that cannot be found
        #[arg(long)]
        available: bool,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
    /// Generate a fresh config from Rust defaults (for xtask)
    Generate,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;
    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    let config = config::Config::load().context("load config")?;

    let _log_guard = match logging::init(&config::paths::logs_dir(), &config.log_level) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Warning: file logging disabled: {e:#}");
            None
        }
    };

    let Cli {
        command,
        text,
        font,
        width,
    } = cli;

    // default to the interactive generator
    let Some(command) = command else {
        let prefill = Prefill { text, font, width };
        return commands::generate::run(&config, prefill).await;
    };

    match command {
        Commands::Render {
            text,
            font,
            width,
            escaped,
            horizontal_layout,
            vertical_layout,
            no_whitespace_break,
        } => commands::render::run(&config, commands::render::RenderOptions {
            text,
            font,
            width,
            escaped,
            horizontal_layout,
            vertical_layout,
            no_whitespace_break,
        }),

        Commands::Fonts { available } => {
            commands::fonts::list(&config, available);
            Ok(())
        }

        Commands::Config { command } => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
            ConfigCommands::Generate => commands::config::generate(),
        },
    }
}
