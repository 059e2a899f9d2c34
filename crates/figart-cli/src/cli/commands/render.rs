//! `figart render`: one banner to stdout.

use anyhow::{Result, bail};
use figart_core::config::Config;
use figart_core::escape::json_escape;
use figart_core::fonts::FontStore;
use figart_core::generator::{self, FALLBACK_MESSAGE, LayoutChoice, RenderRequest};

pub struct RenderOptions {
    pub text: String,
    pub font: Option<String>,
    pub width: Option<String>,
    pub escaped: bool,
    pub horizontal_layout: Option<LayoutChoice>,
    pub vertical_layout: Option<LayoutChoice>,
    pub no_whitespace_break: bool,
}

pub fn run(config: &Config, options: RenderOptions) -> Result<()> {
    let mut settings = config.render.clone();
    if let Some(layout) = options.horizontal_layout {
        settings.horizontal_layout = layout;
    }
    if let Some(layout) = options.vertical_layout {
        settings.vertical_layout = layout;
    }
    if options.no_whitespace_break {
        settings.whitespace_break = false;
    }

    let request = RenderRequest {
        text: options.text,
        font: options.font.unwrap_or_else(|| config.default_font.clone()),
        width: options.width.unwrap_or_default(),
    };

    let store = FontStore::from_config(config);
    match generator::render(&store, &request, &settings) {
        Ok(banner) if options.escaped => println!("{}", json_escape(&banner)),
        Ok(banner) => println!("{banner}"),
        Err(err) => {
            tracing::warn!(font = %request.font, error = %err, "render failed");
            bail!(FALLBACK_MESSAGE);
        }
    }
    Ok(())
}
