//! `${FIGART_HOME}/config.toml`: default font, theme, font directories, log filter and
//! render settings. Every key is optional.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::generator::RenderSettings;

/// Color theme of the interactive generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
    #[default]
    Dark,
    Light,
}

impl ThemeName {
    pub fn toggled(self) -> Self {
        match self {
            ThemeName::Dark => ThemeName::Light,
            ThemeName::Light => ThemeName::Dark,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ThemeName::Dark => "dark",
            ThemeName::Light => "light",
        }
    }
}

/// The commented template shipped in the binary (`cargo xtask update-default-config`
/// rewrites it).
const TEMPLATE: &str = include_str!("../default_config.toml");

/// Lays the values of `overrides` over the template. Template comments and keys the
/// overrides lack survive.
fn overlay_on_template(overrides: &str) -> Result<toml_edit::DocumentMut> {
    let mut doc: toml_edit::DocumentMut =
        TEMPLATE.parse().context("Failed to parse default config template")?;
    let overrides: toml_edit::DocumentMut = overrides.parse()?;
    overlay_table(doc.as_table_mut(), overrides.as_table());
    Ok(doc)
}

fn overlay_table(target: &mut toml_edit::Table, source: &toml_edit::Table) {
    use toml_edit::Item;

    for (key, item) in source {
        match item {
            Item::None => {}
            Item::Table(nested) => {
                if let Some(Item::Table(existing)) = target.get_mut(key) {
                    overlay_table(existing, nested);
                } else {
                    target[key] = item.clone();
                }
            }
            _ => target[key] = item.clone(),
        }
    }
}

pub mod paths {
    //! Everything figart writes lives under `$FIGART_HOME`, which defaults to
    //! `~/.config/figart`.

    use std::path::PathBuf;

    pub const HOME_ENV: &str = "FIGART_HOME";

    /// Returns the figart home directory.
    ///
    /// Without a resolvable home directory this is relative to the working directory.
    pub fn figart_home() -> PathBuf {
        if let Some(home) = std::env::var_os(HOME_ENV) {
            return PathBuf::from(home);
        }

        dirs::home_dir()
            .unwrap_or_default()
            .join(".config")
            .join("figart")
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        figart_home().join("config.toml")
    }

    pub fn logs_dir() -> PathBuf {
        figart_home().join("logs")
    }

    /// User font directory, searched after `font_dirs` and `$FIGLET_FONTDIR`.
    pub fn fonts_dir() -> PathBuf {
        figart_home().join("fonts")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Font selected at startup
    pub default_font: String,

    pub theme: ThemeName,

    /// Directories searched for `<name>.flf` ahead of the system ones
    pub font_dirs: Vec<PathBuf>,

    /// Log filter directive (tracing `EnvFilter` syntax)
    pub log_level: String,

    /// Layout and width settings applied to every render
    pub render: RenderSettings,
}

impl Config {
    const DEFAULT_FONT: &str = "blocky";
    const DEFAULT_LOG_LEVEL: &str = "info";

    /// `${FIGART_HOME}/config.toml`, or defaults when there is none.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config from {}", path.display()))
    }

    pub fn save_theme(theme: ThemeName) -> Result<()> {
        Self::save_theme_to(&paths::config_path(), theme)
    }

    /// Rewrites `path` with `theme` set. Other user values are kept and the file is
    /// brought up to date with the current template.
    pub fn save_theme_to(path: &Path, theme: ThemeName) -> Result<()> {
        let existing = if path.exists() {
            fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?
        } else {
            String::new()
        };
        let mut doc = overlay_on_template(&existing)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;
        doc["theme"] = toml_edit::value(theme.as_str());
        write_atomically(path, &doc.to_string())
    }

    /// Writes the template to `path`. Refuses to overwrite.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }
        write_atomically(path, TEMPLATE)
    }

    /// `Config::default()` as TOML, commented like the template.
    pub fn generate() -> Result<String> {
        let defaults = toml::to_string(&Config::default())
            .context("Failed to serialize default config to TOML")?;
        let doc = overlay_on_template(&defaults).context("Failed to parse generated config")?;
        Ok(doc.to_string())
    }
}

/// Temp file next to `path`, then rename, so readers never see half a config.
fn write_atomically(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    let staged = path.with_extension("toml.tmp");
    fs::write(&staged, content)
        .with_context(|| format!("Failed to write config to {}", staged.display()))?;
    fs::rename(&staged, path)
        .with_context(|| format!("Failed to move config into place at {}", path.display()))
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_font: Self::DEFAULT_FONT.to_string(),
            theme: ThemeName::default(),
            font_dirs: Vec::new(),
            log_level: Self::DEFAULT_LOG_LEVEL.to_string(),
            render: RenderSettings::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;
    use crate::generator::LayoutChoice;

    #[test]
    fn test_load_missing_file_returns_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("nonexistent.toml");

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.default_font, "blocky");
        assert_eq!(config.render.default_width, 80);
    }

    #[test]
    fn test_load_partial_config_merges_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");

        fs::write(
            &config_path,
            "default_font = \"term\"\n[render]\nhorizontal_layout = \"full-size\"\n",
        )
        .unwrap();

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config.default_font, "term");
        assert_eq!(config.render.horizontal_layout, LayoutChoice::FullSize);
        assert_eq!(config.render.vertical_layout, LayoutChoice::Default);
        assert!(config.render.whitespace_break);
        assert_eq!(config.theme, ThemeName::Dark);
    }

    #[test]
    fn test_load_invalid_config_reports_path() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");
        fs::write(&config_path, "theme = \"sepia\"\n").unwrap();

        let err = Config::load_from(&config_path).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to parse config from"));
    }

    #[test]
    fn test_default_template_parses_to_defaults() {
        let config: Config = toml::from_str(TEMPLATE).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_init_creates_config_with_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("subdir").join("config.toml");

        Config::init(&config_path).unwrap();

        assert!(config_path.exists());
        let contents = fs::read_to_string(&config_path).unwrap();
        assert!(contents.contains("default_font = \"blocky\""));
        assert!(contents.contains("# Color theme"));
    }

    #[test]
    fn test_init_fails_if_exists() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");

        fs::write(&config_path, "").unwrap();

        let err = Config::init(&config_path).unwrap_err();
        assert!(err.to_string().contains("Config file already exists"));
    }

    #[test]
    fn test_save_theme_creates_file_with_template() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("nested").join("config.toml");

        Config::save_theme_to(&config_path, ThemeName::Light).unwrap();

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config.theme, ThemeName::Light);
        let contents = fs::read_to_string(&config_path).unwrap();
        assert!(contents.contains("# figart Configuration"));
        assert!(!config_path.with_extension("toml.tmp").exists());
    }

    #[test]
    fn test_save_theme_preserves_other_fields() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");

        fs::write(
            &config_path,
            "default_font = \"term\"\n[render]\ndefault_width = 40\n",
        )
        .unwrap();

        Config::save_theme_to(&config_path, ThemeName::Light).unwrap();

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config.theme, ThemeName::Light);
        assert_eq!(config.default_font, "term");
        assert_eq!(config.render.default_width, 40);
        let contents = fs::read_to_string(&config_path).unwrap();
        assert!(contents.contains("# Layout modes"));
    }

    #[test]
    fn test_generate_matches_defaults() {
        let generated = Config::generate().unwrap();
        let config: Config = toml::from_str(&generated).unwrap();
        assert_eq!(config, Config::default());
        assert!(generated.contains("# Break long lines"));
    }

    #[test]
    fn test_theme_toggles() {
        assert_eq!(ThemeName::Dark.toggled(), ThemeName::Light);
        assert_eq!(ThemeName::Light.toggled().as_str(), "dark");
    }

    #[test]
    fn test_save_theme_keeps_unknown_tables() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");
        fs::write(&config_path, "[render]\nwhitespace_break = false\n").unwrap();

        Config::save_theme_to(&config_path, ThemeName::Dark).unwrap();
        Config::save_theme_to(&config_path, ThemeName::Light).unwrap();

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config.theme, ThemeName::Light);
        assert!(!config.render.whitespace_break);
    }
}
