//! Resolving font names to parsed fonts.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use figart_font::{BuiltinFont, Font, FontError};
use thiserror::Error;

use crate::config::{Config, paths};

/// Environment variable naming an extra FIGlet font directory.
pub const FONTDIR_ENV: &str = "FIGLET_FONTDIR";

/// Where FIGlet packages usually install their fonts.
pub const SYSTEM_FONT_DIRS: [&str; 4] = [
    "/usr/share/figlet",
    "/usr/local/share/figlet",
    "/usr/share/figlet/fonts",
    "/opt/homebrew/share/figlet/fonts",
];

const FONT_EXTENSION: &str = "flf";

#[derive(Debug, Error)]
pub enum FontLookupError {
    #[error("invalid font name {0:?}")]
    InvalidName(String),
    #[error("font {0:?} not found")]
    NotFound(String),
    #[error("failed to read font file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse font {name:?}")]
    Parse {
        name: String,
        #[source]
        source: FontError,
    },
}

/// Search order: configured directories, `$FIGLET_FONTDIR`, the user font directory, then the
/// system directories.
pub fn search_dirs(
    configured: &[PathBuf],
    fontdir_env: Option<PathBuf>,
    user_fonts: PathBuf,
) -> Vec<PathBuf> {
    configured
        .iter()
        .cloned()
        .chain(fontdir_env)
        .chain(Some(user_fonts))
        .chain(SYSTEM_FONT_DIRS.iter().map(PathBuf::from))
        .collect()
}

fn validate_name(name: &str) -> Result<(), FontLookupError> {
    let invalid = name.is_empty()
        || name.contains(['/', '\\', '\0'])
        || name.contains("..");
    if invalid {
        return Err(FontLookupError::InvalidName(name.to_string()));
    }
    Ok(())
}

/// Loads fonts by name and keeps every parsed font for reuse.
///
/// Built-in fonts shadow files with the same name.
#[derive(Debug, Default)]
pub struct FontStore {
    dirs: Vec<PathBuf>,
    cache: Mutex<HashMap<String, Arc<Font>>>,
}

impl FontStore {
    pub fn new(dirs: Vec<PathBuf>) -> Self {
        Self {
            dirs,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// A store searching the directories implied by `config` and the environment.
    pub fn from_config(config: &Config) -> Self {
        let fontdir_env = std::env::var_os(FONTDIR_ENV)
            .filter(|dir| !dir.is_empty())
            .map(PathBuf::from);
        Self::new(search_dirs(
            &config.font_dirs,
            fontdir_env,
            paths::fonts_dir(),
        ))
    }

    pub fn search_dirs(&self) -> &[PathBuf] {
        &self.dirs
    }

    /// Resolves `name` to a parsed font.
    ///
    /// # Errors
    /// `InvalidName` for names that look like paths, `NotFound` when no search directory has
    /// the file, `Io`/`Parse` when the file cannot be read or decoded.
    pub fn load(&self, name: &str) -> Result<Arc<Font>, FontLookupError> {
        validate_name(name)?;
        if let Some(font) = self.cached(name) {
            return Ok(font);
        }

        let font = match BuiltinFont::from_name(name) {
            Some(builtin) => builtin.parse().map_err(|source| FontLookupError::Parse {
                name: name.to_string(),
                source,
            })?,
            None => {
                let path = self
                    .find_file(name)
                    .ok_or_else(|| FontLookupError::NotFound(name.to_string()))?;
                Self::read_file(name, &path)?
            }
        };

        let font = Arc::new(font);
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.to_string(), Arc::clone(&font));
        Ok(font)
    }

    /// Whether `name` resolves without reading or parsing anything.
    pub fn is_available(&self, name: &str) -> bool {
        validate_name(name).is_ok()
            && (BuiltinFont::from_name(name).is_some() || self.find_file(name).is_some())
    }

    fn cached(&self, name: &str) -> Option<Arc<Font>> {
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    fn find_file(&self, name: &str) -> Option<PathBuf> {
        self.dirs
            .iter()
            .map(|dir| dir.join(format!("{name}.{FONT_EXTENSION}")))
            .find(|path| path.is_file())
    }

    fn read_file(name: &str, path: &Path) -> Result<Font, FontLookupError> {
        let bytes = fs::read(path).map_err(|source| FontLookupError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let (font, warnings) =
            Font::parse_with_warnings(&bytes).map_err(|source| FontLookupError::Parse {
                name: name.to_string(),
                source,
            })?;
        for warning in &warnings {
            tracing::debug!(font = name, %warning, "font parsed with warning");
        }
        tracing::debug!(font = name, path = %path.display(), glyphs = font.len(), "loaded font");
        Ok(font)
    }
}
