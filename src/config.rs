//! Extension-category configuration
//!
//! The default extension blacklist and the settings classification come from
//! a JSON configuration object. Compiled-in defaults cover the common cases;
//! a config file only needs the categories it wants to change.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Extension categories and output defaults.
///
/// Every category is a list of extensions (leading dot optional, case
/// ignored). The first six categories plus `additional_ignore_types` form
/// the default extension blacklist; `settings_extensions` is consulted only
/// by the ignore-settings rule.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub image_extensions: Vec<String>,
    pub video_extensions: Vec<String>,
    pub audio_extensions: Vec<String>,
    pub document_extensions: Vec<String>,
    pub archive_extensions: Vec<String>,
    pub executable_extensions: Vec<String>,
    pub settings_extensions: Vec<String>,
    pub additional_ignore_types: Vec<String>,
    pub default_output_file: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        fn exts(list: &[&str]) -> Vec<String> {
            list.iter().map(|s| s.to_string()).collect()
        }
        Self {
            image_extensions: exts(&[
                ".png", ".jpg", ".jpeg", ".gif", ".bmp", ".svg", ".ico", ".webp", ".tiff",
            ]),
            video_extensions: exts(&[".mp4", ".avi", ".mov", ".mkv", ".webm", ".flv", ".wmv"]),
            audio_extensions: exts(&[".mp3", ".wav", ".ogg", ".flac", ".aac", ".m4a"]),
            document_extensions: exts(&[
                ".pdf", ".doc", ".docx", ".xls", ".xlsx", ".ppt", ".pptx", ".odt",
            ]),
            archive_extensions: exts(&[".zip", ".tar", ".gz", ".bz2", ".xz", ".7z", ".rar"]),
            executable_extensions: exts(&[
                ".exe", ".dll", ".so", ".dylib", ".bin", ".o", ".a", ".class", ".pyc", ".jar",
            ]),
            settings_extensions: exts(&[
                ".ini", ".cfg", ".conf", ".json", ".yaml", ".yml", ".toml", ".properties",
            ]),
            additional_ignore_types: exts(&[".lock", ".log", ".tmp", ".cache"]),
            default_output_file: "output.txt".to_string(),
        }
    }
}

impl AppConfig {
    /// Load a configuration file. Unknown keys are ignored; missing keys
    /// fall back to the compiled-in defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// The union of the blacklist categories, deduplicated and ordered.
    pub fn default_ignore_types(&self) -> Vec<String> {
        let mut union = BTreeSet::new();
        for category in [
            &self.image_extensions,
            &self.video_extensions,
            &self.audio_extensions,
            &self.document_extensions,
            &self.archive_extensions,
            &self.executable_extensions,
            &self.additional_ignore_types,
        ] {
            union.extend(category.iter().cloned());
        }
        union.into_iter().collect()
    }
}
