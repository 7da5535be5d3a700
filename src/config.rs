use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const APP_NAME: &str = "flashcard-viewer";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechConfig {
    pub enabled: bool,
    /// Program invoked with `args` followed by the text to read out.
    pub command: String,
    pub args: Vec<String>,
    /// Put `--` before the text so cards starting with `-` are not read as
    /// options.
    pub end_of_options: bool,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            command: "espeak-ng".to_string(),
            args: vec!["-v".to_string(), "en".to_string()],
            end_of_options: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Interval of the UI refresh timer (elapsed time display)
    pub tick_rate_ms: u64,

    /// Shuffle the bank before the first pass instead of following file order
    pub shuffle_on_open: bool,

    /// Directory the file browser starts in
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_dir: Option<PathBuf>,

    /// Log file override
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,

    pub speech: SpeechConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: 1000,
            shuffle_on_open: false,
            start_dir: None,
            log_file: None,
            speech: SpeechConfig::default(),
        }
    }
}

impl AppConfig {
    /// Default config file path
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir()
            .ok_or(ConfigError::NoConfigDir)?
            .join(APP_NAME);
        Ok(config_dir.join("config.toml"))
    }

    /// Load config from the default location, falling back to defaults.
    pub fn load() -> Self {
        match Self::default_path() {
            Ok(path) => Self::load_from(&path),
            Err(e) => {
                tracing::warn!("{}", e);
                AppConfig::default()
            }
        }
    }

    /// Load config from `path`. A missing file is created with defaults; a
    /// malformed one is reported and ignored.
    pub fn load_from(path: &Path) -> Self {
        if path.exists() {
            match Self::read(path) {
                Ok(config) => return config,
                Err(e) => {
                    tracing::warn!(path = %path.display(), "{}", e);
                    return AppConfig::default();
                }
            }
        }

        let config = AppConfig::default();
        if let Err(e) = config.save_to(path) {
            tracing::warn!(path = %path.display(), "Could not write default config: {}", e);
        }
        config
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn tick_rate(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.tick_rate_ms.max(50))
    }
}
