use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use crate::error::ConfigError;
use crate::models::settings::GridSettings;

const CONFIG_FILE_NAME: &str = "config.toml";

/// Reads and writes `config.toml`
pub struct SettingsService {
    path: PathBuf,
}

impl SettingsService {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Service bound to the platform config directory, if one can be resolved
    pub fn from_default_location() -> Option<Self> {
        Self::default_path().map(Self::new)
    }

    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "TimetablePlanner", "TimetablePlanner")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load settings. A missing file yields defaults; a present but invalid
    /// file is an error.
    pub fn load(&self) -> Result<GridSettings, ConfigError> {
        if !self.path.exists() {
            log::info!(
                "No config at {}, using default grid settings",
                self.path.display()
            );
            return Ok(GridSettings::default());
        }

        let content = fs::read_to_string(&self.path).map_err(|source| ConfigError::Io {
            path: self.path.clone(),
            source,
        })?;
        let settings: GridSettings = toml::from_str(&content)?;
        settings.validate()?;

        log::info!("Loaded grid settings from {}", self.path.display());
        Ok(settings)
    }

    /// Load settings, logging and falling back to defaults on any error
    pub fn load_or_default(&self) -> GridSettings {
        self.load().unwrap_or_else(|err| {
            log::warn!(
                "Failed to load settings from {}: {}. Using defaults.",
                self.path.display(),
                err
            );
            GridSettings::default()
        })
    }

    pub fn save(&self, settings: &GridSettings) -> Result<(), ConfigError> {
        settings.validate()?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let data = toml::to_string_pretty(settings)?;
        fs::write(&self.path, data).map_err(|source| ConfigError::Io {
            path: self.path.clone(),
            source,
        })?;
        Ok(())
    }
}
