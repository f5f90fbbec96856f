// Settings module
// Grid layout and palette configuration, loaded from config.toml

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::services::color::{HexColor, DEFAULT_PALETTE, FALLBACK_COLOR};

/// User-tunable layout and colour settings.
///
/// Every field has a default, so a partial `config.toml` only overrides the
/// keys it names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSettings {
    pub cell_width: f32,
    pub cell_height: f32,
    pub label_column_width: f32,
    pub header_height: f32,
    pub border_inset: f32,
    pub palette: Vec<String>,
    pub fallback_color: String,
    /// JSON lecture catalog for the search dialog; a built-in sample is used when unset
    pub catalog_path: Option<PathBuf>,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            cell_width: 80.0,
            cell_height: 30.0,
            label_column_width: 120.0,
            header_height: 40.0,
            border_inset: 1.0,
            palette: DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect(),
            fallback_color: FALLBACK_COLOR.to_string(),
            catalog_path: None,
        }
    }
}

impl GridSettings {
    /// Validate the settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        let sizes = [
            ("cell_width", self.cell_width),
            ("cell_height", self.cell_height),
            ("label_column_width", self.label_column_width),
            ("header_height", self.header_height),
        ];
        for (name, value) in sizes {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be a positive number, got {value}"
                )));
            }
        }

        if !self.border_inset.is_finite()
            || self.border_inset < 0.0
            || self.border_inset >= self.cell_width.min(self.cell_height)
        {
            return Err(ConfigError::Invalid(format!(
                "border_inset {} must be non-negative and smaller than a cell",
                self.border_inset
            )));
        }

        if self.palette.is_empty() {
            return Err(ConfigError::Invalid("palette must list at least one colour".into()));
        }
        for color in self.palette.iter().chain(std::iter::once(&self.fallback_color)) {
            HexColor::parse(color)?;
        }

        Ok(())
    }
}
