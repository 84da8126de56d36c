//! Configuration and settings management for the panel designer
//!
//! Configuration is organized into sections:
//! - Export defaults (STL thickness, output directory, format)
//! - New-panel defaults (HP pitch, height, width)
//! - Canvas limits (padding, zoom range)
//!
//! Files are JSON or TOML, chosen by extension.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use eurorack_panel_core::constants::{
    DEFAULT_CANVAS_PADDING_PX, DEFAULT_MM_PER_HP, DEFAULT_PANEL_THICKNESS_MM, MAX_ZOOM, MIN_ZOOM,
    THREE_U_HEIGHT_MM,
};

use crate::error::{SettingsError, SettingsResult};

/// Directory name under the platform config dir.
pub const CONFIG_DIR_NAME: &str = "eurorack-panel";
/// Default config file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Export defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// STL extrusion depth in mm
    pub thickness_mm: f64,
    /// Where exports go when no output path is given
    pub output_directory: PathBuf,
    /// Format name used when none is requested
    pub default_format: String,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            thickness_mm: DEFAULT_PANEL_THICKNESS_MM,
            output_directory: dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")),
            default_format: "svg".to_string(),
        }
    }
}

/// Defaults for newly created panels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelSettings {
    pub mm_per_hp: f64,
    pub height_mm: f64,
    pub default_width_hp: u32,
}

impl Default for PanelSettings {
    fn default() -> Self {
        Self {
            mm_per_hp: DEFAULT_MM_PER_HP,
            height_mm: THREE_U_HEIGHT_MM,
            default_width_hp: 10,
        }
    }
}

/// Canvas view limits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasSettings {
    pub padding_px: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
}

impl Default for CanvasSettings {
    fn default() -> Self {
        Self {
            padding_px: DEFAULT_CANVAS_PADDING_PX,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileFormat {
    Json,
    Toml,
}

impl FileFormat {
    fn from_path(path: &Path) -> SettingsResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(FileFormat::Json),
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Ok(FileFormat::Toml),
            other => Err(SettingsError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}

/// Complete tool configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub export: ExportSettings,
    pub panel: PanelSettings,
    pub canvas: CanvasSettings,
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// `<config_dir>/eurorack-panel/config.toml`
    pub fn default_path() -> SettingsResult<PathBuf> {
        let base = dirs::config_dir().ok_or_else(|| {
            SettingsError::ConfigDirectory("no configuration directory on this platform".into())
        })?;
        Ok(base.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = FileFormat::from_path(path)?;
        let content = std::fs::read_to_string(path)?;
        let config: Self = match format {
            FileFormat::Json => serde_json::from_str(&content)?,
            FileFormat::Toml => toml::from_str(&content)?,
        };
        config.validate()?;
        debug!("Loaded settings from {}", path.display());
        Ok(config)
    }

    /// Save config to file (JSON or TOML), creating parent directories
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;
        let content = match FileFormat::from_path(path)? {
            FileFormat::Json => serde_json::to_string_pretty(self)?,
            FileFormat::Toml => toml::to_string_pretty(self)?,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        debug!("Saved settings to {}", path.display());
        Ok(())
    }

    /// Loads `path`, or the default location when `None`. A missing file
    /// yields the defaults; a malformed one is still an error.
    pub fn load_or_default(path: Option<&Path>) -> SettingsResult<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::default_path()?,
        };
        if !path.exists() {
            debug!("No settings at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load_from_file(&path)
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        fn positive(key: &str, value: f64) -> SettingsResult<()> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(SettingsError::invalid(key, format!("must be > 0, got {}", value)))
            }
        }

        positive("export.thickness_mm", self.export.thickness_mm)?;
        if self.export.default_format.trim().is_empty() {
            return Err(SettingsError::invalid("export.default_format", "must not be empty"));
        }

        positive("panel.mm_per_hp", self.panel.mm_per_hp)?;
        positive("panel.height_mm", self.panel.height_mm)?;
        if self.panel.default_width_hp == 0 {
            return Err(SettingsError::invalid("panel.default_width_hp", "must be > 0"));
        }

        if !self.canvas.padding_px.is_finite() || self.canvas.padding_px < 0.0 {
            return Err(SettingsError::invalid("canvas.padding_px", "must be >= 0"));
        }
        positive("canvas.min_zoom", self.canvas.min_zoom)?;
        positive("canvas.max_zoom", self.canvas.max_zoom)?;
        if self.canvas.min_zoom >= self.canvas.max_zoom {
            return Err(SettingsError::invalid(
                "canvas.min_zoom",
                "must be less than canvas.max_zoom",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::new();
        assert_eq!(config.export.thickness_mm, 2.0);
        assert_eq!(config.export.default_format, "svg");
        assert_eq!(config.panel.mm_per_hp, 5.08);
        assert_eq!(config.panel.height_mm, 128.5);
        assert_eq!(config.panel.default_width_hp, 10);
        assert_eq!(config.canvas.padding_px, 24.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::new();
        config.export.thickness_mm = 0.0;
        assert!(matches!(
            config.validate(),
            Err(SettingsError::InvalidSetting { key, .. }) if key == "export.thickness_mm"
        ));

        let mut config = Config::new();
        config.canvas.min_zoom = 60.0;
        assert!(config.validate().is_err());

        let mut config = Config::new();
        config.panel.mm_per_hp = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unsupported_extension() {
        let err = Config::new()
            .save_to_file(Path::new("settings.yaml"))
            .unwrap_err();
        assert!(matches!(err, SettingsError::UnsupportedFormat(ext) if ext == "yaml"));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: Config = toml::from_str("[export]\nthickness_mm = 3.0\n").unwrap();
        assert_eq!(config.export.thickness_mm, 3.0);
        assert_eq!(config.export.default_format, "svg");
        assert_eq!(config.panel, PanelSettings::default());
    }
}
