//! Eurorack Panel Settings Crate
//!
//! Handles tool configuration: export defaults, new-panel defaults and canvas
//! limits, persisted as JSON or TOML.

pub mod config;
pub mod error;

pub use config::{CanvasSettings, Config, ExportSettings, PanelSettings};
pub use error::{SettingsError, SettingsResult};
