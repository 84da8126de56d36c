//! # Eurorack Panel
//!
//! Designs Eurorack front panels and exports them for manufacturing:
//! - Panel width snapped to whole HP, 3U height
//! - Frame mounting holes (round or slotted) and per-element satellite holes
//! - Jacks, potentiometers, switches, LEDs, labels and free-form cutouts
//! - SVG preview, KiCad Edge.Cuts SVG, KiCad PCB and STL export
//!
//! ## Architecture
//!
//! The workspace is split into crates:
//!
//! 1. **eurorack-panel-core** - Constants, unit conversion, error types
//! 2. **eurorack-panel-designer** - Panel model, geometry, hole layout, exporters, project files
//! 3. **eurorack-panel-settings** - Tool configuration (JSON/TOML)
//! 4. **eurorack-panel** - Logging setup and the command-line front end

pub mod cli;

pub use eurorack_panel_designer as designer;
pub use eurorack_panel_settings as settings;

pub use eurorack_panel_core::{
    cm_to_mm, compute_panel_width, hp_to_mm, mm_to_cm, mm_to_hp, Error, ExportError, Result,
    SchemaError, SerializationError,
};

pub use eurorack_panel_designer::{
    export_panel, load_project, save_project, ExportFormat, ExportOptions, PanelDimensions,
    PanelElement, PanelModel, Point,
};

pub use eurorack_panel_settings::Config;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output on stderr, so exports written to stdout stay clean
/// - RUST_LOG environment variable support
/// - INFO as the default level
pub fn init_logging() -> anyhow::Result<()> {
    use tracing::level_filters::LevelFilter;
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}
