//! File exporters.
//!
//! Every text exporter formats numbers through [`format_number`] and takes
//! its shapes from [`derive_cutouts`](crate::cutouts::derive_cutouts), so
//! the SVG, KiCad and STL outputs stay numerically in sync.

pub mod kicad_pcb;
pub mod kicad_svg;
pub mod stl;
pub mod svg;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use eurorack_panel_core::constants::{DEFAULT_PANEL_THICKNESS_MM, NUMBER_PRECISION};
use eurorack_panel_core::ExportError;

use crate::model::PanelModel;
use crate::serialization::serialize_panel_model;

pub use kicad_pcb::build_kicad_pcb;
pub use kicad_svg::build_kicad_svg;
pub use stl::build_panel_stl;
pub use svg::build_panel_svg;

/// Formats a coordinate with at most four decimals. Negative zero and
/// non-finite values print as `0`.
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    let factor = 10f64.powi(NUMBER_PRECISION);
    let rounded = (value * factor).round() / factor;
    if rounded == 0.0 {
        return "0".to_string();
    }
    rounded.to_string()
}

/// Output formats understood by [`export_panel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExportFormat {
    Json,
    Svg,
    KicadSvg,
    KicadPcb,
    Stl,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 5] = [
        ExportFormat::Json,
        ExportFormat::Svg,
        ExportFormat::KicadSvg,
        ExportFormat::KicadPcb,
        ExportFormat::Stl,
    ];

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Svg => "svg",
            ExportFormat::KicadSvg => "edge-cuts.svg",
            ExportFormat::KicadPcb => "kicad_pcb",
            ExportFormat::Stl => "stl",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Svg => "svg",
            ExportFormat::KicadSvg => "kicad-svg",
            ExportFormat::KicadPcb => "kicad-pcb",
            ExportFormat::Stl => "stl",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|format| format.name() == lower)
            .ok_or_else(|| {
                format!(
                    "Unknown export format '{}', expected one of: json, svg, kicad-svg, kicad-pcb, stl",
                    s
                )
            })
    }
}

/// Options that only some exporters use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportOptions {
    /// Extrusion depth for STL.
    pub thickness_mm: f64,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            thickness_mm: DEFAULT_PANEL_THICKNESS_MM,
        }
    }
}

impl ExportOptions {
    /// Uses the panel's own thickness setting.
    pub fn for_model(model: &PanelModel) -> Self {
        Self {
            thickness_mm: model.options.thickness_mm,
        }
    }
}

/// Renders a panel in the requested format.
pub fn export_panel(
    model: &PanelModel,
    format: ExportFormat,
    options: &ExportOptions,
) -> Result<String, ExportError> {
    debug!(
        "Exporting {}HP panel with {} elements as {}",
        model.dimensions.width_hp,
        model.elements.len(),
        format
    );
    let holes = model.mounting_holes();
    let output = match format {
        ExportFormat::Json => serialize_panel_model(model)?,
        ExportFormat::Svg => build_panel_svg(model, &holes),
        ExportFormat::KicadSvg => build_kicad_svg(model, &holes),
        ExportFormat::KicadPcb => build_kicad_pcb(model, &holes),
        ExportFormat::Stl => build_panel_stl(model, &holes, options.thickness_mm)?,
    };
    debug!("{} export produced {} bytes", format, output.len());
    Ok(output)
}
