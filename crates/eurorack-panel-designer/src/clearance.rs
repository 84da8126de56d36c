//! Rail clearance guide lines.
//!
//! Two horizontal lines mark the zone kept free for the rack rails. The
//! config is always clamped against the panel height so the lines never
//! leave the panel and never cross. The top line wins when both are pushed
//! towards each other.

use serde::{Deserialize, Serialize};

use crate::model::{ClearanceConfig, ClearanceLine};

/// Resolved Y positions of the two guide lines, in panel millimeters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClearanceLines {
    pub top_y: f64,
    pub bottom_y: f64,
}

fn clamp_finite(value: f64, min: f64, max: f64) -> f64 {
    if !value.is_finite() {
        return min;
    }
    value.max(min).min(max)
}

/// Clamps spacing, then top, then bottom into the panel height.
pub fn clamp_clearance_config(config: &ClearanceConfig, panel_height_mm: f64) -> ClearanceConfig {
    let height = if panel_height_mm.is_finite() {
        panel_height_mm.max(0.0)
    } else {
        0.0
    };
    let min_spacing_mm = clamp_finite(config.min_spacing_mm, 0.0, height);
    let top_offset_mm = clamp_finite(config.top_offset_mm, 0.0, height - min_spacing_mm);
    let bottom_offset_mm = clamp_finite(
        config.bottom_offset_mm,
        0.0,
        height - min_spacing_mm - top_offset_mm,
    );
    ClearanceConfig {
        top_offset_mm,
        bottom_offset_mm,
        min_spacing_mm,
    }
}

/// Computes the guide positions; the bottom line never rises above
/// `top_y + min_spacing_mm`.
pub fn compute_clearance_lines(config: &ClearanceConfig, panel_height_mm: f64) -> ClearanceLines {
    let clamped = clamp_clearance_config(config, panel_height_mm);
    let height = if panel_height_mm.is_finite() {
        panel_height_mm.max(0.0)
    } else {
        0.0
    };
    let top_y = clamped.top_offset_mm;
    let bottom_y = (height - clamped.bottom_offset_mm).max(top_y + clamped.min_spacing_mm);
    ClearanceLines { top_y, bottom_y }
}

/// Moves one guide line to `position_mm` (a panel Y coordinate) and returns
/// the clamped config.
pub fn apply_clearance_line_position(
    config: &ClearanceConfig,
    panel_height_mm: f64,
    line: ClearanceLine,
    position_mm: f64,
) -> ClearanceConfig {
    let mut next = config.clone();
    match line {
        ClearanceLine::Top => next.top_offset_mm = position_mm,
        ClearanceLine::Bottom => next.bottom_offset_mm = panel_height_mm - position_mm,
    }
    clamp_clearance_config(&next, panel_height_mm)
}
