//! Unit conversion utilities
//!
//! Handles conversion between centimeters, millimeters, typographic points
//! and Eurorack HP units. Panel widths are always normalized to an integer
//! number of HP because rack rails only accept whole HP modules.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_MM_PER_HP, HP_EPSILON, MIN_PANEL_WIDTH_CM, MM_PER_CM, MM_PER_INCH, POINTS_PER_INCH,
};

/// Converts centimeters to millimeters.
pub fn cm_to_mm(cm: f64) -> f64 {
    cm * MM_PER_CM
}

/// Converts millimeters to centimeters.
pub fn mm_to_cm(mm: f64) -> f64 {
    mm / MM_PER_CM
}

/// Converts HP units to millimeters.
pub fn hp_to_mm(hp: f64, mm_per_hp: f64) -> f64 {
    hp * sanitize_mm_per_hp(mm_per_hp)
}

/// Converts millimeters to (fractional) HP units.
pub fn mm_to_hp(mm: f64, mm_per_hp: f64) -> f64 {
    mm / sanitize_mm_per_hp(mm_per_hp)
}

/// Converts a font size in points to millimeters.
pub fn pt_to_mm(pt: f64) -> f64 {
    pt * MM_PER_INCH / POINTS_PER_INCH
}

/// Falls back to the Eurorack pitch for unusable values.
pub fn sanitize_mm_per_hp(mm_per_hp: f64) -> f64 {
    if mm_per_hp.is_finite() && mm_per_hp > 0.0 {
        mm_per_hp
    } else {
        DEFAULT_MM_PER_HP
    }
}

/// Result of normalizing a user-entered panel width.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelWidth {
    /// Sanitized width as entered, in centimeters.
    pub width_cm: f64,
    /// Width rounded up to whole HP units.
    pub width_hp: u32,
    /// `width_hp * mm_per_hp`.
    pub normalized_width_mm: f64,
}

/// Normalizes a raw width in centimeters to a whole number of HP.
///
/// Non-finite input and anything below 1cm are clamped to 1cm. The result
/// always satisfies `normalized_width_mm == width_hp * mm_per_hp`.
pub fn compute_panel_width(width_cm: f64, mm_per_hp: f64) -> PanelWidth {
    let mm_per_hp = sanitize_mm_per_hp(mm_per_hp);
    let width_cm = if width_cm.is_finite() {
        width_cm.max(MIN_PANEL_WIDTH_CM)
    } else {
        MIN_PANEL_WIDTH_CM
    };

    let raw_hp = (cm_to_mm(width_cm) / mm_per_hp - HP_EPSILON).ceil();
    let width_hp = if raw_hp.is_finite() && raw_hp >= 1.0 {
        raw_hp.min(u32::MAX as f64) as u32
    } else {
        1
    };

    PanelWidth {
        width_cm,
        width_hp,
        normalized_width_mm: width_hp as f64 * mm_per_hp,
    }
}
