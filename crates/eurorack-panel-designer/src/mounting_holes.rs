//! Mounting-hole layout.
//!
//! Frame holes sit along the top and bottom edges. The panel width is split
//! into segments of `spacing_hp` HP; each segment contributes two candidate
//! X positions inset from its edges, or one centered position when the two
//! would come closer than the minimum fastener spacing.
//!
//! Satellite holes sit on a circle around individual elements and rotate
//! rigidly with them.

use std::f64::consts::TAU;

use tracing::debug;

use eurorack_panel_core::constants::MIN_MOUNTING_HOLE_SPACING_MM;

use crate::model::{
    ElementMountingHoleConfig, HoleShape, MountingHole, MountingHoleConfig, PanelDimensions,
    PanelElement, Point,
};

fn non_negative(value: f64) -> f64 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}

/// Clamps into `[min, max]`, collapsing to the midpoint when the range is empty.
fn clamp_range(value: f64, min: f64, max: f64) -> f64 {
    if min > max {
        return (min + max) / 2.0;
    }
    value.max(min).min(max)
}

/// Slot length limited to `[diameter, width - 2 * horizontal_offset]`.
pub fn clamp_slot_length(config: &MountingHoleConfig, width_mm: f64) -> f64 {
    let diameter = non_negative(config.diameter_mm);
    let upper = (width_mm - 2.0 * non_negative(config.horizontal_offset_mm)).max(diameter);
    let requested = if config.slot_length_mm.is_finite() {
        config.slot_length_mm
    } else {
        diameter
    };
    requested.max(diameter).min(upper)
}

/// Generates frame mounting holes for a panel.
///
/// Returns an empty list for degenerate dimensions. Holes of one segment are
/// emitted together, top before bottom for each X position.
pub fn generate_mounting_holes(
    dimensions: &PanelDimensions,
    config: &MountingHoleConfig,
) -> Vec<MountingHole> {
    let width = dimensions.width_mm;
    let height = dimensions.height_mm;
    if dimensions.width_hp == 0 || !(width > 0.0) || !(height > 0.0) {
        return Vec::new();
    }

    let mm_per_hp = width / dimensions.width_hp as f64;
    let diameter = non_negative(config.diameter_mm);
    let h_offset = non_negative(config.horizontal_offset_mm);
    let v_offset = non_negative(config.vertical_offset_mm);

    let slot_length = match config.shape {
        HoleShape::Slot => Some(clamp_slot_length(config, width)),
        HoleShape::Circle => None,
    };
    let footprint = slot_length.map_or(diameter / 2.0, |len| len / 2.0);
    let min_x = footprint;
    let max_x = width - footprint;
    let min_separation = diameter.max(footprint).max(MIN_MOUNTING_HOLE_SPACING_MM);

    let spacing_hp = config.spacing_hp.max(1);
    let mut positions: Vec<f64> = Vec::new();
    let mut segments = 0usize;
    let mut start_hp = 0u32;
    while start_hp < dimensions.width_hp {
        let end_hp = start_hp.saturating_add(spacing_hp).min(dimensions.width_hp);
        let seg_start = start_hp as f64 * mm_per_hp;
        let seg_end = end_hp as f64 * mm_per_hp;

        let left = clamp_range(seg_start + h_offset, min_x, max_x);
        let right = clamp_range(seg_end - h_offset, min_x, max_x);
        // Insets that cross or crowd each other collapse to the segment center
        let candidates = if right - left < min_separation {
            vec![clamp_range((seg_start + seg_end) / 2.0, min_x, max_x)]
        } else {
            vec![left, right]
        };

        for x in candidates {
            // Keep fasteners apart across segment boundaries too
            let too_close = positions
                .last()
                .is_some_and(|last| (x - last).abs() < min_separation);
            if !too_close {
                positions.push(x);
            }
        }

        segments += 1;
        start_hp = end_hp;
    }

    let make_hole = |center: Point| match slot_length {
        Some(len) => MountingHole::slot(center, diameter, len),
        None => MountingHole::circle(center, diameter),
    };

    let holes: Vec<MountingHole> = positions
        .iter()
        .flat_map(|&x| {
            [
                make_hole(Point::new(x, v_offset)),
                make_hole(Point::new(x, height - v_offset)),
            ]
        })
        .collect();

    debug!(
        "Generated {} mounting holes across {} segments ({} HP)",
        holes.len(),
        segments,
        dimensions.width_hp
    );
    holes
}

/// Satellite holes for every element with mounting holes enabled.
///
/// Holes sit on a circle of radius `extent + offset + hole_radius`, starting
/// at the element's override (or the config rotation) plus the element's own
/// rotation.
pub fn compute_element_mounting_holes(
    elements: &[PanelElement],
    config: &ElementMountingHoleConfig,
) -> Vec<MountingHole> {
    if config.count == 0 || !(config.diameter_mm > 0.0) {
        return Vec::new();
    }

    let hole_radius = config.diameter_mm / 2.0;
    let step = TAU / config.count as f64;
    let mut holes = Vec::new();

    for element in elements.iter().filter(|e| e.mounting_holes_enabled()) {
        let Some(extent) = element.extent_mm() else {
            continue;
        };
        let radius = extent + config.offset_mm + hole_radius;
        let base_deg = element
            .mounting_hole_rotation_deg
            .unwrap_or(config.rotation_deg)
            + element.rotation_deg;
        let start = base_deg.to_radians();

        for i in 0..config.count {
            let angle = start + step * i as f64;
            let center = Point::new(
                element.position_mm.x + radius * angle.cos(),
                element.position_mm.y + radius * angle.sin(),
            );
            holes.push(MountingHole::circle(center, config.diameter_mm));
        }
    }

    holes
}
