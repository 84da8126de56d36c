use serde::{Deserialize, Serialize};

use eurorack_panel_core::constants::{DEFAULT_MM_PER_HP, DEFAULT_PANEL_THICKNESS_MM};

use super::Point;

/// Outline of a mounting hole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum HoleShape {
    #[default]
    Circle,
    /// Horizontal capsule, `diameter_mm` wide and `slot_length_mm` long.
    Slot,
}

/// A derived mounting hole. Recomputed from the configs on every change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MountingHole {
    pub center: Point,
    pub diameter_mm: f64,
    pub shape: HoleShape,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slot_length_mm: Option<f64>,
}

impl MountingHole {
    pub fn circle(center: Point, diameter_mm: f64) -> Self {
        Self {
            center,
            diameter_mm,
            shape: HoleShape::Circle,
            slot_length_mm: None,
        }
    }

    pub fn slot(center: Point, diameter_mm: f64, slot_length_mm: f64) -> Self {
        Self {
            center,
            diameter_mm,
            shape: HoleShape::Slot,
            slot_length_mm: Some(slot_length_mm),
        }
    }

    pub fn radius_mm(&self) -> f64 {
        self.diameter_mm / 2.0
    }
}

/// Frame mounting-hole layout along the top and bottom panel edges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MountingHoleConfig {
    pub diameter_mm: f64,
    pub horizontal_offset_mm: f64,
    pub vertical_offset_mm: f64,
    pub spacing_hp: u32,
    #[serde(default)]
    pub shape: HoleShape,
    pub slot_length_mm: f64,
}

impl Default for MountingHoleConfig {
    fn default() -> Self {
        Self {
            diameter_mm: 3.2,
            horizontal_offset_mm: 7.5,
            vertical_offset_mm: 3.0,
            spacing_hp: 10,
            shape: HoleShape::Circle,
            slot_length_mm: 6.0,
        }
    }
}

/// Satellite holes arranged on a circle around each enabled element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementMountingHoleConfig {
    /// Default for elements that do not say otherwise.
    pub enabled: bool,
    pub count: u32,
    pub diameter_mm: f64,
    /// Gap between the element's extent and the hole's edge.
    pub offset_mm: f64,
    pub rotation_deg: f64,
}

impl Default for ElementMountingHoleConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            count: 2,
            diameter_mm: 2.2,
            offset_mm: 2.0,
            rotation_deg: 0.0,
        }
    }
}

/// Top and bottom guide lines marking the rail clearance zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClearanceConfig {
    pub top_offset_mm: f64,
    pub bottom_offset_mm: f64,
    pub min_spacing_mm: f64,
}

impl Default for ClearanceConfig {
    fn default() -> Self {
        Self {
            top_offset_mm: 10.0,
            bottom_offset_mm: 10.0,
            min_spacing_mm: 10.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClearanceLine {
    Top,
    Bottom,
}

/// Editor and export options stored with the panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelOptions {
    #[serde(default = "default_mm_per_hp")]
    pub mm_per_hp: f64,
    #[serde(default = "default_thickness_mm")]
    pub thickness_mm: f64,
    #[serde(default = "default_true")]
    pub show_clearance: bool,
    #[serde(default)]
    pub snap_to_grid: bool,
    #[serde(default = "default_grid_size_mm")]
    pub grid_size_mm: f64,
}

fn default_mm_per_hp() -> f64 {
    DEFAULT_MM_PER_HP
}
fn default_thickness_mm() -> f64 {
    DEFAULT_PANEL_THICKNESS_MM
}
fn default_true() -> bool {
    true
}
fn default_grid_size_mm() -> f64 {
    1.27
}

impl Default for PanelOptions {
    fn default() -> Self {
        Self {
            mm_per_hp: default_mm_per_hp(),
            thickness_mm: default_thickness_mm(),
            show_clearance: true,
            snap_to_grid: false,
            grid_size_mm: default_grid_size_mm(),
        }
    }
}

impl PanelOptions {
    /// Rounds a panel coordinate to the grid when snapping is enabled.
    pub fn snap(&self, p: Point) -> Point {
        if !self.snap_to_grid || !(self.grid_size_mm > 0.0) {
            return p;
        }
        let g = self.grid_size_mm;
        Point::new((p.x / g).round() * g, (p.y / g).round() * g)
    }
}
