use serde::{Deserialize, Serialize};
use tracing::warn;

use eurorack_panel_core::constants::{DEFAULT_MM_PER_HP, THREE_U_HEIGHT_MM};
use eurorack_panel_core::units::{compute_panel_width, mm_to_cm, sanitize_mm_per_hp};

use super::{
    ClearanceConfig, ClearanceLine, ElementMountingHoleConfig, MountingHole, MountingHoleConfig,
    PanelElement, PanelOptions, Point,
};
use crate::clearance::{apply_clearance_line_position, clamp_clearance_config};
use crate::mounting_holes::{compute_element_mounting_holes, generate_mounting_holes};

/// Pitches this close to the standard HP are treated as the standard.
const PITCH_TOLERANCE_MM: f64 = 1e-9;

/// Panel size. `width_mm` is always `width_hp * mm_per_hp`, never the raw
/// entered width.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelDimensions {
    pub width_cm: f64,
    pub width_mm: f64,
    pub width_hp: u32,
    #[serde(default = "default_height_mm")]
    pub height_mm: f64,
}

fn default_height_mm() -> f64 {
    THREE_U_HEIGHT_MM
}

fn sanitize_height(height_mm: f64) -> f64 {
    if height_mm.is_finite() && height_mm > 0.0 {
        height_mm
    } else {
        THREE_U_HEIGHT_MM
    }
}

impl PanelDimensions {
    /// Builds dimensions from a raw width, rounding up to whole HP.
    pub fn from_width_cm(width_cm: f64, height_mm: Option<f64>, mm_per_hp: f64) -> Self {
        let width = compute_panel_width(width_cm, mm_per_hp);
        Self {
            width_cm: width.width_cm,
            width_mm: width.normalized_width_mm,
            width_hp: width.width_hp,
            height_mm: sanitize_height(height_mm.unwrap_or(THREE_U_HEIGHT_MM)),
        }
    }

    /// Builds dimensions for an exact HP count.
    pub fn from_hp(width_hp: u32, mm_per_hp: f64) -> Self {
        let mm_per_hp = sanitize_mm_per_hp(mm_per_hp);
        let width_hp = width_hp.max(1);
        let width_mm = width_hp as f64 * mm_per_hp;
        Self {
            width_cm: mm_to_cm(width_mm),
            width_mm,
            width_hp,
            height_mm: THREE_U_HEIGHT_MM,
        }
    }

    /// Millimeters per HP implied by the stored width.
    pub fn mm_per_hp(&self) -> f64 {
        if self.width_hp == 0 {
            return 0.0;
        }
        self.width_mm / self.width_hp as f64
    }

    pub fn size_mm(&self) -> Point {
        Point::new(self.width_mm, self.height_mm)
    }

    /// Re-establishes the HP invariant for dimensions read from outside.
    pub fn normalized(&self, mm_per_hp: f64) -> Self {
        let mm_per_hp = sanitize_mm_per_hp(mm_per_hp);
        if self.width_hp == 0 || !self.width_mm.is_finite() {
            return Self::from_width_cm(self.width_cm, Some(self.height_mm), mm_per_hp);
        }
        let width_cm = if self.width_cm.is_finite() && self.width_cm > 0.0 {
            self.width_cm
        } else {
            mm_to_cm(self.width_hp as f64 * mm_per_hp)
        };
        Self {
            width_cm,
            width_mm: self.width_hp as f64 * mm_per_hp,
            width_hp: self.width_hp,
            height_mm: sanitize_height(self.height_mm),
        }
    }
}

impl Default for PanelDimensions {
    fn default() -> Self {
        Self::from_hp(10, sanitize_mm_per_hp(0.0))
    }
}

/// The aggregate root handed to every core function.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelModel {
    pub dimensions: PanelDimensions,
    pub elements: Vec<PanelElement>,
    pub options: PanelOptions,
    pub mounting_hole_config: MountingHoleConfig,
    pub element_hole_config: ElementMountingHoleConfig,
    pub clearance: ClearanceConfig,
}

/// Looser model shape accepted from version 1 files; configs may be absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelModelInput {
    pub dimensions: PanelDimensions,
    #[serde(default)]
    pub elements: Vec<PanelElement>,
    #[serde(default)]
    pub options: Option<PanelOptions>,
    #[serde(default)]
    pub mounting_hole_config: Option<MountingHoleConfig>,
    #[serde(default)]
    pub element_hole_config: Option<ElementMountingHoleConfig>,
    #[serde(default)]
    pub clearance: Option<ClearanceConfig>,
}

impl From<PanelModel> for PanelModelInput {
    fn from(model: PanelModel) -> Self {
        Self {
            dimensions: model.dimensions,
            elements: model.elements,
            options: Some(model.options),
            mounting_hole_config: Some(model.mounting_hole_config),
            element_hole_config: Some(model.element_hole_config),
            clearance: Some(model.clearance),
        }
    }
}

impl PanelModelInput {
    /// Fills in missing configs and re-applies every model invariant.
    pub fn normalize(self) -> PanelModel {
        let mut options = self.options.unwrap_or_default();
        let mm_per_hp = sanitize_mm_per_hp(options.mm_per_hp);
        if mm_per_hp != options.mm_per_hp {
            warn!("Invalid mm per HP {}, using {}", options.mm_per_hp, mm_per_hp);
            options.mm_per_hp = mm_per_hp;
        }

        let dimensions = self.dimensions.normalized(mm_per_hp);
        if dimensions != self.dimensions {
            warn!(
                "Panel dimensions normalized to {} HP x {}mm",
                dimensions.width_hp, dimensions.height_mm
            );
        }

        let element_hole_config = self.element_hole_config.unwrap_or_default();
        let raw_clearance = self.clearance.unwrap_or_default();
        let clearance = clamp_clearance_config(&raw_clearance, dimensions.height_mm);
        if clearance != raw_clearance {
            warn!("Clearance lines clamped to panel height {}mm", dimensions.height_mm);
        }

        let elements = self
            .elements
            .into_iter()
            .map(|mut element| {
                element
                    .mounting_holes_enabled
                    .get_or_insert(element_hole_config.enabled);
                element
            })
            .collect();

        PanelModel {
            dimensions,
            elements,
            options,
            mounting_hole_config: self.mounting_hole_config.unwrap_or_default(),
            element_hole_config,
            clearance,
        }
    }
}

impl Default for PanelModel {
    fn default() -> Self {
        Self::new(PanelDimensions::default())
    }
}

impl PanelModel {
    /// Creates an empty panel with default configs. The HP pitch is taken
    /// from `dimensions`.
    pub fn new(dimensions: PanelDimensions) -> Self {
        let implied = dimensions.mm_per_hp();
        let mm_per_hp = if (implied - DEFAULT_MM_PER_HP).abs() < PITCH_TOLERANCE_MM {
            DEFAULT_MM_PER_HP
        } else {
            implied
        };
        let options = PanelOptions {
            mm_per_hp,
            ..PanelOptions::default()
        };
        PanelModelInput {
            dimensions,
            elements: Vec::new(),
            options: Some(options),
            mounting_hole_config: None,
            element_hole_config: None,
            clearance: None,
        }
        .normalize()
    }

    /// Runs the model back through normalization.
    pub fn normalized(&self) -> Self {
        PanelModelInput::from(self.clone()).normalize()
    }

    pub fn element(&self, id: &str) -> Option<&PanelElement> {
        self.elements.iter().find(|e| e.id == id)
    }

    /// Frame mounting holes for the current dimensions and config.
    pub fn mounting_holes(&self) -> Vec<MountingHole> {
        generate_mounting_holes(&self.dimensions, &self.mounting_hole_config)
    }

    /// Satellite holes of every enabled element.
    pub fn element_mounting_holes(&self) -> Vec<MountingHole> {
        compute_element_mounting_holes(&self.elements, &self.element_hole_config)
    }

    pub fn with_width_cm(&self, width_cm: f64) -> Self {
        let dimensions = PanelDimensions::from_width_cm(
            width_cm,
            Some(self.dimensions.height_mm),
            self.options.mm_per_hp,
        );
        Self {
            dimensions,
            ..self.clone()
        }
    }

    pub fn with_height_mm(&self, height_mm: f64) -> Self {
        let mut dimensions = self.dimensions.clone();
        dimensions.height_mm = sanitize_height(height_mm);
        let clearance = clamp_clearance_config(&self.clearance, dimensions.height_mm);
        Self {
            dimensions,
            clearance,
            ..self.clone()
        }
    }

    /// Appends an element on top of the z-order.
    pub fn with_element_added(&self, element: PanelElement) -> Self {
        let mut element = element;
        element
            .mounting_holes_enabled
            .get_or_insert(self.element_hole_config.enabled);
        let mut elements = self.elements.clone();
        elements.push(element);
        Self {
            elements,
            ..self.clone()
        }
    }

    pub fn with_element_removed(&self, id: &str) -> Self {
        Self {
            elements: self.elements.iter().filter(|e| e.id != id).cloned().collect(),
            ..self.clone()
        }
    }

    /// Moves an element, snapping to the grid when enabled. Unknown ids leave
    /// the model unchanged.
    pub fn with_element_moved(&self, id: &str, position_mm: Point) -> Self {
        let position_mm = self.options.snap(position_mm);
        self.map_element(id, |e| e.moved_to(position_mm))
    }

    pub fn with_element_rotated(&self, id: &str, rotation_deg: f64) -> Self {
        let rotation_deg = if rotation_deg.is_finite() {
            rotation_deg.rem_euclid(360.0)
        } else {
            0.0
        };
        self.map_element(id, |e| e.rotated_to(rotation_deg))
    }

    /// Drags a clearance guide to a panel Y coordinate.
    pub fn with_clearance_line_at(&self, line: ClearanceLine, position_mm: f64) -> Self {
        let clearance = apply_clearance_line_position(
            &self.clearance,
            self.dimensions.height_mm,
            line,
            position_mm,
        );
        Self {
            clearance,
            ..self.clone()
        }
    }

    fn map_element(&self, id: &str, f: impl Fn(&PanelElement) -> PanelElement) -> Self {
        let elements = self
            .elements
            .iter()
            .map(|e| if e.id == id { f(e) } else { e.clone() })
            .collect();
        Self {
            elements,
            ..self.clone()
        }
    }
}
