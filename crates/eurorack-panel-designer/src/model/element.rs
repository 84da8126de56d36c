use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Point;

/// Properties shared by jacks, potentiometers and LEDs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CircularProperties {
    pub diameter_mm: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Bounding envelope shared by switches, rectangles, ovals, slots and
/// triangles. The element type decides which shape is inscribed in it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RectangularProperties {
    pub width_mm: f64,
    pub height_mm: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Text printed on the panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelProperties {
    pub text: String,
    pub font_size_pt: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Element type together with the properties it requires. A properties bag
/// that does not match its `type` fails to deserialize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "properties", rename_all = "lowercase")]
pub enum ElementKind {
    Jack(CircularProperties),
    Potentiometer(CircularProperties),
    Switch(RectangularProperties),
    Led(CircularProperties),
    Label(LabelProperties),
    Rectangle(RectangularProperties),
    Oval(RectangularProperties),
    Slot(RectangularProperties),
    Triangle(RectangularProperties),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementType {
    Jack,
    Potentiometer,
    Switch,
    Led,
    Label,
    Rectangle,
    Oval,
    Slot,
    Triangle,
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Jack => "jack",
            Self::Potentiometer => "potentiometer",
            Self::Switch => "switch",
            Self::Led => "led",
            Self::Label => "label",
            Self::Rectangle => "rectangle",
            Self::Oval => "oval",
            Self::Slot => "slot",
            Self::Triangle => "triangle",
        };
        write!(f, "{}", name)
    }
}

impl ElementKind {
    pub fn element_type(&self) -> ElementType {
        match self {
            ElementKind::Jack(_) => ElementType::Jack,
            ElementKind::Potentiometer(_) => ElementType::Potentiometer,
            ElementKind::Switch(_) => ElementType::Switch,
            ElementKind::Led(_) => ElementType::Led,
            ElementKind::Label(_) => ElementType::Label,
            ElementKind::Rectangle(_) => ElementType::Rectangle,
            ElementKind::Oval(_) => ElementType::Oval,
            ElementKind::Slot(_) => ElementType::Slot,
            ElementKind::Triangle(_) => ElementType::Triangle,
        }
    }

    /// Optional caption shown next to the element in the editor.
    pub fn label(&self) -> Option<&str> {
        match self {
            ElementKind::Jack(p) | ElementKind::Potentiometer(p) | ElementKind::Led(p) => {
                p.label.as_deref()
            }
            ElementKind::Switch(p)
            | ElementKind::Rectangle(p)
            | ElementKind::Oval(p)
            | ElementKind::Slot(p)
            | ElementKind::Triangle(p) => p.label.as_deref(),
            ElementKind::Label(p) => p.label.as_deref(),
        }
    }
}

/// One cutout or label placed on the panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelElement {
    pub id: String,
    pub position_mm: Point,
    /// Degrees, clockwise on screen.
    #[serde(default)]
    pub rotation_deg: f64,
    /// Unset elements are backfilled from the element-hole config on load.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mounting_holes_enabled: Option<bool>,
    /// Overrides the satellite pattern's base rotation for this element.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mounting_hole_rotation_deg: Option<f64>,
    #[serde(flatten)]
    pub kind: ElementKind,
}

impl PanelElement {
    /// Creates an element with a fresh unique id.
    pub fn new(kind: ElementKind, position_mm: Point) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), kind, position_mm)
    }

    pub fn with_id(id: impl Into<String>, kind: ElementKind, position_mm: Point) -> Self {
        Self {
            id: id.into(),
            position_mm,
            rotation_deg: 0.0,
            mounting_holes_enabled: None,
            mounting_hole_rotation_deg: None,
            kind,
        }
    }

    pub fn jack(position_mm: Point, diameter_mm: f64) -> Self {
        Self::new(ElementKind::Jack(circular(diameter_mm)), position_mm)
    }

    pub fn potentiometer(position_mm: Point, diameter_mm: f64) -> Self {
        Self::new(ElementKind::Potentiometer(circular(diameter_mm)), position_mm)
    }

    pub fn led(position_mm: Point, diameter_mm: f64) -> Self {
        Self::new(ElementKind::Led(circular(diameter_mm)), position_mm)
    }

    pub fn switch(position_mm: Point, width_mm: f64, height_mm: f64) -> Self {
        Self::new(
            ElementKind::Switch(rectangular(width_mm, height_mm)),
            position_mm,
        )
    }

    pub fn rectangle(position_mm: Point, width_mm: f64, height_mm: f64) -> Self {
        Self::new(
            ElementKind::Rectangle(rectangular(width_mm, height_mm)),
            position_mm,
        )
    }

    pub fn oval(position_mm: Point, width_mm: f64, height_mm: f64) -> Self {
        Self::new(ElementKind::Oval(rectangular(width_mm, height_mm)), position_mm)
    }

    pub fn slot(position_mm: Point, width_mm: f64, height_mm: f64) -> Self {
        Self::new(ElementKind::Slot(rectangular(width_mm, height_mm)), position_mm)
    }

    pub fn triangle(position_mm: Point, width_mm: f64, height_mm: f64) -> Self {
        Self::new(
            ElementKind::Triangle(rectangular(width_mm, height_mm)),
            position_mm,
        )
    }

    pub fn label(position_mm: Point, text: impl Into<String>, font_size_pt: f64) -> Self {
        Self::new(
            ElementKind::Label(LabelProperties {
                text: text.into(),
                font_size_pt,
                label: None,
            }),
            position_mm,
        )
    }

    pub fn element_type(&self) -> ElementType {
        self.kind.element_type()
    }

    /// Radius of the circle enclosing the element's unrotated envelope, used
    /// to place satellite holes. Labels have no extent.
    pub fn extent_mm(&self) -> Option<f64> {
        match &self.kind {
            ElementKind::Jack(p) | ElementKind::Potentiometer(p) | ElementKind::Led(p) => {
                Some(p.diameter_mm / 2.0)
            }
            ElementKind::Switch(p)
            | ElementKind::Rectangle(p)
            | ElementKind::Oval(p)
            | ElementKind::Slot(p)
            | ElementKind::Triangle(p) => Some(p.width_mm.max(p.height_mm) / 2.0),
            ElementKind::Label(_) => None,
        }
    }

    pub fn mounting_holes_enabled(&self) -> bool {
        self.mounting_holes_enabled == Some(true)
    }

    pub fn moved_to(&self, position_mm: Point) -> Self {
        Self {
            position_mm,
            ..self.clone()
        }
    }

    pub fn rotated_to(&self, rotation_deg: f64) -> Self {
        Self {
            rotation_deg,
            ..self.clone()
        }
    }

    pub fn with_mounting_holes(&self, enabled: bool) -> Self {
        Self {
            mounting_holes_enabled: Some(enabled),
            ..self.clone()
        }
    }
}

fn circular(diameter_mm: f64) -> CircularProperties {
    CircularProperties {
        diameter_mm,
        label: None,
    }
}

fn rectangular(width_mm: f64, height_mm: f64) -> RectangularProperties {
    RectangularProperties {
        width_mm,
        height_mm,
        label: None,
    }
}
