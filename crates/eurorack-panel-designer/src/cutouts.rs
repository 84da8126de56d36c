//! Unified cutout list shared by every exporter.
//!
//! Frame holes, satellite holes and element cutouts all reduce to the five
//! primitive shapes below. Labels are engraved, never cut, so they have no
//! cutout.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use eurorack_panel_core::constants::{DEFAULT_ARC_SEGMENTS, MIN_ARC_SEGMENTS, MIN_CIRCLE_SEGMENTS};

use crate::geometry::triangle_vertices;
use crate::model::{Bounds, ElementKind, HoleShape, MountingHole, PanelElement, PanelModel, Point};

/// A closed region removed from the panel, in panel millimeters (Y down).
#[derive(Debug, Clone, PartialEq)]
pub enum Cutout {
    Circle {
        center: Point,
        radius: f64,
    },
    Rect {
        center: Point,
        width: f64,
        height: f64,
        rotation_deg: f64,
    },
    Ellipse {
        center: Point,
        rx: f64,
        ry: f64,
        rotation_deg: f64,
    },
    /// Capsule running along the longer side of its `width` x `height` envelope.
    Slot {
        center: Point,
        width: f64,
        height: f64,
        rotation_deg: f64,
    },
    Triangle {
        vertices: [Point; 3],
    },
}

/// Capsule parameters derived from a slot envelope.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotAxis {
    /// Half length of the straight section between the two caps.
    pub half_straight: f64,
    pub radius: f64,
    /// Direction of the major axis, degrees clockwise from +X.
    pub angle_deg: f64,
}

impl SlotAxis {
    pub fn from_envelope(width: f64, height: f64, rotation_deg: f64) -> Self {
        let (length, thickness, angle_deg) = if width >= height {
            (width, height, rotation_deg)
        } else {
            (height, width, rotation_deg + 90.0)
        };
        let radius = (thickness / 2.0).max(0.0);
        Self {
            half_straight: (length / 2.0 - radius).max(0.0),
            radius,
            angle_deg,
        }
    }

    /// Centers of the two end caps.
    pub fn cap_centers(&self, center: Point) -> (Point, Point) {
        let offset = Point::new(self.half_straight, 0.0).rotated(self.angle_deg);
        (center + offset, center - offset)
    }
}

impl Cutout {
    /// Cutout for a single element, `None` for labels.
    pub fn from_element(element: &PanelElement) -> Option<Self> {
        let center = element.position_mm;
        let rotation_deg = element.rotation_deg;
        let cutout = match &element.kind {
            ElementKind::Jack(p) | ElementKind::Potentiometer(p) | ElementKind::Led(p) => {
                Cutout::Circle {
                    center,
                    radius: p.diameter_mm / 2.0,
                }
            }
            ElementKind::Switch(p) | ElementKind::Rectangle(p) => Cutout::Rect {
                center,
                width: p.width_mm,
                height: p.height_mm,
                rotation_deg,
            },
            ElementKind::Oval(p) => Cutout::Ellipse {
                center,
                rx: p.width_mm / 2.0,
                ry: p.height_mm / 2.0,
                rotation_deg,
            },
            ElementKind::Slot(p) => Cutout::Slot {
                center,
                width: p.width_mm,
                height: p.height_mm,
                rotation_deg,
            },
            ElementKind::Triangle(p) => Cutout::Triangle {
                vertices: triangle_vertices(center, p.width_mm, p.height_mm, rotation_deg),
            },
            ElementKind::Label(_) => return None,
        };
        Some(cutout)
    }

    /// Frame slots are horizontal capsules `slot_length` long.
    pub fn from_mounting_hole(hole: &MountingHole) -> Self {
        match hole.shape {
            HoleShape::Slot => Cutout::Slot {
                center: hole.center,
                width: hole.slot_length_mm.unwrap_or(hole.diameter_mm).max(hole.diameter_mm),
                height: hole.diameter_mm,
                rotation_deg: 0.0,
            },
            HoleShape::Circle => Cutout::Circle {
                center: hole.center,
                radius: hole.radius_mm(),
            },
        }
    }

    /// Closed outline as a polygon without a repeated closing point.
    ///
    /// Circles and ellipses use `MIN_CIRCLE_SEGMENTS` vertices, each slot cap
    /// `DEFAULT_ARC_SEGMENTS` segments.
    pub fn to_polygon(&self) -> Vec<Point> {
        let points = match *self {
            Cutout::Circle { center, radius } => {
                ellipse_points(center, radius, radius, 0.0, MIN_CIRCLE_SEGMENTS)
            }
            Cutout::Ellipse {
                center,
                rx,
                ry,
                rotation_deg,
            } => ellipse_points(center, rx, ry, rotation_deg, MIN_CIRCLE_SEGMENTS),
            Cutout::Rect {
                center,
                width,
                height,
                rotation_deg,
            } => {
                let hw = width / 2.0;
                let hh = height / 2.0;
                [(-hw, -hh), (hw, -hh), (hw, hh), (-hw, hh)]
                    .iter()
                    .map(|&(x, y)| center + Point::new(x, y).rotated(rotation_deg))
                    .collect()
            }
            Cutout::Slot {
                center,
                width,
                height,
                rotation_deg,
            } => slot_points(center, width, height, rotation_deg, DEFAULT_ARC_SEGMENTS),
            Cutout::Triangle { vertices } => vertices.to_vec(),
        };
        dedup_closed(points)
    }

    pub fn bounds(&self) -> Bounds {
        match *self {
            Cutout::Circle { center, radius } => Bounds::from_center(center, radius, radius),
            _ => Bounds::from_points(&self.to_polygon())
                .unwrap_or_else(|| Bounds::from_center(Point::default(), 0.0, 0.0)),
        }
    }
}

/// Every cutout of a panel: the given frame holes first, then satellite
/// holes, then element cutouts in z-order.
pub fn derive_cutouts(model: &PanelModel, mounting_holes: &[MountingHole]) -> Vec<Cutout> {
    let mut cutouts: Vec<Cutout> = mounting_holes
        .iter()
        .map(Cutout::from_mounting_hole)
        .collect();
    cutouts.extend(
        model
            .element_mounting_holes()
            .iter()
            .map(Cutout::from_mounting_hole),
    );
    cutouts.extend(model.elements.iter().filter_map(Cutout::from_element));
    cutouts
}

fn ellipse_points(center: Point, rx: f64, ry: f64, rotation_deg: f64, segments: usize) -> Vec<Point> {
    let segments = segments.max(MIN_CIRCLE_SEGMENTS);
    (0..segments)
        .map(|i| {
            let theta = TAU * i as f64 / segments as f64;
            center + Point::new(rx * theta.cos(), ry * theta.sin()).rotated(rotation_deg)
        })
        .collect()
}

fn slot_points(center: Point, width: f64, height: f64, rotation_deg: f64, segments: usize) -> Vec<Point> {
    let segments = segments.max(MIN_ARC_SEGMENTS);
    let axis = SlotAxis::from_envelope(width, height, rotation_deg);
    let mut local = Vec::with_capacity(2 * (segments + 1));

    // Right cap sweeps from the top edge down to the bottom edge, left cap back up
    for (cap_x, start) in [(axis.half_straight, -FRAC_PI_2), (-axis.half_straight, FRAC_PI_2)] {
        for i in 0..=segments {
            let theta = start + PI * i as f64 / segments as f64;
            local.push(Point::new(
                cap_x + axis.radius * theta.cos(),
                axis.radius * theta.sin(),
            ));
        }
    }

    local
        .into_iter()
        .map(|p| center + p.rotated(axis.angle_deg))
        .collect()
}

fn dedup_closed(mut points: Vec<Point>) -> Vec<Point> {
    const EPS: f64 = 1e-9;
    points.dedup_by(|a, b| a.distance_to(b) < EPS);
    while points.len() > 1 {
        let (first, last) = (points[0], points[points.len() - 1]);
        if first.distance_to(&last) < EPS {
            points.pop();
        } else {
            break;
        }
    }
    points
}

/// Shoelace area; positive for counter-clockwise in a Y-up frame.
pub fn signed_area(points: &[Point]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let mut area = 0.0;
    for (i, a) in points.iter().enumerate() {
        let b = points[(i + 1) % points.len()];
        area += a.x * b.y - b.x * a.y;
    }
    area / 2.0
}
