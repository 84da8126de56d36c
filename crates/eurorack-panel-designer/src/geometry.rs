//! Element geometry: hit testing, bounding boxes and proximity queries.
//!
//! Tests run in the element's local frame (origin at its center, unrotated)
//! after translating and inverse-rotating the query point.

use serde::{Deserialize, Serialize};

use eurorack_panel_core::constants::{
    LABEL_CHAR_WIDTH_RATIO, LABEL_LINE_HEIGHT_RATIO, MIN_LABEL_FONT_SIZE_MM,
};
use eurorack_panel_core::units::pt_to_mm;

use crate::model::{Bounds, ElementKind, LabelProperties, PanelElement, Point};

/// Estimated footprint of a label.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelSize {
    pub width_mm: f64,
    pub height_mm: f64,
    pub font_size_mm: f64,
}

/// Distance from a query point to an element's center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementDistance {
    pub id: String,
    pub distance: f64,
}

/// Approximates a label's size from its character count. No font metrics
/// are available here, so glyphs are assumed to be 0.6 em wide.
pub fn get_label_size_mm(properties: &LabelProperties) -> LabelSize {
    let font_size_mm = pt_to_mm(properties.font_size_pt).max(MIN_LABEL_FONT_SIZE_MM);
    let chars = properties.text.chars().count().max(1) as f64;
    LabelSize {
        width_mm: font_size_mm.max(font_size_mm * LABEL_CHAR_WIDTH_RATIO * chars),
        height_mm: font_size_mm * LABEL_LINE_HEIGHT_RATIO,
        font_size_mm,
    }
}

/// Triangle vertices in the local frame: apex at top-center, base along the
/// bottom edge of the envelope.
pub fn local_triangle_vertices(width: f64, height: f64) -> [Point; 3] {
    let hw = width / 2.0;
    let hh = height / 2.0;
    [
        Point::new(0.0, -hh),
        Point::new(-hw, hh),
        Point::new(hw, hh),
    ]
}

/// Triangle vertices in panel space, rotation applied.
pub fn triangle_vertices(center: Point, width: f64, height: f64, rotation_deg: f64) -> [Point; 3] {
    local_triangle_vertices(width, height).map(|v| center + v.rotated(rotation_deg))
}

fn to_local(point: Point, element: &PanelElement) -> Point {
    (point - element.position_mm).rotated(-element.rotation_deg)
}

fn inside_circle(p: Point, diameter: f64) -> bool {
    let r = diameter / 2.0;
    p.x * p.x + p.y * p.y <= r * r
}

fn inside_box(p: Point, width: f64, height: f64) -> bool {
    p.x.abs() <= width / 2.0 && p.y.abs() <= height / 2.0
}

fn inside_ellipse(p: Point, width: f64, height: f64) -> bool {
    let rx = width / 2.0;
    let ry = height / 2.0;
    if rx <= 0.0 || ry <= 0.0 {
        return false;
    }
    let nx = p.x / rx;
    let ny = p.y / ry;
    nx * nx + ny * ny <= 1.0
}

/// Stadium test along the envelope's major axis.
fn inside_capsule(p: Point, width: f64, height: f64) -> bool {
    let r = width.min(height) / 2.0;
    // Swap axes so the capsule always runs along local X
    let (along, across, length) = if width >= height {
        (p.x.abs(), p.y.abs(), width)
    } else {
        (p.y.abs(), p.x.abs(), height)
    };
    let half_straight = length / 2.0 - r;
    if along <= half_straight {
        return across <= r;
    }
    let dx = along - half_straight;
    dx * dx + across * across <= r * r
}

fn inside_triangle(p: Point, width: f64, height: f64) -> bool {
    let [a, b, c] = local_triangle_vertices(width, height);
    let denom = (b.y - c.y) * (a.x - c.x) + (c.x - b.x) * (a.y - c.y);
    if denom == 0.0 {
        return false;
    }
    let u = ((b.y - c.y) * (p.x - c.x) + (c.x - b.x) * (p.y - c.y)) / denom;
    let v = ((c.y - a.y) * (p.x - c.x) + (a.x - c.x) * (p.y - c.y)) / denom;
    let w = 1.0 - u - v;
    u >= 0.0 && v >= 0.0 && w >= 0.0
}

/// Exact containment test for an element's shape.
pub fn is_point_inside_element(point: Point, element: &PanelElement) -> bool {
    let local = to_local(point, element);
    match &element.kind {
        ElementKind::Jack(p) | ElementKind::Potentiometer(p) | ElementKind::Led(p) => {
            inside_circle(local, p.diameter_mm)
        }
        ElementKind::Switch(p) | ElementKind::Rectangle(p) => {
            inside_box(local, p.width_mm, p.height_mm)
        }
        ElementKind::Oval(p) => inside_ellipse(local, p.width_mm, p.height_mm),
        ElementKind::Slot(p) => inside_capsule(local, p.width_mm, p.height_mm),
        ElementKind::Triangle(p) => inside_triangle(local, p.width_mm, p.height_mm),
        ElementKind::Label(p) => {
            let size = get_label_size_mm(p);
            inside_box(local, size.width_mm, size.height_mm)
        }
    }
}

/// Topmost element containing `point`. Later elements are drawn above
/// earlier ones, so the list is searched from the end.
pub fn find_element_at_point(point: Point, elements: &[PanelElement]) -> Option<&PanelElement> {
    elements
        .iter()
        .rev()
        .find(|element| is_point_inside_element(point, element))
}

fn rotated_box_bounds(center: Point, width: f64, height: f64, rotation_deg: f64) -> Bounds {
    let hw = width / 2.0;
    let hh = height / 2.0;
    if rotation_deg == 0.0 {
        return Bounds::from_center(center, hw, hh);
    }
    let (s, c) = rotation_deg.to_radians().sin_cos();
    let dx = (hw * c).abs() + (hh * s).abs();
    let dy = (hw * s).abs() + (hh * c).abs();
    Bounds::from_center(center, dx, dy)
}

/// Axis-aligned bounding box in panel space, rotation included.
pub fn get_element_bounds(element: &PanelElement) -> Bounds {
    let center = element.position_mm;
    let rotation = element.rotation_deg;
    match &element.kind {
        ElementKind::Jack(p) | ElementKind::Potentiometer(p) | ElementKind::Led(p) => {
            let r = p.diameter_mm / 2.0;
            Bounds::from_center(center, r, r)
        }
        ElementKind::Switch(p)
        | ElementKind::Rectangle(p)
        | ElementKind::Oval(p)
        | ElementKind::Slot(p) => rotated_box_bounds(center, p.width_mm, p.height_mm, rotation),
        ElementKind::Triangle(p) => {
            let vertices = triangle_vertices(center, p.width_mm, p.height_mm, rotation);
            Bounds::from_points(&vertices).unwrap_or_else(|| Bounds::from_center(center, 0.0, 0.0))
        }
        ElementKind::Label(p) => {
            let size = get_label_size_mm(p);
            rotated_box_bounds(center, size.width_mm, size.height_mm, rotation)
        }
    }
}

/// Ids of elements whose bounding box overlaps `selection` (marquee select).
pub fn find_elements_in_rect<'a>(selection: &Bounds, elements: &'a [PanelElement]) -> Vec<&'a str> {
    elements
        .iter()
        .filter(|element| get_element_bounds(element).intersects(selection))
        .map(|element| element.id.as_str())
        .collect()
}

/// Up to `max_count` elements ordered by center distance from `point`.
pub fn compute_nearest_element_distances(
    point: Point,
    elements: &[PanelElement],
    max_count: usize,
) -> Vec<ElementDistance> {
    if max_count == 0 {
        return Vec::new();
    }
    let mut distances: Vec<ElementDistance> = elements
        .iter()
        .map(|element| ElementDistance {
            id: element.id.clone(),
            distance: element.position_mm.distance_to(&point),
        })
        .collect();
    distances.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    distances.truncate(max_count);
    distances
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ElementKind, RectangularProperties};

    fn rect_kind(width: f64, height: f64) -> RectangularProperties {
        RectangularProperties {
            width_mm: width,
            height_mm: height,
            label: None,
        }
    }

    #[test]
    fn test_circle_containment() {
        let jack = PanelElement::jack(Point::new(10.0, 10.0), 6.0);
        assert!(is_point_inside_element(Point::new(13.0, 10.0), &jack));
        assert!(!is_point_inside_element(Point::new(13.1, 10.0), &jack));
    }

    #[test]
    fn test_rotated_rectangle() {
        let rect = PanelElement::rectangle(Point::new(0.0, 0.0), 20.0, 4.0).rotated_to(90.0);
        assert!(is_point_inside_element(Point::new(0.0, 9.0), &rect));
        assert!(!is_point_inside_element(Point::new(9.0, 0.0), &rect));
    }

    #[test]
    fn test_oval() {
        let oval = PanelElement::oval(Point::new(0.0, 0.0), 20.0, 10.0);
        assert!(is_point_inside_element(Point::new(9.9, 0.0), &oval));
        // Inside the envelope corner, outside the ellipse
        assert!(!is_point_inside_element(Point::new(9.0, 4.5), &oval));
    }

    #[test]
    fn test_degenerate_oval() {
        let oval = PanelElement::oval(Point::new(0.0, 0.0), 0.0, 10.0);
        assert!(!is_point_inside_element(Point::new(0.0, 0.0), &oval));
    }

    #[test]
    fn test_slot_caps() {
        let slot = PanelElement::slot(Point::new(0.0, 0.0), 20.0, 6.0);
        assert!(is_point_inside_element(Point::new(7.0, 2.9), &slot));
        assert!(is_point_inside_element(Point::new(9.9, 0.0), &slot));
        // Envelope corner lies outside the rounded cap
        assert!(!is_point_inside_element(Point::new(9.8, 2.8), &slot));
    }

    #[test]
    fn test_vertical_slot() {
        let slot = PanelElement::new(ElementKind::Slot(rect_kind(4.0, 20.0)), Point::new(0.0, 0.0));
        assert!(is_point_inside_element(Point::new(0.0, 9.5), &slot));
        assert!(!is_point_inside_element(Point::new(1.9, 9.8), &slot));
    }

    #[test]
    fn test_triangle() {
        let tri = PanelElement::triangle(Point::new(0.0, 0.0), 10.0, 10.0);
        // Near the apex
        assert!(is_point_inside_element(Point::new(0.0, -4.0), &tri));
        // Upper corner of the envelope is outside
        assert!(!is_point_inside_element(Point::new(4.0, -4.0), &tri));
        // Base corners are inside
        assert!(is_point_inside_element(Point::new(4.9, 4.9), &tri));
    }

    #[test]
    fn test_degenerate_triangle() {
        let tri = PanelElement::triangle(Point::new(0.0, 0.0), 0.0, 10.0);
        assert!(!is_point_inside_element(Point::new(0.0, 0.0), &tri));
    }

    #[test]
    fn test_label_size() {
        let size = get_label_size_mm(&LabelProperties {
            text: "CV".to_string(),
            font_size_pt: 72.0,
            label: None,
        });
        assert!((size.font_size_mm - 25.4).abs() < 1e-9);
        assert!((size.width_mm - 25.4 * 0.6 * 2.0).abs() < 1e-9);
        assert!((size.height_mm - 25.4 * 1.25).abs() < 1e-9);

        let tiny = get_label_size_mm(&LabelProperties {
            text: String::new(),
            font_size_pt: 1.0,
            label: None,
        });
        assert_eq!(tiny.font_size_mm, 2.0);
        assert_eq!(tiny.width_mm, 2.0);
    }

    #[test]
    fn test_rotated_bounds() {
        let rect = PanelElement::rectangle(Point::new(10.0, 10.0), 20.0, 4.0).rotated_to(90.0);
        let b = get_element_bounds(&rect);
        assert!((b.min_x - 8.0).abs() < 1e-9);
        assert!((b.max_y - 20.0).abs() < 1e-9);

        let tri = PanelElement::triangle(Point::new(0.0, 0.0), 10.0, 10.0).rotated_to(180.0);
        let b = get_element_bounds(&tri);
        assert!((b.min_y + 5.0).abs() < 1e-9);
        assert!((b.max_y - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_marquee_selection() {
        let a = PanelElement::jack(Point::new(5.0, 5.0), 4.0);
        let b = PanelElement::jack(Point::new(50.0, 50.0), 4.0);
        let elements = vec![a.clone(), b];
        let ids = find_elements_in_rect(&Bounds::new(0.0, 0.0, 3.0, 3.0), &elements);
        assert_eq!(ids, vec![a.id.as_str()]);
    }

    #[test]
    fn test_nearest_zero_count() {
        let elements = vec![PanelElement::jack(Point::new(0.0, 0.0), 4.0)];
        assert!(compute_nearest_element_distances(Point::new(0.0, 0.0), &elements, 0).is_empty());
    }
}
