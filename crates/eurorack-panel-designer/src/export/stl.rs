//! STL export: the panel extruded to a solid plate.
//!
//! The outline and cutouts are converted to a Y-up frame `(x, height - y)`,
//! the outer contour wound counter-clockwise and every hole clockwise. Caps
//! are tessellated with lyon using the even-odd rule, side walls are built
//! edge by edge. Cap and wall vertices share the same `f64` contour points so
//! the mesh closes exactly.
//!
//! Cutouts that cross the panel edge or overlap an earlier cutout cannot be
//! expressed as a simple hole and are left out of the solid with a warning.

use lyon::math::point;
use lyon::path::{EndpointId, Path};
use lyon::tessellation::{
    BuffersBuilder, FillOptions, FillRule, FillTessellator, FillVertex, VertexBuffers,
    VertexSource,
};
use nalgebra::{Point3, Vector3};
use tracing::{debug, warn};

use eurorack_panel_core::constants::STL_SOLID_NAME;
use eurorack_panel_core::ExportError;

use super::format_number as n;
use crate::cutouts::{derive_cutouts, signed_area};
use crate::model::{Bounds, MountingHole, PanelModel, Point};

const MIN_CONTOUR_AREA: f64 = 1e-9;

/// Closest a hole may come to the panel edge.
const EDGE_MARGIN_MM: f64 = 1e-3;

/// One triangle of the output mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct Facet {
    pub vertices: [Point3<f64>; 3],
    pub normal: Vector3<f64>,
}

impl Facet {
    /// Vertices must be counter-clockwise seen from outside the solid.
    pub fn new(v1: Point3<f64>, v2: Point3<f64>, v3: Point3<f64>) -> Self {
        let normal = (v2 - v1)
            .cross(&(v3 - v1))
            .try_normalize(f64::EPSILON)
            .unwrap_or_else(Vector3::zeros);
        Self {
            vertices: [v1, v2, v3],
            normal,
        }
    }
}

fn oriented(mut contour: Vec<Point>, counter_clockwise: bool) -> Vec<Point> {
    if (signed_area(&contour) > 0.0) != counter_clockwise {
        contour.reverse();
    }
    contour
}

fn edges(contour: &[Point]) -> impl Iterator<Item = (Point, Point)> + '_ {
    contour
        .iter()
        .zip(contour.iter().cycle().skip(1))
        .map(|(a, b)| (*a, *b))
}

fn cross(o: Point, a: Point, b: Point) -> f64 {
    (a.x - o.x) * (b.y - o.y) - (a.y - o.y) * (b.x - o.x)
}

fn on_segment(a: Point, b: Point, p: Point) -> bool {
    p.x >= a.x.min(b.x) && p.x <= a.x.max(b.x) && p.y >= a.y.min(b.y) && p.y <= a.y.max(b.y)
}

/// Proper crossings as well as touching or collinear overlap.
fn segments_touch(p1: Point, p2: Point, q1: Point, q2: Point) -> bool {
    let d1 = cross(q1, q2, p1);
    let d2 = cross(q1, q2, p2);
    let d3 = cross(p1, p2, q1);
    let d4 = cross(p1, p2, q2);
    if d1 * d2 < 0.0 && d3 * d4 < 0.0 {
        return true;
    }
    (d1 == 0.0 && on_segment(q1, q2, p1))
        || (d2 == 0.0 && on_segment(q1, q2, p2))
        || (d3 == 0.0 && on_segment(p1, p2, q1))
        || (d4 == 0.0 && on_segment(p1, p2, q2))
}

fn point_in_polygon(p: Point, polygon: &[Point]) -> bool {
    let mut inside = false;
    for (a, b) in edges(polygon) {
        if (a.y > p.y) != (b.y > p.y) && p.x < a.x + (p.y - a.y) / (b.y - a.y) * (b.x - a.x) {
            inside = !inside;
        }
    }
    inside
}

fn contours_overlap(a: &[Point], b: &[Point]) -> bool {
    let (Some(bounds_a), Some(bounds_b)) = (Bounds::from_points(a), Bounds::from_points(b)) else {
        return false;
    };
    if !bounds_a.intersects(&bounds_b) {
        return false;
    }
    if edges(a).any(|(p1, p2)| edges(b).any(|(q1, q2)| segments_touch(p1, p2, q1, q2))) {
        return true;
    }
    point_in_polygon(a[0], b) || point_in_polygon(b[0], a)
}

/// Outer contour first, then one contour per usable cutout.
fn panel_contours(model: &PanelModel, mounting_holes: &[MountingHole]) -> Vec<Vec<Point>> {
    let width = model.dimensions.width_mm;
    let height = model.dimensions.height_mm;
    let flip = |p: &Point| Point::new(p.x, height - p.y);
    let within_panel = |p: &Point| {
        p.x > EDGE_MARGIN_MM
            && p.x < width - EDGE_MARGIN_MM
            && p.y > EDGE_MARGIN_MM
            && p.y < height - EDGE_MARGIN_MM
    };

    let outer = vec![
        Point::new(0.0, 0.0),
        Point::new(width, 0.0),
        Point::new(width, height),
        Point::new(0.0, height),
    ];
    let mut contours = vec![oriented(outer, true)];

    for cutout in derive_cutouts(model, mounting_holes) {
        let hole: Vec<Point> = cutout.to_polygon().iter().map(flip).collect();
        if hole.len() < 3 || signed_area(&hole).abs() < MIN_CONTOUR_AREA {
            continue;
        }
        let center = cutout.bounds().center();
        if !hole.iter().all(within_panel) {
            warn!(
                "Cutout at ({:.2}, {:.2}) crosses the panel edge, left out of the STL",
                center.x, center.y
            );
            continue;
        }
        if contours[1..].iter().any(|other| contours_overlap(&hole, other)) {
            warn!(
                "Cutout at ({:.2}, {:.2}) overlaps another cutout, left out of the STL",
                center.x, center.y
            );
            continue;
        }
        contours.push(oriented(hole, false));
    }
    contours
}

/// Cap triangles, counter-clockwise, using the contour points themselves as
/// vertices.
fn tessellate_caps(contours: &[Vec<Point>]) -> Result<Vec<[Point; 3]>, ExportError> {
    let mut builder = Path::builder();
    let mut endpoints: Vec<Option<Point>> = Vec::new();
    let mut record = |id: EndpointId, p: Point| {
        let index = id.to_usize();
        if endpoints.len() <= index {
            endpoints.resize(index + 1, None);
        }
        endpoints[index] = Some(p);
    };
    for contour in contours {
        let mut points = contour.iter();
        let Some(first) = points.next() else {
            continue;
        };
        record(builder.begin(point(first.x as f32, first.y as f32)), *first);
        for p in points {
            record(builder.line_to(point(p.x as f32, p.y as f32)), *p);
        }
        builder.end(true);
    }
    let path = builder.build();

    let endpoint = |id: EndpointId| endpoints.get(id.to_usize()).copied().flatten();
    let resolve = |vertex: FillVertex| -> Point {
        for source in vertex.sources() {
            match source {
                VertexSource::Endpoint { id } => {
                    if let Some(p) = endpoint(id) {
                        return p;
                    }
                }
                VertexSource::Edge { from, to, t } => {
                    if let (Some(a), Some(b)) = (endpoint(from), endpoint(to)) {
                        return a + (b - a) * t as f64;
                    }
                }
            }
        }
        let p = vertex.position();
        Point::new(p.x as f64, p.y as f64)
    };

    let mut geometry: VertexBuffers<Point, u32> = VertexBuffers::new();
    let mut tessellator = FillTessellator::new();
    tessellator
        .tessellate_path(
            &path,
            &FillOptions::default().with_fill_rule(FillRule::EvenOdd),
            &mut BuffersBuilder::new(&mut geometry, resolve),
        )
        .map_err(|e| ExportError::Tessellation(format!("{:?}", e)))?;

    let vertex = |i: u32| geometry.vertices[i as usize];
    let triangles = geometry
        .indices
        .chunks_exact(3)
        .map(|tri| {
            let t = [vertex(tri[0]), vertex(tri[1]), vertex(tri[2])];
            // Normalize to counter-clockwise so cap normals point the right way
            if signed_area(&t) < 0.0 {
                [t[0], t[2], t[1]]
            } else {
                t
            }
        })
        .collect();
    Ok(triangles)
}

/// Builds the closed triangle mesh of the extruded panel.
pub fn build_panel_mesh(
    model: &PanelModel,
    mounting_holes: &[MountingHole],
    thickness_mm: f64,
) -> Result<Vec<Facet>, ExportError> {
    if !thickness_mm.is_finite() || thickness_mm <= 0.0 {
        return Err(ExportError::InvalidThickness { thickness_mm });
    }

    let contours = panel_contours(model, mounting_holes);
    let caps = tessellate_caps(&contours)?;
    let at = |p: Point, z: f64| Point3::new(p.x, p.y, z);

    let mut facets = Vec::with_capacity(caps.len() * 2);
    for [a, b, c] in &caps {
        facets.push(Facet::new(at(*a, thickness_mm), at(*b, thickness_mm), at(*c, thickness_mm)));
        facets.push(Facet::new(at(*a, 0.0), at(*c, 0.0), at(*b, 0.0)));
    }

    // Outer contour is CCW and holes CW, so the right-hand side of every edge
    // faces away from the material.
    for contour in &contours {
        for (i, a) in contour.iter().enumerate() {
            let b = contour[(i + 1) % contour.len()];
            let (a0, b0) = (at(*a, 0.0), at(b, 0.0));
            let (a1, b1) = (at(*a, thickness_mm), at(b, thickness_mm));
            facets.push(Facet::new(a0, b0, b1));
            facets.push(Facet::new(a0, b1, a1));
        }
    }

    debug!(
        "Extruded {} contours to {}mm: {} facets",
        contours.len(),
        thickness_mm,
        facets.len()
    );
    Ok(facets)
}

/// ASCII STL text for the extruded panel.
///
/// Fails before any geometry work when `thickness_mm` is not a positive
/// finite number.
pub fn build_panel_stl(
    model: &PanelModel,
    mounting_holes: &[MountingHole],
    thickness_mm: f64,
) -> Result<String, ExportError> {
    let facets = build_panel_mesh(model, mounting_holes, thickness_mm)?;

    let mut stl = format!("solid {}\n", STL_SOLID_NAME);
    for facet in &facets {
        stl.push_str(&format!(
            "  facet normal {} {} {}\n    outer loop\n",
            n(facet.normal.x),
            n(facet.normal.y),
            n(facet.normal.z)
        ));
        for v in &facet.vertices {
            stl.push_str(&format!("      vertex {} {} {}\n", n(v.x), n(v.y), n(v.z)));
        }
        stl.push_str("    endloop\n  endfacet\n");
    }
    stl.push_str(&format!("endsolid {}\n", STL_SOLID_NAME));
    Ok(stl)
}
