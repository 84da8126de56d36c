//! SVG preview export.
//!
//! The panel body is one even-odd path: the outer rectangle followed by every
//! cutout as a subpath, so holes punch through the fill. Element outlines and
//! labels are layered on top.

use tracing::debug;

use super::format_number as n;
use crate::cutouts::{derive_cutouts, Cutout, SlotAxis};
use crate::geometry::get_label_size_mm;
use crate::model::{ElementKind, MountingHole, PanelModel, Point};

const PANEL_FILL: &str = "#c8c8c8";
const OUTLINE_STROKE: &str = "#333333";
const OUTLINE_WIDTH_MM: f64 = 0.2;
const LABEL_FILL: &str = "#111111";

/// Opening `<svg>` tag sized in millimeters.
pub(crate) fn svg_header(width_mm: f64, height_mm: f64) -> String {
    let w = n(width_mm);
    let h = n(height_mm);
    format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 {w} {h}\" width=\"{w}mm\" height=\"{h}mm\">\n"
    )
}

pub(crate) fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

fn rotate_attr(rotation_deg: f64, cx: f64, cy: f64) -> String {
    if rotation_deg == 0.0 {
        String::new()
    } else {
        format!(
            " transform=\"rotate({} {} {})\"",
            n(rotation_deg),
            n(cx),
            n(cy)
        )
    }
}

fn is_multiple_of(angle_deg: f64, step: f64) -> bool {
    let r = angle_deg.rem_euclid(step);
    r < 1e-9 || step - r < 1e-9
}

/// Stadium outline: straight edge, cap arc, straight edge, cap arc.
pub(crate) fn slot_path_data(center: Point, width: f64, height: f64, rotation_deg: f64) -> String {
    let axis = SlotAxis::from_envelope(width, height, rotation_deg);
    let r = axis.radius;
    let hs = axis.half_straight;
    let corner = |x: f64, y: f64| center + Point::new(x, y).rotated(axis.angle_deg);

    let start = corner(-hs, -r);
    let right_top = corner(hs, -r);
    let right_bottom = corner(hs, r);
    let left_bottom = corner(-hs, r);

    let line_to = |p: Point| {
        if is_multiple_of(axis.angle_deg, 180.0) {
            format!("H {}", n(p.x))
        } else if is_multiple_of(axis.angle_deg + 90.0, 180.0) {
            format!("V {}", n(p.y))
        } else {
            format!("L {} {}", n(p.x), n(p.y))
        }
    };

    format!(
        "M {} {} {} A {r} {r} 0 0 1 {} {} {} A {r} {r} 0 0 1 {} {} Z",
        n(start.x),
        n(start.y),
        line_to(right_top),
        n(right_bottom.x),
        n(right_bottom.y),
        line_to(left_bottom),
        n(start.x),
        n(start.y),
        r = n(r),
    )
}

pub(crate) fn triangle_path_data(vertices: &[Point; 3]) -> String {
    let [a, b, c] = vertices;
    format!(
        "M {} {} L {} {} L {} {} L {} {} Z",
        n(a.x),
        n(a.y),
        n(b.x),
        n(b.y),
        n(c.x),
        n(c.y),
        n(a.x),
        n(a.y)
    )
}

/// Path data for one cutout, usable as an even-odd subpath.
pub(crate) fn cutout_path_data(cutout: &Cutout) -> String {
    match *cutout {
        Cutout::Circle { center, radius } => {
            let r = n(radius);
            format!(
                "M {} {} A {r} {r} 0 1 0 {} {} A {r} {r} 0 1 0 {} {} Z",
                n(center.x - radius),
                n(center.y),
                n(center.x + radius),
                n(center.y),
                n(center.x - radius),
                n(center.y),
            )
        }
        Cutout::Ellipse {
            center,
            rx,
            ry,
            rotation_deg,
        } => {
            let offset = Point::new(rx, 0.0).rotated(rotation_deg);
            let start = center - offset;
            let end = center + offset;
            let (rx, ry, rot) = (n(rx), n(ry), n(rotation_deg));
            format!(
                "M {} {} A {rx} {ry} {rot} 1 0 {} {} A {rx} {ry} {rot} 1 0 {} {} Z",
                n(start.x),
                n(start.y),
                n(end.x),
                n(end.y),
                n(start.x),
                n(start.y),
            )
        }
        Cutout::Rect {
            center,
            width,
            height,
            rotation_deg,
        } => {
            if rotation_deg == 0.0 {
                format!(
                    "M {} {} H {} V {} H {} Z",
                    n(center.x - width / 2.0),
                    n(center.y - height / 2.0),
                    n(center.x + width / 2.0),
                    n(center.y + height / 2.0),
                    n(center.x - width / 2.0),
                )
            } else {
                let corners = cutout.to_polygon();
                let mut d = String::new();
                for (i, p) in corners.iter().enumerate() {
                    d.push_str(if i == 0 { "M " } else { " L " });
                    d.push_str(&format!("{} {}", n(p.x), n(p.y)));
                }
                d.push_str(" Z");
                d
            }
        }
        Cutout::Slot {
            center,
            width,
            height,
            rotation_deg,
        } => slot_path_data(center, width, height, rotation_deg),
        Cutout::Triangle { ref vertices } => triangle_path_data(vertices),
    }
}

/// Standalone SVG shape for one cutout. Styling comes from the caller's
/// enclosing group or the `style` attribute string.
pub(crate) fn cutout_shape(cutout: &Cutout, style: &str) -> String {
    match *cutout {
        Cutout::Circle { center, radius } => format!(
            "<circle cx=\"{}\" cy=\"{}\" r=\"{}\"{style}/>",
            n(center.x),
            n(center.y),
            n(radius)
        ),
        Cutout::Rect {
            center,
            width,
            height,
            rotation_deg,
        } => format!(
            "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\"{}{style}/>",
            n(center.x - width / 2.0),
            n(center.y - height / 2.0),
            n(width),
            n(height),
            rotate_attr(rotation_deg, center.x, center.y)
        ),
        Cutout::Ellipse {
            center,
            rx,
            ry,
            rotation_deg,
        } => format!(
            "<ellipse cx=\"{}\" cy=\"{}\" rx=\"{}\" ry=\"{}\"{}{style}/>",
            n(center.x),
            n(center.y),
            n(rx),
            n(ry),
            rotate_attr(rotation_deg, center.x, center.y)
        ),
        Cutout::Slot { .. } | Cutout::Triangle { .. } => {
            format!("<path d=\"{}\"{style}/>", cutout_path_data(cutout))
        }
    }
}

/// Builds the preview SVG document.
pub fn build_panel_svg(model: &PanelModel, mounting_holes: &[MountingHole]) -> String {
    let width = model.dimensions.width_mm;
    let height = model.dimensions.height_mm;
    let cutouts = derive_cutouts(model, mounting_holes);
    debug!("Building SVG with {} cutouts", cutouts.len());

    let mut d = format!("M 0 0 H {} V {} H 0 Z", n(width), n(height));
    for cutout in &cutouts {
        d.push(' ');
        d.push_str(&cutout_path_data(cutout));
    }

    let mut svg = svg_header(width, height);
    svg.push_str(&format!(
        "  <path d=\"{d}\" fill=\"{PANEL_FILL}\" fill-rule=\"evenodd\" stroke=\"none\"/>\n"
    ));

    svg.push_str(&format!(
        "  <g fill=\"none\" stroke=\"{OUTLINE_STROKE}\" stroke-width=\"{}\">\n",
        n(OUTLINE_WIDTH_MM)
    ));
    for element in &model.elements {
        if let Some(cutout) = Cutout::from_element(element) {
            svg.push_str("    ");
            svg.push_str(&cutout_shape(&cutout, ""));
            svg.push('\n');
        }
    }
    svg.push_str("  </g>\n");

    let labels: Vec<_> = model
        .elements
        .iter()
        .filter_map(|e| match &e.kind {
            ElementKind::Label(p) => Some((e, p)),
            _ => None,
        })
        .collect();
    if !labels.is_empty() {
        svg.push_str(&format!(
            "  <g font-family=\"sans-serif\" fill=\"{LABEL_FILL}\" text-anchor=\"middle\" dominant-baseline=\"central\">\n"
        ));
        for (element, props) in labels {
            let size = get_label_size_mm(props);
            let pos = element.position_mm;
            svg.push_str(&format!(
                "    <text x=\"{}\" y=\"{}\" font-size=\"{}\"{}>{}</text>\n",
                n(pos.x),
                n(pos.y),
                n(size.font_size_mm),
                rotate_attr(element.rotation_deg, pos.x, pos.y),
                escape_xml(&props.text)
            ));
        }
        svg.push_str("  </g>\n");
    }

    svg.push_str("</svg>\n");
    svg
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PanelDimensions, PanelElement};

    fn panel() -> PanelModel {
        PanelModel::new(PanelDimensions::from_hp(8, 5.08))
    }

    #[test]
    fn test_header() {
        let model = panel();
        let svg = build_panel_svg(&model, &model.mounting_holes());
        assert!(svg.starts_with(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 40.64 128.5\" width=\"40.64mm\" height=\"128.5mm\">"
        ));
        assert!(svg.contains("fill-rule=\"evenodd\""));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_holes_are_subpaths() {
        let model = panel().with_element_added(PanelElement::jack(Point::new(20.0, 60.0), 6.0));
        let holes = model.mounting_holes();
        let svg = build_panel_svg(&model, &holes);
        let body = svg
            .lines()
            .find(|l| l.contains("fill-rule"))
            .unwrap_or_default();
        // Outer rectangle plus one subpath per hole and the jack
        assert_eq!(body.matches(" Z").count(), 1 + holes.len() + 1);
        assert!(svg.contains("<circle cx=\"20\" cy=\"60\" r=\"3\"/>"));
    }

    #[test]
    fn test_slot_path_shape() {
        let d = slot_path_data(Point::new(10.0, 10.0), 10.0, 4.0, 0.0);
        assert_eq!(d, "M 7 8 H 13 A 2 2 0 0 1 13 12 H 7 A 2 2 0 0 1 7 8 Z");

        let vertical = slot_path_data(Point::new(10.0, 10.0), 4.0, 10.0, 0.0);
        assert_eq!(vertical, "M 12 7 V 13 A 2 2 0 0 1 8 13 V 7 A 2 2 0 0 1 12 7 Z");

        let tilted = slot_path_data(Point::new(0.0, 0.0), 10.0, 4.0, 45.0);
        assert!(tilted.contains(" L "));
    }

    #[test]
    fn test_triangle_path() {
        let d = triangle_path_data(&[
            Point::new(5.0, 0.0),
            Point::new(0.0, 10.0),
            Point::new(10.0, 10.0),
        ]);
        assert_eq!(d.matches('L').count(), 3);
        assert!(d.ends_with('Z'));
    }

    #[test]
    fn test_labels_are_escaped_text() {
        let label = PanelElement::label(Point::new(20.0, 20.0), "A<B & C", 8.0);
        let model = panel().with_element_added(label);
        let svg = build_panel_svg(&model, &[]);
        assert!(svg.contains(">A&lt;B &amp; C</text>"));
    }
}
