//! KiCad board export.
//!
//! The panel outline and every cutout become chains of `gr_line` segments on
//! the Edge.Cuts layer. Curves are flattened, so the segment count grows with
//! shape complexity.

use tracing::debug;

use eurorack_panel_core::constants::{
    KICAD_EDGE_CUTS_LAYER, KICAD_GENERATOR, KICAD_LINE_WIDTH_MM, KICAD_PCB_VERSION,
};

use super::format_number as n;
use crate::cutouts::derive_cutouts;
use crate::model::{MountingHole, PanelModel, Point};

fn gr_line(start: Point, end: Point) -> String {
    format!(
        "  (gr_line (start {} {}) (end {} {}) (layer \"{}\") (width {}))\n",
        n(start.x),
        n(start.y),
        n(end.x),
        n(end.y),
        KICAD_EDGE_CUTS_LAYER,
        n(KICAD_LINE_WIDTH_MM)
    )
}

/// Appends one segment per polygon edge, closing back to the first vertex.
fn push_closed_polyline(out: &mut String, points: &[Point]) -> usize {
    if points.len() < 2 {
        return 0;
    }
    for (i, start) in points.iter().enumerate() {
        let end = points[(i + 1) % points.len()];
        out.push_str(&gr_line(*start, end));
    }
    points.len()
}

pub fn build_kicad_pcb(model: &PanelModel, mounting_holes: &[MountingHole]) -> String {
    let width = model.dimensions.width_mm;
    let height = model.dimensions.height_mm;
    let cutouts = derive_cutouts(model, mounting_holes);

    let mut pcb = format!(
        "(kicad_pcb (version {}) (generator \"{}\")\n",
        KICAD_PCB_VERSION, KICAD_GENERATOR
    );
    pcb.push_str("  (general\n");
    pcb.push_str(&format!("    (thickness {})\n", n(model.options.thickness_mm)));
    pcb.push_str("  )\n");
    pcb.push_str("  (paper \"A4\")\n");
    pcb.push_str("  (layers\n");
    pcb.push_str("    (0 \"F.Cu\" signal)\n");
    pcb.push_str("    (31 \"B.Cu\" signal)\n");
    pcb.push_str(&format!("    (44 \"{}\" user)\n", KICAD_EDGE_CUTS_LAYER));
    pcb.push_str("  )\n");

    let outline = [
        Point::new(0.0, 0.0),
        Point::new(width, 0.0),
        Point::new(width, height),
        Point::new(0.0, height),
    ];
    let mut segments = push_closed_polyline(&mut pcb, &outline);
    for cutout in &cutouts {
        segments += push_closed_polyline(&mut pcb, &cutout.to_polygon());
    }
    pcb.push_str(")\n");

    debug!(
        "Built KiCad board with {} cutouts, {} segments",
        cutouts.len(),
        segments
    );
    pcb
}
