//! Edge.Cuts reference SVG: panel outline and every cutout as stroke-only
//! shapes, for importing into KiCad's board outline layer.

use tracing::debug;

use super::format_number as n;
use super::svg::{cutout_shape, svg_header};
use crate::cutouts::derive_cutouts;
use crate::model::{MountingHole, PanelModel};

const EDGE_STYLE: &str = " fill=\"none\" stroke=\"#000000\" stroke-width=\"0.1\"";

pub fn build_kicad_svg(model: &PanelModel, mounting_holes: &[MountingHole]) -> String {
    let width = model.dimensions.width_mm;
    let height = model.dimensions.height_mm;
    let cutouts = derive_cutouts(model, mounting_holes);
    debug!("Building Edge.Cuts SVG with {} cutouts", cutouts.len());

    let mut svg = svg_header(width, height);
    svg.push_str(&format!(
        "  <rect x=\"0\" y=\"0\" width=\"{}\" height=\"{}\"{EDGE_STYLE}/>\n",
        n(width),
        n(height)
    ));
    for cutout in &cutouts {
        svg.push_str("  ");
        svg.push_str(&cutout_shape(cutout, EDGE_STYLE));
        svg.push('\n');
    }
    svg.push_str("</svg>\n");
    svg
}
