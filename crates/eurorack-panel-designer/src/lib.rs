//! # Eurorack Panel Designer
//!
//! Geometry and export engine for Eurorack front panels. Everything here is a
//! pure function over an immutable [`PanelModel`] snapshot: callers own the
//! model, edits return new values, and repeated calls with the same input
//! produce the same output.
//!
//! ## Core Components
//!
//! - **Model**: panel dimensions, elements (jacks, pots, switches, LEDs,
//!   labels and free-form cutouts) and the hole/clearance configs
//! - **Viewport**: panel-to-screen transform, zoom and pan
//! - **Geometry**: hit testing, rotated bounding boxes, marquee selection
//! - **Mounting holes**: frame rail holes and per-element satellite holes
//! - **Clearance**: rail clearance guides
//! - **Export**: SVG preview, KiCad Edge.Cuts SVG, KiCad PCB and STL
//! - **Serialization**: the versioned JSON project format
//!
//! ## Architecture
//!
//! ```text
//! PanelModel
//!   ├── mounting_holes / clearance (derived layout)
//!   ├── geometry / viewport (interaction)
//!   └── cutouts
//!         └── export (svg, kicad_svg, kicad_pcb, stl)
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use eurorack_panel_designer::{export_panel, ExportFormat, ExportOptions, PanelModel, PanelDimensions, PanelElement, Point};
//!
//! let model = PanelModel::new(PanelDimensions::from_hp(10, 5.08))
//!     .with_element_added(PanelElement::jack(Point::new(25.4, 100.0), 6.0));
//! let svg = export_panel(&model, ExportFormat::Svg, &ExportOptions::default())?;
//! ```

pub mod clearance;
pub mod cutouts;
pub mod export;
pub mod geometry;
pub mod model;
pub mod mounting_holes;
pub mod serialization;
pub mod viewport;

pub use clearance::{
    apply_clearance_line_position, clamp_clearance_config, compute_clearance_lines, ClearanceLines,
};
pub use cutouts::{derive_cutouts, Cutout};
pub use export::{
    build_kicad_pcb, build_kicad_svg, build_panel_stl, build_panel_svg, export_panel,
    format_number, ExportFormat, ExportOptions,
};
pub use geometry::{
    compute_nearest_element_distances, find_element_at_point, find_elements_in_rect,
    get_element_bounds, get_label_size_mm, is_point_inside_element, ElementDistance, LabelSize,
};
pub use model::{
    Bounds, ClearanceConfig, ClearanceLine, ElementKind, ElementMountingHoleConfig, ElementType,
    HoleShape, MountingHole, MountingHoleConfig, PanelDimensions, PanelElement, PanelModel,
    PanelModelInput, PanelOptions, Point,
};
pub use mounting_holes::{clamp_slot_length, compute_element_mounting_holes, generate_mounting_holes};
pub use serialization::{
    deserialize_panel_model, load_project, parse_serialized_panel, save_project,
    serialize_panel_model, SerializedPanel,
};
pub use viewport::{
    compute_canvas_transform, project_panel_point, screen_point_to_panel, CanvasTransform,
    CanvasTransformParams, Viewport,
};
