//! Named constants shared by the layout algorithms and the exporters.
//!
//! The unit constants encode physical standards (Eurorack HP pitch, 3U rack
//! height) and must not be changed.

/// Millimeters per centimeter.
pub const MM_PER_CM: f64 = 10.0;

/// Width of one HP (horizontal pitch) unit in millimeters.
pub const DEFAULT_MM_PER_HP: f64 = 5.08;

/// Height of a 3U Eurorack panel in millimeters.
pub const THREE_U_HEIGHT_MM: f64 = 128.5;

/// Smallest panel width accepted from user input, in centimeters.
pub const MIN_PANEL_WIDTH_CM: f64 = 1.0;

/// Millimeters per inch.
pub const MM_PER_INCH: f64 = 25.4;

/// Typographic points per inch.
pub const POINTS_PER_INCH: f64 = 72.0;

/// Slack subtracted before rounding HP counts up, so exact multiples of the
/// pitch are not pushed to the next HP by floating-point noise.
pub const HP_EPSILON: f64 = 1e-9;

/// Minimum center-to-center distance between two frame mounting holes.
pub const MIN_MOUNTING_HOLE_SPACING_MM: f64 = 8.0;

/// Minimum number of line segments used to approximate a full circle or ellipse.
pub const MIN_CIRCLE_SEGMENTS: usize = 32;

/// Minimum number of line segments used to approximate a semicircular arc.
pub const MIN_ARC_SEGMENTS: usize = 8;

/// Default number of line segments per semicircular slot end-cap.
pub const DEFAULT_ARC_SEGMENTS: usize = 16;

/// Decimal places kept when formatting numbers into exported text files.
pub const NUMBER_PRECISION: i32 = 4;

/// Minimum text height used when estimating label footprints.
pub const MIN_LABEL_FONT_SIZE_MM: f64 = 2.0;

/// Average glyph advance as a fraction of the font size.
pub const LABEL_CHAR_WIDTH_RATIO: f64 = 0.6;

/// Line height as a multiple of the font size.
pub const LABEL_LINE_HEIGHT_RATIO: f64 = 1.25;

/// Zoom limits and step for interactive viewports.
pub const MIN_ZOOM: f64 = 0.1;
pub const MAX_ZOOM: f64 = 50.0;
pub const ZOOM_STEP: f64 = 1.2;

/// Default padding between the viewport edge and the panel, in pixels.
pub const DEFAULT_CANVAS_PADDING_PX: f64 = 24.0;

/// Default extrusion depth for STL export.
pub const DEFAULT_PANEL_THICKNESS_MM: f64 = 2.0;

/// KiCad board file format version written by the PCB exporter.
pub const KICAD_PCB_VERSION: u32 = 20231126;

/// Generator name recorded in KiCad board files.
pub const KICAD_GENERATOR: &str = "eurorack-panel-designer";

/// KiCad layer reserved for board outline geometry.
pub const KICAD_EDGE_CUTS_LAYER: &str = "Edge.Cuts";

/// Line width of every Edge.Cuts segment, in millimeters.
pub const KICAD_LINE_WIDTH_MM: f64 = 0.15;

/// Solid name written to both the header and footer of STL output.
pub const STL_SOLID_NAME: &str = "eurorack_panel";

/// Version of the serialized project format written by this build.
pub const CURRENT_FILE_VERSION: u64 = 2;
