//! # Eurorack Panel Core
//!
//! Shared constants, unit conversion and error types for the Eurorack panel
//! designer. Every other crate in the workspace depends on this one so that
//! exporters and layout algorithms agree on the physical standards
//! (HP pitch, 3U height) and on segment counts.

pub mod constants;
pub mod error;
pub mod units;

pub use error::{Error, ExportError, Result, SchemaError, SerializationError};
pub use units::{
    cm_to_mm, compute_panel_width, hp_to_mm, mm_to_cm, mm_to_hp, pt_to_mm, PanelWidth,
};
