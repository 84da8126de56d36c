//! Versioned project file format.
//!
//! A project is stored as `{"version": N, "model": {...}}`. Version 1 files
//! may omit the hole and clearance configs; version 2 files carry the full
//! model. Every decoded model is normalized before it is handed back, so it
//! satisfies the same invariants as a model built in the editor.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use eurorack_panel_core::constants::CURRENT_FILE_VERSION;
use eurorack_panel_core::{Result, SchemaError, SerializationError};

use crate::model::{PanelModel, PanelModelInput};

/// Oldest file version that is still readable.
pub const MIN_FILE_VERSION: u64 = 1;

/// A decoded project file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerializedPanel {
    pub version: u64,
    pub model: PanelModel,
}

#[derive(Serialize)]
struct SerializedPanelRef<'a> {
    version: u64,
    model: &'a PanelModel,
}

/// Encodes a model with the current file version.
pub fn serialize_panel_model(model: &PanelModel) -> std::result::Result<String, SerializationError> {
    let envelope = SerializedPanelRef {
        version: CURRENT_FILE_VERSION,
        model,
    };
    serde_json::to_string_pretty(&envelope).map_err(SerializationError::Encode)
}

fn read_version(fields: &Map<String, Value>) -> std::result::Result<u64, SchemaError> {
    let version = fields.get("version").ok_or(SchemaError::MissingVersion)?;
    let invalid = || SchemaError::InvalidVersion {
        found: version.to_string(),
    };

    let number = match version.as_u64() {
        Some(v) => v,
        None => match version.as_f64() {
            Some(f) if f.fract() == 0.0 && f >= 1.0 && f <= u64::MAX as f64 => f as u64,
            _ => return Err(invalid()),
        },
    };
    if number < MIN_FILE_VERSION {
        return Err(invalid());
    }
    if number > CURRENT_FILE_VERSION {
        return Err(SchemaError::UnsupportedVersion {
            found: number,
            supported: CURRENT_FILE_VERSION,
        });
    }
    Ok(number)
}

fn decode_model(version: u64, payload: Value) -> std::result::Result<PanelModel, SchemaError> {
    let invalid = |e: serde_json::Error| SchemaError::InvalidModel {
        version,
        reason: e.to_string(),
    };
    let input = if version >= 2 {
        PanelModelInput::from(serde_json::from_value::<PanelModel>(payload).map_err(invalid)?)
    } else {
        serde_json::from_value::<PanelModelInput>(payload).map_err(invalid)?
    };
    Ok(input.normalize())
}

/// Validates and decodes a project, keeping the version it was written with.
pub fn parse_serialized_panel(text: &str) -> std::result::Result<SerializedPanel, SerializationError> {
    let value: Value = serde_json::from_str(text).map_err(SerializationError::Syntax)?;
    let Value::Object(mut fields) = value else {
        return Err(SchemaError::NotAnObject.into());
    };

    let version = read_version(&fields)?;
    let payload = fields.remove("model").ok_or_else(|| SchemaError::InvalidModel {
        version,
        reason: "missing model".to_string(),
    })?;
    let model = decode_model(version, payload)?;

    debug!(
        "Loaded version {} panel with {} elements",
        version,
        model.elements.len()
    );
    Ok(SerializedPanel { version, model })
}

/// Decodes a project, discarding the file version.
pub fn deserialize_panel_model(text: &str) -> std::result::Result<PanelModel, SerializationError> {
    parse_serialized_panel(text).map(|parsed| parsed.model)
}

/// Writes a project file.
pub fn save_project(path: impl AsRef<Path>, model: &PanelModel) -> Result<()> {
    let json = serialize_panel_model(model)?;
    std::fs::write(path.as_ref(), json)?;
    debug!("Saved project to {}", path.as_ref().display());
    Ok(())
}

/// Reads and validates a project file.
pub fn load_project(path: impl AsRef<Path>) -> Result<PanelModel> {
    let text = std::fs::read_to_string(path.as_ref())?;
    Ok(deserialize_panel_model(&text)?)
}
