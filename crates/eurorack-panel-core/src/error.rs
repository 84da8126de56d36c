//! Error handling for the panel designer
//!
//! Only two kinds of failure ever reach a caller:
//! - Schema errors (importing a project whose structure is wrong)
//! - Export precondition errors (e.g. a non-positive extrusion thickness)
//!
//! Sanitization problems and geometric degeneracies are absorbed where they
//! are detected and never show up here.

use thiserror::Error;

/// Structural problems found while importing a serialized panel.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchemaError {
    /// The payload is valid JSON but not an object
    #[error("Schema mismatch: expected a JSON object at the top level")]
    NotAnObject,

    /// The `version` field is absent
    #[error("Schema mismatch: missing version")]
    MissingVersion,

    /// The `version` field is not a positive integer
    #[error("Schema mismatch: invalid version {found}")]
    InvalidVersion {
        /// The offending value, rendered as JSON.
        found: String,
    },

    /// The file was written by a newer release
    #[error("Schema mismatch: version {found} is newer than supported version {supported}")]
    UnsupportedVersion {
        /// Version recorded in the payload.
        found: u64,
        /// Newest version this build can read.
        supported: u64,
    },

    /// The `model` payload does not have the expected shape
    #[error("Schema mismatch: invalid model for version {version}: {reason}")]
    InvalidModel {
        /// Version the payload was validated against.
        version: u64,
        /// Description of the first structural problem found.
        reason: String,
    },
}

/// Failure to decode a serialized panel.
#[derive(Error, Debug)]
pub enum SerializationError {
    /// The text is not JSON
    #[error("Invalid JSON: {0}")]
    Syntax(#[source] serde_json::Error),

    /// The JSON does not describe a panel
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// Encoding the model failed
    #[error("Failed to encode panel: {0}")]
    Encode(#[source] serde_json::Error),
}

impl SerializationError {
    /// Check if this is a structural (schema) failure rather than a syntax error
    pub fn is_schema_error(&self) -> bool {
        matches!(self, SerializationError::Schema(_))
    }
}

/// Failure while producing an export artifact.
#[derive(Error, Debug)]
pub enum ExportError {
    /// Extrusion depth is not a positive finite number
    #[error("Invalid panel thickness {thickness_mm}mm: must be a positive finite value")]
    InvalidThickness {
        /// The rejected thickness.
        thickness_mm: f64,
    },

    /// The planar tessellator rejected the outline
    #[error("Tessellation failed: {0}")]
    Tessellation(String),

    /// JSON export failed
    #[error(transparent)]
    Serialization(#[from] SerializationError),
}

/// Main error type for the panel designer
#[derive(Error, Debug)]
pub enum Error {
    /// Import/decoding error
    #[error(transparent)]
    Serialization(#[from] SerializationError),

    /// Export error
    #[error(transparent)]
    Export(#[from] ExportError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl From<SchemaError> for Error {
    fn from(err: SchemaError) -> Self {
        Error::Serialization(SerializationError::Schema(err))
    }
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a schema mismatch on import
    pub fn is_schema_error(&self) -> bool {
        matches!(self, Error::Serialization(err) if err.is_schema_error())
    }

    /// Check if this is an export precondition failure
    pub fn is_export_error(&self) -> bool {
        matches!(self, Error::Export(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
