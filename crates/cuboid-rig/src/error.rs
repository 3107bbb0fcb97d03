use thiserror::Error;

use crate::model::CubeId;

/// Error types for cube hierarchy editing
#[derive(Error, Debug)]
pub enum RigError {
    /// A cube id that does not (or no longer) exist in the model
    #[error("Unknown cube: {0}")]
    UnknownCube(CubeId),

    /// A cube identifier that does not resolve to a cube
    #[error("Unknown cube identifier: '{0}'")]
    UnknownIdentifier(String),

    /// Identifiers must be unique inside one model
    #[error("Duplicate cube identifier: '{0}'")]
    DuplicateIdentifier(String),

    /// A local parameter was given a NaN or infinite component
    #[error("Non-finite {field} on cube '{cube}': {value}")]
    NonFinite {
        cube: String,
        field: &'static str,
        value: String,
    },

    /// Dimension or cube grow below zero on some axis
    #[error("Negative {field} on cube '{cube}': {value}")]
    NegativeSize {
        cube: String,
        field: &'static str,
        value: String,
    },

    /// Mirror plane normal has zero length or is not finite
    #[error("Invalid mirror axis: normal {0} has no usable direction")]
    InvalidMirrorAxis(String),

    /// Reparenting would put a cube below one of its own descendants
    #[error("Hierarchy cycle: cannot move '{child}' under '{parent}'")]
    HierarchyCycle { child: String, parent: String },

    /// A gesture update was issued without a preceding `mouse_down`
    #[error("No gesture in progress")]
    NoActiveGesture,

    /// A new gesture was started while another one is still active
    #[error("A gesture is already in progress")]
    GestureInProgress,

    /// Model root scale must be finite and positive
    #[error("Invalid units per block: {0} (must be finite and positive)")]
    InvalidUnitsPerBlock(f64),

    /// Malformed JSON model file
    #[cfg(feature = "serde")]
    #[error("JSON model file error: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed YAML model file
    #[cfg(feature = "serde")]
    #[error("YAML model file error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// I/O error while reading or writing a model file
    #[cfg(feature = "serde")]
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type using `RigError`
pub type Result<T> = std::result::Result<T, RigError>;
