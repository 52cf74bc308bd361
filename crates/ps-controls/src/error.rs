//! Error types for plant and preset operations.

use thiserror::Error;

/// Result type for plant and preset operations.
pub type ControlResult<T> = Result<T, ControlError>;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ControlError {
    /// A plant parameter is outside its physical domain.
    #[error("Invalid plant parameter {name} = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    /// Parameter name not known for the plant kind.
    #[error("Plant {kind} has no parameter named {name}")]
    UnknownParameter { kind: String, name: String },

    /// Plant type tag not recognised.
    #[error("Unknown plant type: {tag}")]
    UnknownPlant { tag: String },

    /// Invalid gain triple.
    #[error(transparent)]
    Gain(#[from] ps_core::CoreError),
}
