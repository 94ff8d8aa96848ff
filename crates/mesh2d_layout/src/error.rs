//! Layout error types

use mesh2d_core::{MeasureError, NodeId};
use thiserror::Error;

/// Layout-related errors
#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("Node {0:?} does not exist in this scene")]
    UnknownNode(NodeId),

    #[error("Node {0:?} is not a container")]
    NotAContainer(NodeId),

    #[error("Node {0:?} is not interactive")]
    NotInteractive(NodeId),

    #[error("Node {0:?} is not a text node")]
    NotText(NodeId),

    /// The node already belongs to a container or a paint layer
    #[error("Node {0:?} is already attached")]
    AlreadyAttached(NodeId),

    /// Inserting the child would make a container its own descendant
    #[error("Inserting {child:?} into {container:?} would create a cycle")]
    WouldCycle { container: NodeId, child: NodeId },

    /// A setter or builder received a value outside its domain
    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: &'static str, value: f32 },

    /// Alignment was requested against a target that cannot be resolved
    #[error("Node {0:?} is not a valid alignment target")]
    InvalidAlignTarget(NodeId),

    #[error(transparent)]
    Measure(#[from] MeasureError),

    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Config(#[from] toml::de::Error),
}

/// Result type for layout operations
pub type Result<T> = std::result::Result<T, LayoutError>;

/// Accept finite, non-negative values
pub(crate) fn non_negative(field: &'static str, value: f32) -> Result<f32> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(LayoutError::InvalidValue { field, value })
    }
}

/// Accept finite, strictly positive values
pub(crate) fn positive(field: &'static str, value: f32) -> Result<f32> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(LayoutError::InvalidValue { field, value })
    }
}
