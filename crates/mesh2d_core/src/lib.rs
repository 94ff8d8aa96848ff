//! mesh2d Core Runtime
//!
//! The foundational primitives of the mesh2d layout engine:
//!
//! - **Measures**: shared reactive scale factors that many nodes read their
//!   coordinates through
//! - **Placement**: the affine coordinate algebra
//!   (`offset_in_measure_units * measure + pixel_offset`)
//! - **Pointer events**: host input delivery and per-node handler slots
//!
//! # Example
//!
//! ```rust
//! use mesh2d_core::{MeasureGraph, Offset, Placement};
//!
//! let mut graph = MeasureGraph::new();
//! let unit = graph.create(1.0).unwrap();
//!
//! let mut placement = Placement::new(unit);
//! placement.translate(Offset::new(2.0, 0.0, 5.0, 0.0)).unwrap();
//! assert_eq!(placement.x(&graph).unwrap(), 7.0);
//!
//! graph.set(unit, 10.0).unwrap();
//! assert_eq!(placement.x(&graph).unwrap(), 25.0);
//! ```

pub mod events;
pub mod measure;
pub mod placement;

pub use events::{event_types, EventDispatcher, EventType, PointerEvent, PointerHandler};
pub use measure::{MeasureChange, MeasureGraph, MeasureId, MeasureUpdate, NodeId};
pub use placement::{Offset, Placement};

use thiserror::Error;

/// Errors raised by measures and the coordinate algebra
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MeasureError {
    /// NaN or an infinity was offered where a finite number is required
    #[error("{what} must be a finite number, got {value}")]
    NonFinite { what: &'static str, value: f32 },

    #[error("measure {0:?} does not exist in this graph")]
    UnknownMeasure(MeasureId),
}

pub type Result<T> = std::result::Result<T, MeasureError>;

/// Reject NaN and infinities with a typed error.
pub fn ensure_finite(what: &'static str, value: f32) -> Result<f32> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(MeasureError::NonFinite { what, value })
    }
}
