//! mesh2d Layout Engine
//!
//! Retained-mode 2D layout over measure-relative coordinates. A [`Scene`]
//! owns every node and measure; changing a measure through
//! [`Scene::set_measure`] repositions every node that reads it and realigns
//! the children of every container that depends on it before returning.
//!
//! # Example
//!
//! ```rust
//! use mesh2d_core::Offset;
//! use mesh2d_layout::{AlignX, ContainerBuilder, InsertOptions, NodeBuilder, RectBuilder, Scene};
//!
//! let mut scene = Scene::new();
//! let scale = scene.create_measure(1.0).unwrap();
//!
//! let container = scene
//!     .add_container(ContainerBuilder::new(100.0, 40.0).align_x(AlignX::Center))
//!     .unwrap();
//! let rect = scene
//!     .add_rect(RectBuilder::new(20.0, 10.0).measure(scale))
//!     .unwrap();
//! scene
//!     .insert_children(container, &[rect], InsertOptions::append())
//!     .unwrap();
//! assert_eq!(scene.x(rect).unwrap(), 40.0);
//!
//! scene.move_node(rect, Offset::measure(3.0, 0.0)).unwrap();
//! scene.set_measure(scale, 2.0).unwrap();
//! assert_eq!(scene.x(rect).unwrap(), 40.0);
//! ```

pub mod align;
pub mod config;
pub mod error;
pub mod interactive;
pub mod node;
pub mod render;
pub mod scene;
pub mod style;
pub mod text;

pub use align::{AlignTarget, AlignX, AlignY};
pub use config::{SceneConfig, SurfaceConfig};
pub use error::{LayoutError, Result};
pub use node::{
    ContainerBuilder, ContainerShape, Entity, ImageBuilder, Node, NodeBuilder, NodeKind,
    RectBuilder, TextBuilder,
};
pub use render::PaintLayer;
pub use scene::{InsertOptions, Scene};
pub use style::{BoxSize, Extent, ShapeStyle};
pub use text::{MonospaceMetrics, TextMetrics, TextShape};

pub use mesh2d_core::{MeasureId, NodeId, Offset, PointerEvent};
