//! Node types and their builders
//!
//! Every node is a [`Placement`] plus a [`ShapeStyle`] plus one of a closed
//! set of kinds. Scene operations (`paint`, `move`, `hit_test`, `bounds`)
//! match exhaustively on [`NodeKind`], so no kind can be left without one.

use mesh2d_core::{MeasureId, NodeId, Offset, Placement};
use mesh2d_paint::{Color, CornerRadius, FontSpec, ImageSource};
use smallvec::SmallVec;

use crate::align::{AlignX, AlignY};
use crate::style::{BoxSize, Extent, ShapeStyle};
use crate::text::TextShape;

/// A dimensionless positioned point, usable as an alignment target
pub type Entity = Placement;

/// A node stored in a [`Scene`](crate::Scene)
#[derive(Debug)]
pub struct Node {
    pub(crate) placement: Placement,
    pub(crate) style: ShapeStyle,
    /// Container this node was inserted into. Not an ownership edge: the
    /// scene owns every node, the container only lists its children.
    pub(crate) owner: Option<NodeId>,
    pub(crate) in_layer: bool,
    /// Stamp of the last attachment, newer is larger
    pub(crate) attach_seq: u64,
    pub(crate) kind: NodeKind,
}

/// The closed set of node kinds
#[derive(Debug)]
pub enum NodeKind {
    Rect(BoxSize),
    Image { size: BoxSize, source: ImageSource },
    Text(TextShape),
    Container(ContainerShape),
}

impl Node {
    pub fn placement(&self) -> &Placement {
        &self.placement
    }

    pub fn style(&self) -> &ShapeStyle {
        &self.style
    }

    pub fn owner(&self) -> Option<NodeId> {
        self.owner
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn is_attached(&self) -> bool {
        self.owner.is_some() || self.in_layer
    }

    pub fn as_container(&self) -> Option<&ContainerShape> {
        match &self.kind {
            NodeKind::Container(container) => Some(container),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&TextShape> {
        match &self.kind {
            NodeKind::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn is_interactive(&self) -> bool {
        self.as_container().is_some_and(|c| c.interactive)
    }

    /// Every measure this node's geometry reads
    pub(crate) fn measures(&self) -> SmallVec<[MeasureId; 3]> {
        let mut measures = SmallVec::new();
        measures.push(self.placement.measure());
        let size = match &self.kind {
            NodeKind::Rect(size) => Some(size),
            NodeKind::Image { size, .. } => Some(size),
            NodeKind::Container(container) => Some(&container.size),
            NodeKind::Text(_) => None,
        };
        if let Some(size) = size {
            for extent in [size.width, size.height] {
                if let Some(id) = extent.measure() {
                    if !measures.contains(&id) {
                        measures.push(id);
                    }
                }
            }
        }
        measures
    }
}

/// A node owning an ordered list of children
#[derive(Debug, Clone, PartialEq)]
pub struct ContainerShape {
    pub(crate) size: BoxSize,
    /// Paint order: later children paint over earlier ones
    pub(crate) children: Vec<NodeId>,
    pub(crate) align_x: Option<AlignX>,
    pub(crate) align_y: Option<AlignY>,
    /// Paint only the container's own box and suppress its children
    pub(crate) show_bounds_only: bool,
    /// Takes part in pointer hit testing
    pub(crate) interactive: bool,
}

impl ContainerShape {
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn align_x(&self) -> Option<AlignX> {
        self.align_x
    }

    pub fn align_y(&self) -> Option<AlignY> {
        self.align_y
    }

    pub fn show_bounds_only(&self) -> bool {
        self.show_bounds_only
    }

    pub fn is_interactive(&self) -> bool {
        self.interactive
    }
}

/// Placement and style shared by every builder
#[derive(Clone, Debug, Default)]
pub struct CommonProps {
    pub(crate) measure: Option<MeasureId>,
    pub(crate) offset: Offset,
    pub(crate) style: ShapeStyle,
}

/// Builder methods every node builder shares
pub trait NodeBuilder: Sized {
    fn common_mut(&mut self) -> &mut CommonProps;

    /// Measure the node's measure-relative offsets are expressed in.
    /// Defaults to the scene's unit measure.
    fn measure(mut self, measure: MeasureId) -> Self {
        self.common_mut().measure = Some(measure);
        self
    }

    /// Starting offset, in measure units and pixels
    fn offset(mut self, offset: Offset) -> Self {
        self.common_mut().offset = offset;
        self
    }

    /// Starting offset in measure units only
    fn at_measure(self, measure_x: f32, measure_y: f32) -> Self {
        self.offset(Offset::measure(measure_x, measure_y))
    }

    /// Starting offset in pixels only
    fn at_pixels(self, x: f32, y: f32) -> Self {
        self.offset(Offset::pixels(x, y))
    }

    fn style(mut self, style: ShapeStyle) -> Self {
        self.common_mut().style = style;
        self
    }

    fn background(mut self, color: Color) -> Self {
        self.common_mut().style.background = color;
        self
    }

    fn fill(mut self, fill: bool) -> Self {
        self.common_mut().style.fill = fill;
        self
    }

    fn hidden(mut self, hidden: bool) -> Self {
        self.common_mut().style.hidden = hidden;
        self
    }

    fn z_index(mut self, z_index: i32) -> Self {
        self.common_mut().style.z_index = z_index;
        self
    }

    fn corner_radius(mut self, radius: impl Into<CornerRadius>) -> Self {
        self.common_mut().style.corner_radius = radius.into();
        self
    }
}

/// Builds a rectangle
#[derive(Clone, Debug)]
pub struct RectBuilder {
    pub(crate) common: CommonProps,
    pub(crate) size: BoxSize,
    pub(crate) line_width: Option<f32>,
}

impl RectBuilder {
    pub fn new(width: impl Into<Extent>, height: impl Into<Extent>) -> Self {
        Self {
            common: CommonProps::default(),
            size: BoxSize::new(width, height),
            line_width: None,
        }
    }

    /// Unfilled rectangle stroked with `width`
    pub fn stroke(mut self, width: f32) -> Self {
        self.common.style.fill = false;
        self.line_width = Some(width);
        self
    }
}

impl NodeBuilder for RectBuilder {
    fn common_mut(&mut self) -> &mut CommonProps {
        &mut self.common
    }
}

/// Builds an image
#[derive(Clone, Debug)]
pub struct ImageBuilder {
    pub(crate) common: CommonProps,
    pub(crate) size: BoxSize,
    pub(crate) source: ImageSource,
}

impl ImageBuilder {
    pub fn new(source: ImageSource, width: impl Into<Extent>, height: impl Into<Extent>) -> Self {
        Self {
            common: CommonProps::default(),
            size: BoxSize::new(width, height),
            source,
        }
    }
}

impl NodeBuilder for ImageBuilder {
    fn common_mut(&mut self) -> &mut CommonProps {
        &mut self.common
    }
}

/// Builds a text node
#[derive(Clone, Debug)]
pub struct TextBuilder {
    pub(crate) common: CommonProps,
    pub(crate) text: String,
    pub(crate) font: Option<FontSpec>,
    pub(crate) font_size: Option<f32>,
    pub(crate) color: Color,
    pub(crate) fixed_width: Option<f32>,
}

impl TextBuilder {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            common: CommonProps::default(),
            text: text.into(),
            font: None,
            font_size: None,
            color: Color::BLACK,
            fixed_width: None,
        }
    }

    /// Font to use instead of the scene default
    pub fn font(mut self, font: FontSpec) -> Self {
        self.font = Some(font);
        self
    }

    /// Override only the size of the font
    pub fn font_size(mut self, size: f32) -> Self {
        self.font_size = Some(size);
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Wrap the text at `width` instead of measuring it
    pub fn fixed_width(mut self, width: f32) -> Self {
        self.fixed_width = Some(width);
        self
    }
}

impl NodeBuilder for TextBuilder {
    fn common_mut(&mut self) -> &mut CommonProps {
        &mut self.common
    }
}

/// Builds a container, optionally interactive
#[derive(Clone, Debug)]
pub struct ContainerBuilder {
    pub(crate) common: CommonProps,
    pub(crate) size: BoxSize,
    pub(crate) align_x: Option<AlignX>,
    pub(crate) align_y: Option<AlignY>,
    pub(crate) show_bounds_only: bool,
    pub(crate) interactive: bool,
}

impl ContainerBuilder {
    /// An unfilled container with a pink debug background
    pub fn new(width: impl Into<Extent>, height: impl Into<Extent>) -> Self {
        Self {
            common: CommonProps {
                style: ShapeStyle::default()
                    .with_fill(false)
                    .with_background(Color::PINK),
                ..CommonProps::default()
            },
            size: BoxSize::new(width, height),
            align_x: None,
            align_y: None,
            show_bounds_only: false,
            interactive: false,
        }
    }

    /// A container that takes part in pointer dispatch
    pub fn interactive(width: impl Into<Extent>, height: impl Into<Extent>) -> Self {
        Self {
            interactive: true,
            ..Self::new(width, height)
        }
    }

    pub fn align_x(mut self, align: AlignX) -> Self {
        self.align_x = Some(align);
        self
    }

    pub fn align_y(mut self, align: AlignY) -> Self {
        self.align_y = Some(align);
        self
    }

    pub fn show_bounds_only(mut self, show: bool) -> Self {
        self.show_bounds_only = show;
        self
    }
}

impl NodeBuilder for ContainerBuilder {
    fn common_mut(&mut self) -> &mut CommonProps {
        &mut self.common
    }
}
