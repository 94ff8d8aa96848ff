//! The scene: owner of every node and measure
//!
//! Nodes live in an arena and refer to each other by [`NodeId`]. Containers
//! list their children; children point back at their owner with a plain id,
//! so the only ownership edge is scene -> node and dropping the scene drops
//! everything at once.
//!
//! Measure changes go through [`Scene::set_measure`], which updates the
//! measure graph and then re-runs alignment in every container that owns a
//! dependent node, once per container, before returning.

use indexmap::IndexSet;
use mesh2d_core::{EventDispatcher, MeasureGraph, MeasureId, NodeId, Offset, Placement};
use mesh2d_paint::Rect;
use slotmap::SlotMap;

use crate::align::{self, AlignTarget, AlignX, AlignY, Span};
use crate::config::SceneConfig;
use crate::error::{non_negative, positive, LayoutError, Result};
use crate::node::{
    CommonProps, ContainerBuilder, ContainerShape, ImageBuilder, Node, NodeKind, RectBuilder,
    TextBuilder,
};
use crate::style::ShapeStyle;
use crate::text::{MonospaceMetrics, TextMetrics, TextShape};

/// How [`Scene::insert_children`] places the new children in the list
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InsertOptions {
    /// Reverse the input list before inserting
    pub reverse: bool,
    /// Insert each child at the front instead of the back
    pub prepend: bool,
}

impl InsertOptions {
    pub fn append() -> Self {
        Self::default()
    }

    pub fn prepend() -> Self {
        Self {
            prepend: true,
            ..Self::default()
        }
    }

    pub fn reversed(mut self) -> Self {
        self.reverse = true;
        self
    }
}

/// A retained tree of positioned nodes
pub struct Scene {
    pub(crate) config: SceneConfig,
    pub(crate) measures: MeasureGraph,
    unit: MeasureId,
    pub(crate) nodes: SlotMap<NodeId, Node>,
    pub(crate) layers: [Vec<NodeId>; 3],
    pub(crate) metrics: Box<dyn TextMetrics>,
    pub(crate) events: EventDispatcher,
    pub(crate) hovered: Option<NodeId>,
    next_seq: u64,
}

impl Scene {
    pub fn new() -> Self {
        let config = SceneConfig::default();
        let mut measures = MeasureGraph::new();
        let unit = measures.create_unit();
        Self {
            metrics: Box::new(MonospaceMetrics::new(config.glyph_advance)),
            config,
            measures,
            unit,
            nodes: SlotMap::with_key(),
            layers: Default::default(),
            events: EventDispatcher::new(),
            hovered: None,
            next_seq: 0,
        }
    }

    /// Build a scene from a validated configuration
    pub fn with_config(config: SceneConfig) -> Result<Self> {
        config.validate()?;
        let mut scene = Self::new();
        scene.measures = MeasureGraph::new();
        scene.unit = scene.measures.create(config.unit_measure)?;
        scene.metrics = Box::new(MonospaceMetrics::new(config.glyph_advance));
        scene.config = config;
        Ok(scene)
    }

    /// Replace the text metrics provider
    pub fn with_metrics(mut self, metrics: impl TextMetrics + 'static) -> Self {
        self.metrics = Box::new(metrics);
        self
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// The drawing surface as an alignment target
    pub fn surface(&self) -> AlignTarget {
        AlignTarget::Surface {
            width: self.config.surface.width,
            height: self.config.surface.height,
        }
    }

    /// Resize the surface target. Both sides are checked before either is
    /// stored, so a rejected call keeps the previous size.
    pub fn set_surface_size(&mut self, width: f32, height: f32) -> Result<()> {
        let checked = non_negative("surface.width", width)
            .and_then(|width| Ok((width, non_negative("surface.height", height)?)));
        match checked {
            Ok((width, height)) => {
                self.config.surface.width = width;
                self.config.surface.height = height;
                Ok(())
            }
            Err(err) => {
                tracing::warn!(width, height, "rejected surface size; keeping previous size");
                Err(err)
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Measures
    // ─────────────────────────────────────────────────────────────────────

    /// The measure nodes use when their builder names none
    pub fn unit_measure(&self) -> MeasureId {
        self.unit
    }

    pub fn measures(&self) -> &MeasureGraph {
        &self.measures
    }

    pub fn create_measure(&mut self, value: f32) -> Result<MeasureId> {
        Ok(self.measures.create(value)?)
    }

    pub fn derive_measure<F>(&mut self, base: MeasureId, derive: F) -> Result<MeasureId>
    where
        F: Fn(f32) -> f32 + 'static,
    {
        Ok(self.measures.derive(base, derive)?)
    }

    pub fn measure(&self, id: MeasureId) -> Result<f32> {
        Ok(self.measures.value(id)?)
    }

    pub fn subscribe_measure<F>(&mut self, id: MeasureId, callback: F) -> Result<()>
    where
        F: FnMut(f32, f32) + 'static,
    {
        Ok(self.measures.subscribe(id, callback)?)
    }

    /// Make `node`'s owner re-layout whenever `measure` changes
    pub fn add_dependent(&mut self, measure: MeasureId, node: NodeId) -> Result<bool> {
        self.node(node)?;
        Ok(self.measures.add_dependent(measure, node)?)
    }

    /// Change a measure and re-layout every affected container.
    ///
    /// Returns the containers that were relaid out, each exactly once, in
    /// the order their first dependent was registered.
    pub fn set_measure(&mut self, id: MeasureId, value: f32) -> Result<Vec<NodeId>> {
        let update = self.measures.set(id, value)?;

        let owners: IndexSet<NodeId> = update
            .dependents
            .iter()
            .filter_map(|&node| self.nodes.get(node).and_then(|n| n.owner))
            .collect();

        for &owner in &owners {
            self.relayout_children(owner)?;
        }

        tracing::debug!(
            measure = ?id,
            value,
            changed = update.changes.len(),
            relaid_out = owners.len(),
            "measure update propagated"
        );
        Ok(owners.into_iter().collect())
    }

    // ─────────────────────────────────────────────────────────────────────
    // Nodes
    // ─────────────────────────────────────────────────────────────────────

    pub fn add_rect(&mut self, builder: RectBuilder) -> Result<NodeId> {
        let RectBuilder {
            common,
            size,
            line_width,
        } = builder;
        let size = crate::style::BoxSize {
            width: size.width.validate("width", &self.measures)?,
            height: size.height.validate("height", &self.measures)?,
        };
        let (placement, mut style) = self.resolve_common(common)?;
        if let Some(width) = line_width {
            style.set_line_width(width)?;
        }
        Ok(self.insert_node(placement, style, NodeKind::Rect(size)))
    }

    pub fn add_image(&mut self, builder: ImageBuilder) -> Result<NodeId> {
        let ImageBuilder {
            common,
            size,
            source,
        } = builder;
        let size = crate::style::BoxSize {
            width: size.width.validate("width", &self.measures)?,
            height: size.height.validate("height", &self.measures)?,
        };
        let (placement, style) = self.resolve_common(common)?;
        Ok(self.insert_node(placement, style, NodeKind::Image { size, source }))
    }

    /// Add a text node.
    ///
    /// The node starts with the same baseline correction a font size change
    /// from 0 would apply, so its box hangs below its starting offset.
    pub fn add_text(&mut self, builder: TextBuilder) -> Result<NodeId> {
        let TextBuilder {
            common,
            text,
            font,
            font_size,
            color,
            fixed_width,
        } = builder;

        let mut font = font.unwrap_or_else(|| self.config.default_font.clone());
        if let Some(size) = font_size {
            font.size = size;
        }
        positive("font_size", font.size)?;
        if let Some(width) = fixed_width {
            positive("text width", width)?;
        }

        let (mut placement, style) = self.resolve_common(common)?;
        let shape = TextShape {
            text,
            font,
            color,
            fixed_width,
            background: placement,
        };
        let correction =
            shape.baseline_correction(self.metrics.as_ref(), 0.0, shape.font.size, self.config.text_pad);
        placement.translate(Offset::pixels(0.0, correction))?;

        Ok(self.insert_node(placement, style, NodeKind::Text(shape)))
    }

    /// Add a container, interactive or not
    pub fn add_container(&mut self, builder: ContainerBuilder) -> Result<NodeId> {
        let ContainerBuilder {
            common,
            size,
            align_x,
            align_y,
            show_bounds_only,
            interactive,
        } = builder;
        let size = crate::style::BoxSize {
            width: size.width.validate("width", &self.measures)?,
            height: size.height.validate("height", &self.measures)?,
        };
        let (placement, style) = self.resolve_common(common)?;
        let shape = ContainerShape {
            size,
            children: Vec::new(),
            align_x,
            align_y,
            show_bounds_only,
            interactive,
        };
        Ok(self.insert_node(placement, style, NodeKind::Container(shape)))
    }

    /// Add a container that takes part in pointer dispatch
    pub fn add_interactive(&mut self, builder: ContainerBuilder) -> Result<NodeId> {
        self.add_container(ContainerBuilder {
            interactive: true,
            ..builder
        })
    }

    fn resolve_common(&self, common: CommonProps) -> Result<(Placement, ShapeStyle)> {
        let measure = common.measure.unwrap_or(self.unit);
        self.measures.value(measure)?;
        let placement = Placement::at(measure, common.offset)?;
        non_negative("line_width", common.style.line_width())?;
        Ok((placement, common.style))
    }

    fn insert_node(&mut self, placement: Placement, style: ShapeStyle, kind: NodeKind) -> NodeId {
        let attach_seq = self.stamp();
        self.nodes.insert(Node {
            placement,
            style,
            owner: None,
            in_layer: false,
            attach_seq,
            kind,
        })
    }

    pub(crate) fn stamp(&mut self) -> u64 {
        self.next_seq += 1;
        self.next_seq
    }

    pub fn node(&self, id: NodeId) -> Result<&Node> {
        self.nodes.get(id).ok_or(LayoutError::UnknownNode(id))
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        self.nodes.get_mut(id).ok_or(LayoutError::UnknownNode(id))
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // ─────────────────────────────────────────────────────────────────────
    // Geometry
    // ─────────────────────────────────────────────────────────────────────

    /// Absolute X in pixels, computed from the current measure value
    pub fn x(&self, id: NodeId) -> Result<f32> {
        Ok(self.node(id)?.placement.x(&self.measures)?)
    }

    /// Absolute Y in pixels, computed from the current measure value
    pub fn y(&self, id: NodeId) -> Result<f32> {
        Ok(self.node(id)?.placement.y(&self.measures)?)
    }

    pub fn width(&self, id: NodeId) -> Result<f32> {
        match &self.node(id)?.kind {
            NodeKind::Rect(size) | NodeKind::Image { size, .. } => {
                size.width.resolve(&self.measures)
            }
            NodeKind::Container(container) => container.size.width.resolve(&self.measures),
            NodeKind::Text(text) => Ok(text.width(self.metrics.as_ref())),
        }
    }

    pub fn height(&self, id: NodeId) -> Result<f32> {
        match &self.node(id)?.kind {
            NodeKind::Rect(size) | NodeKind::Image { size, .. } => {
                size.height.resolve(&self.measures)
            }
            NodeKind::Container(container) => container.size.height.resolve(&self.measures),
            NodeKind::Text(text) => Ok(text.height(self.metrics.as_ref())),
        }
    }

    /// `left = x`, `right = x + width`, `top = y`, `bottom = y + height`
    pub fn bounds(&self, id: NodeId) -> Result<Rect> {
        Ok(Rect::new(
            self.x(id)?,
            self.y(id)?,
            self.width(id)?,
            self.height(id)?,
        ))
    }

    /// Translate a node by `delta`.
    ///
    /// Moves are additive and are the only way to reposition a node.
    /// Containers carry their whole subtree along rigidly, and text nodes
    /// carry their background rectangle.
    pub fn move_node(&mut self, id: NodeId, delta: Offset) -> Result<()> {
        let delta = match delta.validate() {
            Ok(delta) => delta,
            Err(err) => {
                tracing::warn!(node = ?id, ?delta, "rejected move; keeping previous offset");
                return Err(err.into());
            }
        };
        self.node(id)?;

        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let Some(node) = self.nodes.get_mut(current) else {
                continue;
            };
            node.placement.translate(delta)?;
            match &mut node.kind {
                NodeKind::Text(text) => text.background.translate(delta)?,
                NodeKind::Container(container) => stack.extend(container.children.iter().copied()),
                NodeKind::Rect(_) | NodeKind::Image { .. } => {}
            }
        }

        tracing::trace!(node = ?id, ?delta, "moved");
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────
    // Style and text
    // ─────────────────────────────────────────────────────────────────────

    pub fn style_mut(&mut self, id: NodeId) -> Result<&mut ShapeStyle> {
        Ok(&mut self.node_mut(id)?.style)
    }

    pub fn set_line_width(&mut self, id: NodeId, width: f32) -> Result<()> {
        self.style_mut(id)?.set_line_width(width)
    }

    pub fn text(&self, id: NodeId) -> Result<&TextShape> {
        self.node(id)?.as_text().ok_or(LayoutError::NotText(id))
    }

    fn text_node_mut(&mut self, id: NodeId) -> Result<(&mut Placement, &mut TextShape)> {
        let node = self.nodes.get_mut(id).ok_or(LayoutError::UnknownNode(id))?;
        match &mut node.kind {
            NodeKind::Text(text) => Ok((&mut node.placement, text)),
            _ => Err(LayoutError::NotText(id)),
        }
    }

    /// Change the font size, shifting the pixel Y offset so the text's
    /// visual top stays where it was.
    pub fn set_font_size(&mut self, id: NodeId, size: f32) -> Result<()> {
        if let Err(err) = positive("font_size", size) {
            tracing::warn!(node = ?id, size, "rejected font size; keeping previous size");
            return Err(err);
        }
        let pad = self.config.text_pad;
        let metrics = self.metrics.as_ref();
        let node = self.nodes.get_mut(id).ok_or(LayoutError::UnknownNode(id))?;
        let NodeKind::Text(text) = &mut node.kind else {
            return Err(LayoutError::NotText(id));
        };

        let old_size = text.font.size;
        let correction = text.baseline_correction(metrics, old_size, size, pad);
        node.placement.translate(Offset::pixels(0.0, correction))?;
        text.font.size = size;

        tracing::trace!(node = ?id, old_size, size, correction, "font size changed");
        Ok(())
    }

    pub fn set_text(&mut self, id: NodeId, content: impl Into<String>) -> Result<()> {
        let (_, text) = self.text_node_mut(id)?;
        text.text = content.into();
        Ok(())
    }

    /// Fix the wrap width, or go back to the measured width with `None`
    pub fn set_text_width(&mut self, id: NodeId, width: Option<f32>) -> Result<()> {
        if let Some(width) = width {
            if let Err(err) = positive("text width", width) {
                tracing::warn!(node = ?id, width, "rejected text width; keeping previous width");
                return Err(err);
            }
        }
        let (_, text) = self.text_node_mut(id)?;
        text.fixed_width = width;
        Ok(())
    }

    pub fn set_text_color(&mut self, id: NodeId, color: mesh2d_paint::Color) -> Result<()> {
        let (_, text) = self.text_node_mut(id)?;
        text.color = color;
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────
    // Alignment
    // ─────────────────────────────────────────────────────────────────────

    /// Move `id` horizontally so it sits at `direction` within `target`
    pub fn align_x(&mut self, id: NodeId, direction: AlignX, target: AlignTarget) -> Result<()> {
        let (span, _) = self.resolve_target(target)?;
        let dx = align::delta_x(direction, self.bounds(id)?, span);
        if dx == 0.0 {
            return Ok(());
        }
        self.move_node(id, Offset::pixels(dx, 0.0))
    }

    /// Move `id` vertically so it sits at `direction` within `target`.
    ///
    /// Text nodes are biased down by their font size, since they are
    /// anchored at their baseline.
    pub fn align_y(&mut self, id: NodeId, direction: AlignY, target: AlignTarget) -> Result<()> {
        let (_, span) = self.resolve_target(target)?;
        let node = self.node(id)?;
        let bias = node.as_text().map_or(0.0, |text| text.font.size);
        let dy = align::delta_y(direction, self.bounds(id)?, span, bias);
        if dy == 0.0 {
            return Ok(());
        }
        self.move_node(id, Offset::pixels(0.0, dy))
    }

    fn resolve_target(&self, target: AlignTarget) -> Result<(Span, Span)> {
        match target {
            AlignTarget::Surface { width, height } => {
                Ok((Span::new(0.0, width), Span::new(0.0, height)))
            }
            AlignTarget::Node(target_id) => match self.bounds(target_id) {
                Ok(rect) => Ok((
                    Span::new(rect.x, rect.width),
                    Span::new(rect.y, rect.height),
                )),
                Err(err) => {
                    tracing::warn!(target = ?target_id, %err, "invalid alignment target");
                    Err(LayoutError::InvalidAlignTarget(target_id))
                }
            },
            AlignTarget::Entity(point) => Ok((
                Span::new(point.x(&self.measures)?, 0.0),
                Span::new(point.y(&self.measures)?, 0.0),
            )),
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Containers
    // ─────────────────────────────────────────────────────────────────────

    pub fn container(&self, id: NodeId) -> Result<&ContainerShape> {
        self.node(id)?
            .as_container()
            .ok_or(LayoutError::NotAContainer(id))
    }

    fn container_mut(&mut self, id: NodeId) -> Result<&mut ContainerShape> {
        match &mut self.node_mut(id)?.kind {
            NodeKind::Container(container) => Ok(container),
            _ => Err(LayoutError::NotAContainer(id)),
        }
    }

    pub fn children(&self, id: NodeId) -> Result<&[NodeId]> {
        Ok(self.container(id)?.children())
    }

    pub fn owner(&self, id: NodeId) -> Result<Option<NodeId>> {
        Ok(self.node(id)?.owner)
    }

    /// Change a container's alignment directives and realign its children
    pub fn set_alignment(
        &mut self,
        id: NodeId,
        align_x: Option<AlignX>,
        align_y: Option<AlignY>,
    ) -> Result<()> {
        let container = self.container_mut(id)?;
        container.align_x = align_x;
        container.align_y = align_y;
        self.relayout_children(id)
    }

    pub fn set_show_bounds_only(&mut self, id: NodeId, show: bool) -> Result<()> {
        self.container_mut(id)?.show_bounds_only = show;
        Ok(())
    }

    /// Attach `children` to `container`.
    ///
    /// The list is validated as a whole first: every child must exist, be
    /// unattached, appear once, and not be the container or one of its
    /// ancestors. Then, child by child in (possibly reversed) list order,
    /// the child is translated into the container's frame, aligned on every
    /// axis with a directive, and appended (or prepended). Each child is
    /// registered as a dependent of the measures its own geometry and the
    /// container's geometry read, so later measure changes realign it.
    pub fn insert_children(
        &mut self,
        container: NodeId,
        children: &[NodeId],
        options: InsertOptions,
    ) -> Result<()> {
        let (align_x, align_y) = {
            let shape = self.container(container)?;
            (shape.align_x, shape.align_y)
        };
        let container_node = self.node(container)?;
        let container_placement = container_node.placement;
        let container_measures = container_node.measures();

        for (i, &child) in children.iter().enumerate() {
            let node = self.node(child)?;
            if child == container || self.is_ancestor(child, container) {
                return Err(LayoutError::WouldCycle { container, child });
            }
            if node.is_attached() || children[..i].contains(&child) {
                return Err(LayoutError::AlreadyAttached(child));
            }
        }

        let origin = Offset::pixels(self.x(container)?, self.y(container)?);
        let mut ordered = children.to_vec();
        if options.reverse {
            ordered.reverse();
        }

        for child in ordered {
            let shares_measure = self.node(child)?.placement.measure() == container_placement.measure();
            let relative = if shares_measure {
                container_placement.offset()
            } else {
                origin
            };
            self.move_node(child, relative)?;

            let seq = self.stamp();
            let node = self.node_mut(child)?;
            node.owner = Some(container);
            node.attach_seq = seq;
            let child_measures = node.measures();

            if let Some(direction) = align_x {
                self.align_x(child, direction, AlignTarget::Node(container))?;
            }
            if let Some(direction) = align_y {
                self.align_y(child, direction, AlignTarget::Node(container))?;
            }

            let shape = self.container_mut(container)?;
            if options.prepend {
                shape.children.insert(0, child);
            } else {
                shape.children.push(child);
            }

            for &measure in child_measures.iter().chain(container_measures.iter()) {
                self.measures.add_dependent(measure, child)?;
            }
        }

        tracing::debug!(
            container = ?container,
            inserted = children.len(),
            reverse = options.reverse,
            prepend = options.prepend,
            "inserted children"
        );
        Ok(())
    }

    /// Re-apply the container's alignment directives to every child against
    /// its current bounds. Children of a container without directives are
    /// left untouched.
    pub fn relayout_children(&mut self, container: NodeId) -> Result<()> {
        let shape = self.container(container)?;
        let (align_x, align_y) = (shape.align_x, shape.align_y);
        if align_x.is_none() && align_y.is_none() {
            return Ok(());
        }
        let children = shape.children.clone();

        for &child in &children {
            if let Some(direction) = align_x {
                self.align_x(child, direction, AlignTarget::Node(container))?;
            }
            if let Some(direction) = align_y {
                self.align_y(child, direction, AlignTarget::Node(container))?;
            }
        }

        tracing::debug!(container = ?container, children = children.len(), "relaid out children");
        Ok(())
    }

    /// Whether `candidate` is `node` or one of its owners
    fn is_ancestor(&self, candidate: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == candidate {
                return true;
            }
            current = self.nodes.get(id).and_then(|n| n.owner);
        }
        false
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
