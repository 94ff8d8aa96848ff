//! Paint layers and scene rendering

use mesh2d_core::NodeId;
use mesh2d_paint::{DrawSurface, Point, Rect};

use crate::error::{LayoutError, Result};
use crate::node::{Node, NodeKind};
use crate::scene::Scene;

/// The three ordered layers a frame is painted from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PaintLayer {
    Back,
    Main,
    Front,
}

impl PaintLayer {
    /// Layers in paint order
    pub const ALL: [PaintLayer; 3] = [PaintLayer::Back, PaintLayer::Main, PaintLayer::Front];

    fn index(self) -> usize {
        match self {
            PaintLayer::Back => 0,
            PaintLayer::Main => 1,
            PaintLayer::Front => 2,
        }
    }
}

impl Scene {
    /// Register a top-level node on `layer`
    pub fn add_to_layer(&mut self, layer: PaintLayer, id: NodeId) -> Result<()> {
        let node = self.node(id)?;
        if node.is_attached() {
            return Err(LayoutError::AlreadyAttached(id));
        }
        let seq = self.stamp();
        let node = self
            .nodes
            .get_mut(id)
            .ok_or(LayoutError::UnknownNode(id))?;
        node.in_layer = true;
        node.attach_seq = seq;
        self.layers[layer.index()].push(id);
        Ok(())
    }

    pub fn layer(&self, layer: PaintLayer) -> &[NodeId] {
        &self.layers[layer.index()]
    }

    /// Clear `surface` and paint the back, main and front layers in order
    pub fn render(&self, surface: &mut dyn DrawSurface) -> Result<()> {
        surface.clear();
        for layer in PaintLayer::ALL {
            for &id in self.layer(layer) {
                self.paint_node(id, surface)?;
            }
        }
        Ok(())
    }

    /// Paint one node and, for containers, its subtree
    pub fn paint_node(&self, id: NodeId, surface: &mut dyn DrawSurface) -> Result<()> {
        let node = self.node(id)?;
        if node.style.hidden {
            return Ok(());
        }

        match &node.kind {
            NodeKind::Rect(_) => {
                paint_box(node, self.bounds(id)?, surface);
            }
            NodeKind::Image { source, .. } => {
                surface.draw_image(source, self.bounds(id)?);
            }
            NodeKind::Text(text) => {
                if !node.style.background.is_transparent() {
                    let background = Rect::new(
                        text.background.x(&self.measures)?,
                        text.background.y(&self.measures)?,
                        self.width(id)?,
                        self.height(id)?,
                    );
                    surface.fill_rect(background, node.style.corner_radius, node.style.background);
                }
                let origin = Point::new(self.x(id)?, self.y(id)?);
                surface.draw_text(&text.text, origin, &text.font, text.color);
            }
            NodeKind::Container(container) => {
                if container.show_bounds_only {
                    paint_box(node, self.bounds(id)?, surface);
                    return Ok(());
                }
                if node.style.fill {
                    paint_box(node, self.bounds(id)?, surface);
                }
                for &child in &container.children {
                    self.paint_node(child, surface)?;
                }
            }
        }
        Ok(())
    }
}

/// Fill or stroke a node's box in its background color
fn paint_box(node: &Node, rect: Rect, surface: &mut dyn DrawSurface) {
    let style = &node.style;
    if style.fill {
        surface.fill_rect(rect, style.corner_radius, style.background);
    } else {
        surface.stroke_rect(rect, style.corner_radius, style.background, style.line_width());
    }
}
