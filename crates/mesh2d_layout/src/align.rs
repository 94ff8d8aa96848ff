//! Alignment of a node against a container-like target
//!
//! Alignment never assigns coordinates. It computes the single pixel delta
//! that puts the node at the requested position and applies it as a move,
//! so a node's measure-relative offset survives and keeps tracking later
//! measure changes.

use mesh2d_core::{NodeId, Placement};
use mesh2d_paint::{DrawSurface, Rect};

/// Horizontal alignment directive
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AlignX {
    /// `node.left == target.left`
    Left,
    /// Node centered in the target's horizontal span
    Center,
    /// `node.right == target.right`
    Right,
}

/// Vertical alignment directive
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AlignY {
    Top,
    Center,
    Bottom,
}

/// What a node can be aligned against
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AlignTarget {
    /// The drawing surface: origin 0, extent = surface size
    Surface { width: f32, height: f32 },
    /// Another node: origin = node position, extent = node size
    Node(NodeId),
    /// A dimensionless point: origin = point position, extent 0
    Entity(Placement),
}

impl AlignTarget {
    pub fn surface(surface: &dyn DrawSurface) -> Self {
        AlignTarget::Surface {
            width: surface.width(),
            height: surface.height(),
        }
    }
}

/// A target's origin and extent along one axis
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Span {
    pub origin: f32,
    pub extent: f32,
}

impl Span {
    pub const fn new(origin: f32, extent: f32) -> Self {
        Self { origin, extent }
    }
}

/// Pixel delta along X that realizes `direction` for a node with `bounds`
pub fn delta_x(direction: AlignX, bounds: Rect, target: Span) -> f32 {
    match direction {
        AlignX::Left => target.origin - bounds.x,
        AlignX::Center => (target.extent - bounds.width) / 2.0 - (bounds.x - target.origin),
        AlignX::Right => (target.extent - bounds.width) + (target.origin - bounds.x),
    }
}

/// Pixel delta along Y that realizes `direction`.
///
/// `bias` is added as-is; text nodes pass their font size because they are
/// painted from the baseline rather than the top of their box.
pub fn delta_y(direction: AlignY, bounds: Rect, target: Span, bias: f32) -> f32 {
    let delta = match direction {
        AlignY::Top => target.origin - bounds.y,
        AlignY::Center => (target.extent - bounds.height) / 2.0 - (bounds.y - target.origin),
        AlignY::Bottom => (target.extent - bounds.height) + (target.origin - bounds.y),
    };
    delta + bias
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delta_x() {
        let child = Rect::new(7.0, 0.0, 20.0, 10.0);
        let container = Span::new(0.0, 100.0);

        assert_eq!(7.0 + delta_x(AlignX::Left, child, container), 0.0);
        assert_eq!(7.0 + delta_x(AlignX::Center, child, container), 40.0);
        assert_eq!(7.0 + delta_x(AlignX::Right, child, container) + 20.0, 100.0);
    }

    #[test]
    fn test_delta_y_with_offset_container_and_bias() {
        let child = Rect::new(0.0, 3.0, 10.0, 16.0);
        let container = Span::new(50.0, 40.0);

        assert_eq!(3.0 + delta_y(AlignY::Top, child, container, 0.0), 50.0);
        assert_eq!(3.0 + delta_y(AlignY::Center, child, container, 0.0), 62.0);
        assert_eq!(3.0 + delta_y(AlignY::Bottom, child, container, 0.0), 74.0);
        assert_eq!(3.0 + delta_y(AlignY::Top, child, container, 16.0), 66.0);
    }

    #[test]
    fn test_point_target_has_no_extent() {
        let child = Rect::new(0.0, 0.0, 20.0, 20.0);
        let point = Span::new(30.0, 0.0);
        // Centered on a point means straddling it
        assert_eq!(delta_x(AlignX::Center, child, point), 20.0);
        assert_eq!(delta_x(AlignX::Right, child, point), 10.0);
    }

    #[test]
    fn test_alignment_is_idempotent() {
        let container = Span::new(10.0, 90.0);
        let mut child = Rect::new(-4.0, 0.0, 30.0, 5.0);
        for direction in [AlignX::Left, AlignX::Center, AlignX::Right] {
            child.x += delta_x(direction, child, container);
            assert_eq!(delta_x(direction, child, container), 0.0);
        }
    }
}
