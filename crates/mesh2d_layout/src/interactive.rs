//! Hit testing and pointer dispatch for interactive containers
//!
//! On each pointer event every interactive node across the paint layers
//! whose bounds contain the point is a candidate. Candidates are ordered by
//! descending `z_index`, ties going to the most recently attached node, and
//! only the topmost receives the event.

use std::cmp::Reverse;

use mesh2d_core::{event_types, EventType, NodeId, PointerEvent};
use mesh2d_paint::Point;

use crate::error::{LayoutError, Result};
use crate::node::NodeKind;
use crate::render::PaintLayer;
use crate::scene::Scene;

impl Scene {
    /// Inclusive bounding-box test: `left <= px <= right` and
    /// `top <= py <= bottom`
    pub fn hit_test(&self, id: NodeId, px: f32, py: f32) -> Result<bool> {
        Ok(self.bounds(id)?.contains(Point::new(px, py)))
    }

    /// Install the callback for `event_type` on an interactive node,
    /// replacing any previous one
    pub fn set_handler<F>(&mut self, id: NodeId, event_type: EventType, handler: F) -> Result<()>
    where
        F: FnMut(&PointerEvent) + 'static,
    {
        if !self.node(id)?.is_interactive() {
            return Err(LayoutError::NotInteractive(id));
        }
        self.events.set(id, event_type, handler);
        Ok(())
    }

    /// Remove the callback for `event_type`; returns whether one was installed
    pub fn clear_handler(&mut self, id: NodeId, event_type: EventType) -> bool {
        self.events.clear(id, event_type)
    }

    /// The interactive node currently under the pointer, as of the last
    /// move event
    pub fn hovered(&self) -> Option<NodeId> {
        self.hovered
    }

    /// Every visible interactive node containing the point, topmost first.
    ///
    /// Children of bounds-only containers are not painted and are skipped.
    pub fn hits_at(&self, px: f32, py: f32) -> Result<Vec<NodeId>> {
        let mut hits = Vec::new();
        let mut stack: Vec<NodeId> = PaintLayer::ALL
            .iter()
            .flat_map(|&layer| self.layer(layer).iter().copied())
            .collect();

        while let Some(id) = stack.pop() {
            let node = self.node(id)?;
            if node.style.hidden {
                continue;
            }
            if let NodeKind::Container(container) = &node.kind {
                if !container.show_bounds_only {
                    stack.extend(container.children.iter().copied());
                }
                if container.interactive && self.hit_test(id, px, py)? {
                    hits.push((id, node.style.z_index, node.attach_seq));
                }
            }
        }

        hits.sort_by_key(|&(_, z_index, seq)| Reverse((z_index, seq)));
        Ok(hits.into_iter().map(|(id, _, _)| id).collect())
    }

    /// Deliver a pointer event to the topmost interactive node under it.
    ///
    /// Move events also track hover: when the topmost node changes, the
    /// previous one receives `POINTER_LEAVE` and the new one
    /// `POINTER_ENTER` before the move itself is delivered.
    ///
    /// Returns the node the event was routed to, if any.
    pub fn dispatch_pointer(&mut self, event: PointerEvent) -> Result<Option<NodeId>> {
        let target = self.hits_at(event.x, event.y)?.first().copied();

        if event.event_type == event_types::POINTER_MOVE && target != self.hovered {
            if let Some(previous) = self.hovered.take() {
                if self.nodes.contains_key(previous) {
                    let leave = event.with_type(event_types::POINTER_LEAVE);
                    self.events.dispatch(previous, &leave);
                }
            }
            if let Some(entered) = target {
                let enter = event.with_type(event_types::POINTER_ENTER);
                self.events.dispatch(entered, &enter);
            }
            self.hovered = target;
        }

        match target {
            Some(id) => {
                let handled = self.events.dispatch(id, &event);
                tracing::debug!(
                    node = ?id,
                    event_type = event.event_type,
                    x = event.x,
                    y = event.y,
                    handled,
                    "pointer event dispatched"
                );
            }
            None => {
                tracing::debug!(x = event.x, y = event.y, "pointer event hit nothing");
            }
        }
        Ok(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{ContainerBuilder, NodeBuilder};
    use crate::scene::InsertOptions;
    use std::cell::RefCell;
    use std::rc::Rc;

    type EventLog = Rc<RefCell<Vec<(&'static str, EventType)>>>;

    fn record(log: &EventLog, name: &'static str) -> impl FnMut(&PointerEvent) {
        let log = Rc::clone(log);
        move |event: &PointerEvent| log.borrow_mut().push((name, event.event_type))
    }

    #[test]
    fn test_hit_test_is_inclusive() {
        let mut scene = Scene::new();
        let n = scene
            .add_interactive(ContainerBuilder::new(10.0, 10.0).at_pixels(10.0, 10.0))
            .unwrap();

        assert!(scene.hit_test(n, 10.0, 10.0).unwrap());
        assert!(scene.hit_test(n, 20.0, 20.0).unwrap());
        assert!(!scene.hit_test(n, 21.0, 15.0).unwrap());
    }

    #[test]
    fn test_handler_requires_interactive_node() {
        let mut scene = Scene::new();
        let plain = scene.add_container(ContainerBuilder::new(1.0, 1.0)).unwrap();
        let err = scene
            .set_handler(plain, event_types::CLICK, |_| {})
            .unwrap_err();
        assert!(matches!(err, LayoutError::NotInteractive(_)));
    }

    #[test]
    fn test_higher_z_wins_then_newest() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut scene = Scene::new();
        let low = scene
            .add_interactive(ContainerBuilder::new(50.0, 50.0).z_index(1))
            .unwrap();
        let high = scene
            .add_interactive(ContainerBuilder::new(50.0, 50.0).z_index(5))
            .unwrap();
        let peer = scene
            .add_interactive(ContainerBuilder::new(50.0, 50.0).z_index(5))
            .unwrap();
        for (id, name) in [(low, "low"), (high, "high"), (peer, "peer")] {
            scene.set_handler(id, event_types::CLICK, record(&log, name)).unwrap();
        }
        scene.add_to_layer(PaintLayer::Main, low).unwrap();
        scene.add_to_layer(PaintLayer::Main, peer).unwrap();
        scene.add_to_layer(PaintLayer::Back, high).unwrap();

        // `high` joined a layer last, so it wins the tie with `peer`
        let target = scene.dispatch_pointer(PointerEvent::click(5.0, 5.0)).unwrap();
        assert_eq!(target, Some(high));
        assert_eq!(log.borrow().as_slice(), &[("high", event_types::CLICK)]);
    }

    #[test]
    fn test_hidden_and_nested_nodes() {
        let mut scene = Scene::new();
        let outer = scene
            .add_interactive(ContainerBuilder::new(100.0, 100.0))
            .unwrap();
        let inner = scene
            .add_interactive(ContainerBuilder::new(10.0, 10.0).z_index(2))
            .unwrap();
        scene.insert_children(outer, &[inner], InsertOptions::append()).unwrap();
        scene.add_to_layer(PaintLayer::Main, outer).unwrap();

        assert_eq!(scene.hits_at(5.0, 5.0).unwrap(), vec![inner, outer]);

        scene.style_mut(inner).unwrap().hidden = true;
        assert_eq!(scene.hits_at(5.0, 5.0).unwrap(), vec![outer]);

        scene.style_mut(outer).unwrap().hidden = true;
        assert!(scene.hits_at(5.0, 5.0).unwrap().is_empty());
    }

    #[test]
    fn test_bounds_only_container_hides_children_from_hits() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut scene = Scene::new();
        let outer = scene
            .add_interactive(ContainerBuilder::new(100.0, 100.0))
            .unwrap();
        let inner = scene
            .add_interactive(ContainerBuilder::new(10.0, 10.0).z_index(2))
            .unwrap();
        scene.insert_children(outer, &[inner], InsertOptions::append()).unwrap();
        scene.add_to_layer(PaintLayer::Main, outer).unwrap();
        scene.set_handler(inner, event_types::CLICK, record(&log, "inner")).unwrap();
        scene.set_handler(outer, event_types::CLICK, record(&log, "outer")).unwrap();

        scene.set_show_bounds_only(outer, true).unwrap();
        assert_eq!(scene.hits_at(5.0, 5.0).unwrap(), vec![outer]);
        assert_eq!(
            scene.dispatch_pointer(PointerEvent::click(5.0, 5.0)).unwrap(),
            Some(outer)
        );

        scene.set_show_bounds_only(outer, false).unwrap();
        assert_eq!(scene.hits_at(5.0, 5.0).unwrap(), vec![inner, outer]);
        assert_eq!(log.borrow().as_slice(), &[("outer", event_types::CLICK)]);
    }

    #[test]
    fn test_cleared_handler_no_longer_runs() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut scene = Scene::new();
        let n = scene.add_interactive(ContainerBuilder::new(10.0, 10.0)).unwrap();
        scene.add_to_layer(PaintLayer::Main, n).unwrap();
        scene.set_handler(n, event_types::CLICK, record(&log, "n")).unwrap();

        assert!(scene.clear_handler(n, event_types::CLICK));
        assert!(!scene.clear_handler(n, event_types::CLICK));
        // Still the target, but nothing is listening
        assert_eq!(
            scene.dispatch_pointer(PointerEvent::click(5.0, 5.0)).unwrap(),
            Some(n)
        );
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_hover_enter_and_leave() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut scene = Scene::new();
        let a = scene.add_interactive(ContainerBuilder::new(10.0, 10.0)).unwrap();
        let b = scene
            .add_interactive(ContainerBuilder::new(10.0, 10.0).at_pixels(20.0, 0.0))
            .unwrap();
        for (id, name) in [(a, "a"), (b, "b")] {
            for ty in [event_types::POINTER_ENTER, event_types::POINTER_LEAVE] {
                scene.set_handler(id, ty, record(&log, name)).unwrap();
            }
            scene.add_to_layer(PaintLayer::Main, id).unwrap();
        }

        scene.dispatch_pointer(PointerEvent::moved(5.0, 5.0)).unwrap();
        scene.dispatch_pointer(PointerEvent::moved(6.0, 5.0)).unwrap();
        scene.dispatch_pointer(PointerEvent::moved(25.0, 5.0)).unwrap();
        scene.dispatch_pointer(PointerEvent::moved(50.0, 50.0)).unwrap();

        assert_eq!(
            log.borrow().as_slice(),
            &[
                ("a", event_types::POINTER_ENTER),
                ("a", event_types::POINTER_LEAVE),
                ("b", event_types::POINTER_ENTER),
                ("b", event_types::POINTER_LEAVE),
            ]
        );
        assert_eq!(scene.hovered(), None);
    }
}
