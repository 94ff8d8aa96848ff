//! Pointer events
//!
//! Hosts deliver pointer input in surface-local pixels. Interactive nodes
//! expose one handler slot per event type.

use rustc_hash::FxHashMap;

use crate::measure::NodeId;

/// Event type identifier
pub type EventType = u32;

/// Pointer event types
pub mod event_types {
    use super::EventType;

    pub const POINTER_DOWN: EventType = 1;
    pub const POINTER_UP: EventType = 2;
    pub const POINTER_MOVE: EventType = 3;
    pub const POINTER_ENTER: EventType = 4;
    pub const POINTER_LEAVE: EventType = 5;
    pub const CLICK: EventType = 6;
}

/// A pointer event at surface-local pixel coordinates
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    pub event_type: EventType,
    pub x: f32,
    pub y: f32,
    pub button: u8,
}

impl PointerEvent {
    pub fn new(event_type: EventType, x: f32, y: f32) -> Self {
        Self {
            event_type,
            x,
            y,
            button: 0,
        }
    }

    pub fn down(x: f32, y: f32) -> Self {
        Self::new(event_types::POINTER_DOWN, x, y)
    }

    pub fn up(x: f32, y: f32) -> Self {
        Self::new(event_types::POINTER_UP, x, y)
    }

    pub fn moved(x: f32, y: f32) -> Self {
        Self::new(event_types::POINTER_MOVE, x, y)
    }

    pub fn click(x: f32, y: f32) -> Self {
        Self::new(event_types::CLICK, x, y)
    }

    /// The same position re-labelled as another event type
    pub fn with_type(self, event_type: EventType) -> Self {
        Self { event_type, ..self }
    }
}

/// Event handler function type
pub type PointerHandler = Box<dyn FnMut(&PointerEvent)>;

/// Holds one handler per (node, event type) slot
#[derive(Default)]
pub struct EventDispatcher {
    handlers: FxHashMap<(NodeId, EventType), PointerHandler>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self {
            handlers: FxHashMap::default(),
        }
    }

    /// Fill a handler slot, replacing any previous handler in it
    pub fn set<F>(&mut self, node: NodeId, event_type: EventType, handler: F)
    where
        F: FnMut(&PointerEvent) + 'static,
    {
        self.handlers.insert((node, event_type), Box::new(handler));
    }

    /// Empty a handler slot
    pub fn clear(&mut self, node: NodeId, event_type: EventType) -> bool {
        self.handlers.remove(&(node, event_type)).is_some()
    }

    pub fn has_handler(&self, node: NodeId, event_type: EventType) -> bool {
        self.handlers.contains_key(&(node, event_type))
    }

    /// Run the handler in the slot for `node` and the event's type.
    ///
    /// Returns whether a handler ran.
    pub fn dispatch(&mut self, node: NodeId, event: &PointerEvent) -> bool {
        match self.handlers.get_mut(&(node, event.event_type)) {
            Some(handler) => {
                handler(event);
                true
            }
            None => false,
        }
    }
}
