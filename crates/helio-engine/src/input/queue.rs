/// Input event types the engine understands.
/// Generic: no visualization-specific semantics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A touch/click began at viewport coordinates (x, y).
    PointerDown { x: f32, y: f32 },
    /// A touch/click ended at viewport coordinates (x, y).
    PointerUp { x: f32, y: f32 },
    /// A touch/cursor moved to viewport coordinates (x, y).
    PointerMove { x: f32, y: f32 },
    /// A custom event from the UI layer (menu buttons, sliders, etc.).
    /// `kind` identifies the event type; `a`, `b`, `c` carry arbitrary data.
    Custom { kind: u32, a: f32, b: f32, c: f32 },
}

/// A queue of input events.
/// JS writes events into the queue; Rust reads and drains them each frame.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    /// Push a new input event (called from JS via wasm-bindgen).
    /// Back-to-back pointer moves collapse into the latest one.
    pub fn push(&mut self, event: InputEvent) {
        if let (Some(last @ InputEvent::PointerMove { .. }), InputEvent::PointerMove { .. }) =
            (self.events.last_mut(), event)
        {
            *last = event;
            return;
        }
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Iterate over pending events without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_drain() {
        let mut q = InputQueue::new();
        q.push(InputEvent::PointerDown { x: 10.0, y: 20.0 });
        q.push(InputEvent::PointerUp { x: 10.0, y: 20.0 });
        assert_eq!(q.len(), 2);
        let events = q.drain();
        assert_eq!(events.len(), 2);
        assert!(q.is_empty());
    }

    #[test]
    fn consecutive_moves_coalesce() {
        let mut q = InputQueue::new();
        q.push(InputEvent::PointerMove { x: 1.0, y: 1.0 });
        q.push(InputEvent::PointerMove { x: 2.0, y: 3.0 });
        q.push(InputEvent::PointerDown { x: 2.0, y: 3.0 });
        q.push(InputEvent::PointerMove { x: 9.0, y: 3.0 });
        assert_eq!(
            q.drain(),
            vec![
                InputEvent::PointerMove { x: 2.0, y: 3.0 },
                InputEvent::PointerDown { x: 2.0, y: 3.0 },
                InputEvent::PointerMove { x: 9.0, y: 3.0 },
            ]
        );
    }

    #[test]
    fn iter_does_not_consume() {
        let mut q = InputQueue::new();
        q.push(InputEvent::Custom { kind: 3, a: 2.0, b: 0.0, c: 0.0 });
        assert_eq!(q.iter().count(), 1);
        assert_eq!(
            q.drain()[0],
            InputEvent::Custom { kind: 3, a: 2.0, b: 0.0, c: 0.0 }
        );
    }
}
