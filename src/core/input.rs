use glam::Vec2;

/// Raw input arriving from the host between ticks. Pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerMoved { x: f32, y: f32 },
    PointerDown { x: f32, y: f32 },
    PointerLeft,
    Resized { width: u32, height: u32 },
    /// Escape key or close action
    Dismiss,
}

/// Latest pointer change seen since the previous tick
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PointerUpdate {
    #[default]
    Unchanged,
    Moved(Vec2),
    Left,
}

/// Discrete user intents, kept in arrival order
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Intent {
    Click(Vec2),
    Dismiss,
}

/// Everything the tick needs to know about input, folded from the queue
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputSnapshot {
    pub pointer: PointerUpdate,
    pub intents: Vec<Intent>,
    pub resize: Option<(u32, u32)>,
}

impl InputSnapshot {
    pub fn is_empty(&self) -> bool {
        self.pointer == PointerUpdate::Unchanged && self.intents.is_empty() && self.resize.is_none()
    }
}

/// Input events are only recorded here; state changes happen when the next
/// tick drains the queue.
#[derive(Debug, Clone, Default)]
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Fold all pending events into one snapshot and clear the queue
    pub fn drain(&mut self) -> InputSnapshot {
        let mut snapshot = InputSnapshot::default();

        for event in self.events.drain(..) {
            match event {
                InputEvent::PointerMoved { x, y } => {
                    snapshot.pointer = PointerUpdate::Moved(Vec2::new(x, y));
                }
                InputEvent::PointerDown { x, y } => {
                    // Touch has no hover phase, so a press also moves the pointer
                    let at = Vec2::new(x, y);
                    snapshot.pointer = PointerUpdate::Moved(at);
                    snapshot.intents.push(Intent::Click(at));
                }
                InputEvent::PointerLeft => snapshot.pointer = PointerUpdate::Left,
                InputEvent::Resized { width, height } => snapshot.resize = Some((width, height)),
                InputEvent::Dismiss => snapshot.intents.push(Intent::Dismiss),
            }
        }

        snapshot
    }
}
