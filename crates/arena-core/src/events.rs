use crate::toggles::Toggle;
use glam::Vec2;
use smallvec::SmallVec;

/// Everything the input layer can tell the simulation. Listeners push these
/// instead of touching simulation state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    /// Stick vector already mapped onto the unit disk.
    StickMoved(Vec2),
    StickReleased,
    /// Camera swipe touch went down at this pixel position.
    SwipeStart(Vec2),
    SwipeMove(Vec2),
    Jump,
    Pause,
    Resume,
    TogglePause,
    SetToggle(Toggle, bool),
    FlipToggle(Toggle),
}

/// FIFO buffer of input events, drained once per frame. A frame rarely sees
/// more than a handful of touches, so the buffer normally stays inline.
#[derive(Debug, Default)]
pub struct InputQueue {
    events: SmallVec<[InputEvent; 16]>,
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

    /// Take all buffered events in arrival order, leaving the queue empty.
    pub fn drain(&mut self) -> SmallVec<[InputEvent; 16]> {
        std::mem::take(&mut self.events)
    }
}
