//! Input delivery
//!
//! Hosts push events as they arrive; the session takes at most one per tick.
//! Only the most recent event survives, so a burst of key presses between
//! two ticks collapses to the last one.

/// Host input the core understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Space: jump in a round, start/restart elsewhere
    Jump,
    /// Escape: back to the menu from a round, exit elsewhere
    Abort,
    /// Window closed
    Quit,
}

impl InputEvent {
    /// Map a host key name to an event
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            " " | "Space" | "space" => Some(InputEvent::Jump),
            "Escape" | "Esc" | "escape" => Some(InputEvent::Abort),
            _ => None,
        }
    }
}

/// Non-blocking host poll
pub trait InputSource {
    /// Next event if one is waiting; never blocks
    fn poll(&mut self) -> Option<InputEvent>;
}

/// Scripted events, one poll each; `None` entries are idle frames
impl InputSource for std::collections::VecDeque<Option<InputEvent>> {
    fn poll(&mut self) -> Option<InputEvent> {
        self.pop_front().flatten()
    }
}

/// Single-slot latest-event channel
#[derive(Debug, Clone, Default)]
pub struct InputLatch {
    pending: Option<InputEvent>,
    /// Events overwritten before they were taken
    dropped: u64,
}

impl InputLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an event, replacing any not yet taken
    pub fn push(&mut self, event: InputEvent) {
        if self.pending.replace(event).is_some() {
            self.dropped += 1;
        }
    }

    /// Take the pending event, leaving the latch empty
    pub fn take(&mut self) -> Option<InputEvent> {
        self.pending.take()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_none()
    }

    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    /// Drain everything the source has waiting, keeping the latest
    pub fn fill_from(&mut self, source: &mut impl InputSource) {
        while let Some(event) = source.poll() {
            self.push(event);
        }
    }
}
