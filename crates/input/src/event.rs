use quadview_common::Key;
use std::collections::VecDeque;

/// Platform-agnostic input event delivered by the windowing layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Key transition. Auto-repeat is not reported.
    Key { code: Key, pressed: bool },
    /// Absolute cursor position in pixels.
    CursorMoved { x: f64, y: f64 },
    /// New drawable size in pixels.
    Resized { width: u32, height: u32 },
    /// The window lost keyboard focus; held keys will not report releases.
    FocusLost,
    /// The user asked the window to close.
    CloseRequested,
}

#[derive(Debug, thiserror::Error)]
#[error("input queue full ({capacity} events), event dropped")]
pub struct QueueFull {
    pub capacity: usize,
}

/// Bounded FIFO of input events, filled by the windowing layer and drained
/// once per frame.
///
/// A cursor sample arriving right after another cursor sample replaces it:
/// positions are absolute, so the delta over the pair is unchanged.
#[derive(Debug)]
pub struct InputQueue {
    events: VecDeque<InputEvent>,
    capacity: usize,
    dropped: u64,
}

impl InputQueue {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            events: VecDeque::with_capacity(capacity),
            capacity,
            dropped: 0,
        }
    }

    pub fn push(&mut self, event: InputEvent) -> Result<(), QueueFull> {
        if matches!(event, InputEvent::CursorMoved { .. })
            && matches!(self.events.back(), Some(InputEvent::CursorMoved { .. }))
        {
            if let Some(last) = self.events.back_mut() {
                *last = event;
            }
            return Ok(());
        }
        if self.events.len() >= self.capacity {
            self.dropped += 1;
            tracing::warn!(?event, dropped = self.dropped, "input queue full");
            return Err(QueueFull {
                capacity: self.capacity,
            });
        }
        self.events.push_back(event);
        Ok(())
    }

    pub fn pop(&mut self) -> Option<InputEvent> {
        self.events.pop_front()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Events rejected because the queue was full.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }
}
