//! First-in, first-out storage for [`KeyEvent`]s awaiting a consumer.

use crate::event::KeyEvent;
use heapless::Deque;

/// Default number of events the queue holds before new events are discarded.
///
/// At one note-on and one note-off per key, this covers every key of the matrix being struck and released between two
/// drains of the queue, with room to spare.
pub const EVENT_QUEUE_CAPACITY: usize = 256;

/// A bounded FIFO of [`KeyEvent`]s.
///
/// Ordering is the only guarantee: events are neither prioritized nor coalesced.
pub struct EventQueue<const N: usize = EVENT_QUEUE_CAPACITY> {
    events: Deque<KeyEvent, N>,
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> EventQueue<N> {
    /// Constructs an empty [`EventQueue`].
    pub const fn new() -> Self {
        Self {
            events: Deque::new(),
        }
    }

    /// Appends an event at the tail. Returns `false`, discarding the event, if the queue is full.
    pub fn push(&mut self, event: KeyEvent) -> bool {
        match self.events.push_back(event) {
            Ok(()) => true,
            Err(_rejected) => {
                warn!("Event queue full, dropping {}", _rejected);
                false
            }
        }
    }

    /// Removes and returns the event at the head, if any.
    pub fn pop(&mut self) -> Option<KeyEvent> {
        self.events.pop_front()
    }

    /// Returns the event at the head without removing it.
    pub fn peek(&self) -> Option<KeyEvent> {
        self.events.front().copied()
    }

    /// Returns `true` if at least one event is waiting.
    pub fn has_event(&self) -> bool {
        !self.events.is_empty()
    }

    /// Number of waiting events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns `true` if no events are waiting.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of events the queue can hold.
    pub const fn capacity(&self) -> usize {
        N
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::{ColIndex, KeyLocation, RowIndex};

    fn off(row: u8) -> KeyEvent {
        KeyEvent::NoteOff {
            key: KeyLocation::new(RowIndex::from_value(row), ColIndex::FIRST),
        }
    }

    #[test]
    fn empty() {
        let mut queue: EventQueue<4> = EventQueue::new();
        assert!(!queue.has_event());
        assert!(queue.is_empty());
        assert_eq!(None, queue.pop(), "Expected left but got right");
    }

    #[test]
    fn fifo_order() {
        let mut queue: EventQueue<4> = EventQueue::new();
        assert!(queue.push(off(1)));
        assert!(queue.push(off(2)));
        assert!(queue.push(off(3)));
        assert_eq!(3, queue.len(), "Expected left but got right");
        assert_eq!(Some(off(1)), queue.pop(), "Expected left but got right");
        assert_eq!(Some(off(2)), queue.pop(), "Expected left but got right");
        assert!(queue.push(off(4)));
        assert_eq!(Some(off(3)), queue.pop(), "Expected left but got right");
        assert_eq!(Some(off(4)), queue.pop(), "Expected left but got right");
        assert!(!queue.has_event());
    }

    #[test]
    fn full_queue_rejects_newest() {
        let mut queue: EventQueue<2> = EventQueue::new();
        assert!(queue.push(off(1)));
        assert!(queue.push(off(2)));
        assert!(!queue.push(off(3)), "Should reject when full");
        assert_eq!(Some(off(1)), queue.pop(), "Expected left but got right");
        assert_eq!(Some(off(2)), queue.pop(), "Expected left but got right");
        assert_eq!(None, queue.pop(), "Expected left but got right");
    }
}
