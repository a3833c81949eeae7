//! Discrete input events and their subscription bus
//!
//! The host's input layer turns device state into [`ChiselEvent`]s. The
//! controller registers for the kinds it handles when enabled and
//! deregisters when disabled; the bus drops events nobody registered for.

use std::collections::VecDeque;

use bitflags::bitflags;

/// A discrete input event for the chisel tool
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ChiselEvent {
    /// The chisel trigger was released
    Chisel,
    /// Thumbstick sample while the rotate input is active
    Rotate { x: f32, y: f32 },
    /// Re-anchor the controllers to the hands
    Reset,
}

impl ChiselEvent {
    /// The subscription kind of this event
    pub fn kind(&self) -> EventMask {
        match self {
            ChiselEvent::Chisel => EventMask::CHISEL,
            ChiselEvent::Rotate { .. } => EventMask::ROTATE,
            ChiselEvent::Reset => EventMask::RESET,
        }
    }
}

bitflags! {
    /// Set of event kinds
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct EventMask: u8 {
        const CHISEL = 1 << 0;
        const ROTATE = 1 << 1;
        const RESET = 1 << 2;
    }
}

/// Subscription interface the controller uses on enable/disable
pub trait EventBus {
    /// Start delivering events of these kinds
    fn register(&mut self, kinds: EventMask);

    /// Stop delivering events of these kinds
    fn deregister(&mut self, kinds: EventMask);

    /// Check whether every kind in `kinds` is being delivered
    fn is_registered(&self, kinds: EventMask) -> bool;
}

/// FIFO event queue with kind-based subscription
#[derive(Debug, Default)]
pub struct InputQueue {
    registered: EventMask,
    pending: VecDeque<ChiselEvent>,
}

impl InputQueue {
    /// Create a queue with nothing registered
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an event
    ///
    /// Returns false (and drops the event) if its kind is not registered.
    pub fn push(&mut self, event: ChiselEvent) -> bool {
        if !self.registered.contains(event.kind()) {
            log::trace!("Dropping unregistered event {:?}", event);
            return false;
        }
        self.pending.push_back(event);
        true
    }

    /// Take every queued event in arrival order
    pub fn drain(&mut self) -> Vec<ChiselEvent> {
        self.pending.drain(..).collect()
    }

    /// Number of queued events
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Check whether the queue is empty
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl EventBus for InputQueue {
    fn register(&mut self, kinds: EventMask) {
        self.registered |= kinds;
    }

    fn deregister(&mut self, kinds: EventMask) {
        self.registered &= !kinds;
        // Anything already queued for these kinds is stale now
        self.pending.retain(|e| !kinds.contains(e.kind()));
    }

    fn is_registered(&self, kinds: EventMask) -> bool {
        self.registered.contains(kinds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unregistered_events_dropped() {
        let mut queue = InputQueue::new();
        assert!(!queue.push(ChiselEvent::Chisel));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_default_queue_listens_to_nothing() {
        assert_eq!(EventMask::default(), EventMask::empty());
        let mut queue = InputQueue::default();
        assert!(!queue.is_registered(EventMask::CHISEL));
        assert!(!queue.push(ChiselEvent::Reset));
        queue.register(EventMask::RESET);
        assert!(queue.push(ChiselEvent::Reset));
    }

    #[test]
    fn test_fifo_order() {
        let mut queue = InputQueue::new();
        queue.register(EventMask::all());
        queue.push(ChiselEvent::Rotate { x: 0.5, y: 0.0 });
        queue.push(ChiselEvent::Chisel);
        queue.push(ChiselEvent::Reset);
        assert_eq!(queue.len(), 3);
        assert_eq!(
            queue.drain(),
            vec![ChiselEvent::Rotate { x: 0.5, y: 0.0 }, ChiselEvent::Chisel, ChiselEvent::Reset]
        );
        assert!(queue.is_empty());
    }

    #[test]
    fn test_partial_registration() {
        let mut queue = InputQueue::new();
        queue.register(EventMask::CHISEL | EventMask::RESET);
        assert!(queue.is_registered(EventMask::CHISEL));
        assert!(!queue.is_registered(EventMask::ROTATE));
        assert!(!queue.is_registered(EventMask::all()));
        assert!(!queue.push(ChiselEvent::Rotate { x: 1.0, y: 0.0 }));
        assert!(queue.push(ChiselEvent::Reset));
    }

    #[test]
    fn test_deregister_discards_pending() {
        let mut queue = InputQueue::new();
        queue.register(EventMask::all());
        queue.push(ChiselEvent::Chisel);
        queue.push(ChiselEvent::Reset);
        queue.deregister(EventMask::CHISEL);
        assert_eq!(queue.drain(), vec![ChiselEvent::Reset]);
        assert!(!queue.push(ChiselEvent::Chisel));
    }

    #[test]
    fn test_event_kind() {
        assert_eq!(ChiselEvent::Chisel.kind(), EventMask::CHISEL);
        assert_eq!(ChiselEvent::Rotate { x: 0.0, y: 1.0 }.kind(), EventMask::ROTATE);
        assert_eq!(ChiselEvent::Reset.kind(), EventMask::RESET);
    }
}
