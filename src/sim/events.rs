//! Event queue between the arena host and its enemies
//!
//! Double-buffered: events pushed during frame N are read during frame N+1,
//! so the order enemies are stepped in never changes what they observe.

use std::collections::VecDeque;

use crate::fsm::{StateId, TransitionId};

/// Index of an enemy inside an arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AgentId(pub usize);

/// Things that happened in the arena.
#[derive(Debug, Clone, Copy, PartialEq)]
#[non_exhaustive]
pub enum ArenaEvent {
    /// A player weapon touched an enemy.
    WeaponHit {
        /// The enemy that was struck
        victim: AgentId,
    },

    /// An enemy's state machine moved along an edge.
    StateChanged {
        /// The enemy that changed state
        agent: AgentId,
        /// State active when the tick began
        from: StateId,
        /// Edge that was taken
        transition: TransitionId,
        /// State now active
        to: StateId,
    },
}

/// Double-buffered event queue for frame-consistent event processing.
#[derive(Debug)]
pub struct EventQueue {
    /// Events being written this frame
    pending: VecDeque<ArenaEvent>,
    /// Events from previous frame, ready for processing
    processing: VecDeque<ArenaEvent>,
}

impl EventQueue {
    /// Default initial capacity for event queues.
    const DEFAULT_CAPACITY: usize = 16;

    /// Create a new event queue with default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self {
            pending: VecDeque::with_capacity(Self::DEFAULT_CAPACITY),
            processing: VecDeque::with_capacity(Self::DEFAULT_CAPACITY),
        }
    }

    /// Push an event to be processed next frame.
    #[inline]
    pub fn push(&mut self, event: ArenaEvent) {
        self.pending.push_back(event);
    }

    /// Swap the pending and processing queues.
    ///
    /// Call this once per frame, at the start of the update.
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.pending, &mut self.processing);
        self.pending.clear();
    }

    /// Iterate over events from the previous frame.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &ArenaEvent> {
        self.processing.iter()
    }

    /// Check if there are any events to process.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.processing.is_empty()
    }

    /// Get the number of events ready for processing.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.processing.len()
    }

    /// Get the number of events pending for next frame.
    #[must_use]
    #[inline]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}
