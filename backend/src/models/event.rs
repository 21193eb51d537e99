//! Event log for draw auditing and debugging.
//!
//! Every attempt made by the orchestrator leaves a trace here, so a caller
//! can see how many shuffles were rejected, where each one broke, and
//! whether swap repair rescued the draw.
//!
//! # Example
//!
//! ```rust
//! use secret_draw_core_rs::models::{DrawEvent, EventLog};
//!
//! let mut log = EventLog::new();
//! log.log(DrawEvent::RepairStarted { attempt: 100 });
//! assert_eq!(log.events_at_attempt(100).len(), 1);
//! ```

use crate::models::participant::ParticipantId;

/// Something that happened during one draw.
///
/// All events carry the 1-based generation attempt they belong to.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawEvent {
    /// Shuffled arrangement hit an excluded pair
    AttemptRejected {
        attempt: usize,
        position: usize,
        giver: ParticipantId,
        receiver: ParticipantId,
    },

    /// Swap repair was invoked on the rejected arrangement
    RepairStarted { attempt: usize },

    /// Swap repair produced a valid cycle
    RepairSucceeded { attempt: usize, rounds: usize },

    /// Swap repair used its whole round budget
    RepairFailed { attempt: usize, rounds: usize },

    /// A valid arrangement was accepted
    Accepted { attempt: usize, repaired: bool },
}

impl DrawEvent {
    pub fn attempt(&self) -> usize {
        match self {
            DrawEvent::AttemptRejected { attempt, .. } => *attempt,
            DrawEvent::RepairStarted { attempt } => *attempt,
            DrawEvent::RepairSucceeded { attempt, .. } => *attempt,
            DrawEvent::RepairFailed { attempt, .. } => *attempt,
            DrawEvent::Accepted { attempt, .. } => *attempt,
        }
    }

    pub fn event_type(&self) -> &'static str {
        match self {
            DrawEvent::AttemptRejected { .. } => "AttemptRejected",
            DrawEvent::RepairStarted { .. } => "RepairStarted",
            DrawEvent::RepairSucceeded { .. } => "RepairSucceeded",
            DrawEvent::RepairFailed { .. } => "RepairFailed",
            DrawEvent::Accepted { .. } => "Accepted",
        }
    }
}

/// Ordered list of draw events with a few query helpers
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<DrawEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn log(&mut self, event: DrawEvent) {
        self.events.push(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn events(&self) -> &[DrawEvent] {
        &self.events
    }

    pub fn events_at_attempt(&self, attempt: usize) -> Vec<&DrawEvent> {
        self.events.iter().filter(|e| e.attempt() == attempt).collect()
    }

    pub fn events_of_type(&self, event_type: &str) -> Vec<&DrawEvent> {
        self.events
            .iter()
            .filter(|e| e.event_type() == event_type)
            .collect()
    }

    /// Number of shuffled arrangements that were rejected
    pub fn rejected_count(&self) -> usize {
        self.events_of_type("AttemptRejected").len()
    }
}
