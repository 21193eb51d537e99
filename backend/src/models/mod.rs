//! Domain models for the draw engine

pub mod assignment;
pub mod event;
pub mod participant;

// Re-exports
pub use assignment::{Arrangement, Assignment, DrawResult, InvariantViolation};
pub use event::{DrawEvent, EventLog};
pub use participant::{GroupId, ParticipantId};
