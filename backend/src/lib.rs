//! Secret Draw Core - Rust Engine
//!
//! Assigns every member of a group exactly one secret recipient so that the
//! assignments form a single cycle through everyone and respect each
//! member's blocked pairs.
//!
//! # Architecture
//!
//! - **constraints**: Exclusion index and input validation
//! - **cycle**: Arrangement generator, cycle validator, swap repair
//! - **orchestrator**: Retry loop with periodic repair, draw records
//! - **models**: Domain types (ParticipantId, Arrangement, DrawResult, events)
//! - **service**: Collaborator traits and group-level draw operations
//! - **rng**: Deterministic, injectable random number generation
//!
//! # Critical Invariants
//!
//! 1. Every accepted draw is one n-cycle: each participant gives once and receives once
//! 2. No one draws themselves and no excluded pair is ever assigned
//! 3. All randomness is injected (seeded RNG), never global
//! 4. The engine holds no state between draws; exclusivity per group is the store's job

// Module declarations
pub mod constraints;
pub mod cycle;
pub mod models;
pub mod orchestrator;
pub mod rng;
pub mod service;

// Re-exports for convenience
pub use constraints::{ExclusionSet, InputError};
pub use models::{
    assignment::{Arrangement, Assignment, DrawResult, InvariantViolation},
    event::{DrawEvent, EventLog},
    participant::{GroupId, ParticipantId},
};
pub use orchestrator::{
    run_draw, DrawConfig, DrawError, DrawOrchestrator, DrawOutcome, DrawRecord, Resolution,
    RetryPolicy,
};
pub use rng::{RandomSource, RngManager};
pub use service::{DrawService, DrawStore, ServiceError};
