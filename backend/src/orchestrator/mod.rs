//! Orchestrator - retry loop around generation, validation and repair
//!
//! See `engine.rs` for the loop and `strategy.rs` for the repair schedule.

pub mod engine;
pub mod record;
pub mod strategy;

// Re-export main types for convenience
pub use engine::{run_draw, DrawConfig, DrawError, DrawOrchestrator, DrawOutcome, Resolution};
pub use record::{compute_input_fingerprint, validate_record, DrawRecord, RecordError};
pub use strategy::{RejectionAction, RetryPolicy};
