//! Constraint Model
//!
//! Blocked pairs declared by participants, indexed for constant-time
//! lookup during validation and repair.
//!
//! # Critical Invariants
//!
//! 1. **Directionality**: blocking A→B never implies B→A
//! 2. **Read-only**: built once per draw, never mutated by the engine

pub mod exclusion;

pub use exclusion::{validate_input, ExclusionSet, InputError};
