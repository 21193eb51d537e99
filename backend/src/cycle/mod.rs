//! Cycle Module
//!
//! Builds and checks single n-cycles over the participants:
//! - **generator**: uniform random arrangement (Fisher–Yates)
//! - **validator**: adjacency scan against the exclusion index
//! - **repair**: bounded pairwise swaps to clear a violation in place
//!
//! # Example
//!
//! ```rust
//! use secret_draw_core_rs::constraints::ExclusionSet;
//! use secret_draw_core_rs::cycle::{shuffle, validate};
//! use secret_draw_core_rs::{ParticipantId, RngManager};
//!
//! let participants: Vec<ParticipantId> = vec!["A".into(), "B".into(), "C".into()];
//! let mut rng = RngManager::new(7);
//!
//! let arrangement = shuffle(&participants, &mut rng);
//! let result = validate(&arrangement, &ExclusionSet::empty()).unwrap();
//! assert_eq!(result.len(), 3);
//! ```

pub mod generator;
pub mod repair;
pub mod validator;

pub use generator::shuffle;
pub use repair::{RepairFailed, RepairSuccess, SwapRepair};
pub use validator::{first_violation, is_valid, validate, CycleViolation};
