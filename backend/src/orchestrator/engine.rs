//! Orchestrator Engine
//!
//! Drives one draw from validated input to an accepted result:
//!
//! ```text
//! Idle → Generating → Validating ─┬─→ Accepted
//!            ↑                    └─→ Rejected
//!            │                           │ every Kth rejection:
//!            │                           ├─→ Repairing ─┬─→ Accepted
//!            │                           │              └─→ (repair exhausted)
//!            └───────────────────────────┘
//! After max_attempts generations without acceptance → DrawInfeasible
//! ```
//!
//! # Determinism
//!
//! All randomness comes from the caller's `RandomSource`.
//! Same seed + same input = identical result.
//!
//! # Example
//!
//! ```rust
//! use secret_draw_core_rs::orchestrator::{DrawConfig, DrawOrchestrator};
//! use secret_draw_core_rs::{ParticipantId, RngManager};
//!
//! let participants: Vec<ParticipantId> = vec!["A".into(), "B".into(), "C".into(), "D".into()];
//! let exclusions: Vec<(ParticipantId, ParticipantId)> = vec![("A".into(), "B".into())];
//!
//! let orchestrator = DrawOrchestrator::new(DrawConfig::default()).unwrap();
//! let outcome = orchestrator
//!     .run(&participants, &exclusions, &mut RngManager::new(12345))
//!     .unwrap();
//!
//! assert_eq!(outcome.result.len(), 4);
//! assert_ne!(outcome.result.receiver_of(&"A".into()).unwrap().as_str(), "B");
//! ```

use crate::constraints::{validate_input, ExclusionSet, InputError};
use crate::cycle::{shuffle, validate, SwapRepair};
use crate::models::{DrawEvent, DrawResult, EventLog, ParticipantId};
use crate::orchestrator::strategy::{RejectionAction, RetryPolicy};
use crate::rng::RandomSource;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, trace, warn};

// ============================================================================
// Configuration Types
// ============================================================================

/// Draw engine configuration
///
/// # Fields
///
/// * `min_participants` - Smallest group that may be drawn (at least 3)
/// * `max_attempts` - Generation attempts before declaring the draw infeasible
/// * `repair_interval` - Swap repair runs after every Nth rejected attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawConfig {
    pub min_participants: usize,
    pub max_attempts: usize,
    pub repair_interval: usize,
}

impl Default for DrawConfig {
    fn default() -> Self {
        Self {
            min_participants: 3,
            max_attempts: 1000,
            repair_interval: 100,
        }
    }
}

impl DrawConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), DrawError> {
        if self.min_participants < 3 {
            return Err(DrawError::InvalidConfig(format!(
                "min_participants must be >= 3, got {}",
                self.min_participants
            )));
        }

        if self.max_attempts == 0 {
            return Err(DrawError::InvalidConfig(
                "max_attempts must be > 0".to_string(),
            ));
        }

        if self.repair_interval == 0 {
            return Err(DrawError::InvalidConfig(
                "repair_interval must be > 0".to_string(),
            ));
        }

        Ok(())
    }
}

// ============================================================================
// Results and Errors
// ============================================================================

/// How the accepted arrangement was reached
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// A plain shuffle was valid
    Shuffle,
    /// Swap repair fixed a rejected shuffle
    Repair { rounds: usize },
}

/// Accepted draw plus how it was found
#[derive(Debug, Clone)]
pub struct DrawOutcome {
    pub result: DrawResult,

    /// 1-based attempt on which the draw was accepted
    pub attempts: usize,

    pub resolution: Resolution,

    /// Every rejection and repair along the way
    pub events: EventLog,
}

/// Draw error types
///
/// None of these are retried by the engine itself.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DrawError {
    #[error("at least {required} participants are required, got {actual}")]
    PreconditionFailed { required: usize, actual: usize },

    #[error("invalid input: {0}")]
    InvalidInput(#[from] InputError),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error(
        "no valid draw found after {attempts} attempts; reduce exclusions or add participants"
    )]
    DrawInfeasible { attempts: usize },
}

// ============================================================================
// Orchestrator
// ============================================================================

/// Retry loop tying generation, validation and repair together
///
/// Holds only configuration; nothing carries over between draws.
#[derive(Debug, Clone)]
pub struct DrawOrchestrator {
    config: DrawConfig,
    policy: RetryPolicy,
    repair: SwapRepair,
}

impl DrawOrchestrator {
    /// Create orchestrator from a validated configuration
    pub fn new(config: DrawConfig) -> Result<Self, DrawError> {
        config.validate()?;
        let policy = RetryPolicy::from_config(&config);

        Ok(Self {
            config,
            policy,
            repair: SwapRepair::new(),
        })
    }

    /// Replace the default n² repair bound
    pub fn with_repair(mut self, repair: SwapRepair) -> Self {
        self.repair = repair;
        self
    }

    pub fn config(&self) -> &DrawConfig {
        &self.config
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Run one draw
    ///
    /// Checks the participant count first, then the exclusion data, and only
    /// then starts generating. No partial result is ever returned.
    pub fn run<R: RandomSource + ?Sized>(
        &self,
        participants: &[ParticipantId],
        exclusions: &[(ParticipantId, ParticipantId)],
        rng: &mut R,
    ) -> Result<DrawOutcome, DrawError> {
        if participants.len() < self.config.min_participants {
            return Err(DrawError::PreconditionFailed {
                required: self.config.min_participants,
                actual: participants.len(),
            });
        }

        validate_input(participants, exclusions)?;
        let exclusion_set = ExclusionSet::build(exclusions.iter().cloned());

        info!(
            participants = participants.len(),
            exclusions = exclusion_set.len(),
            "starting draw"
        );

        let mut events = EventLog::new();

        for attempt in self.policy.attempts() {
            let arrangement = shuffle(participants, rng);

            let violation = match validate(&arrangement, &exclusion_set) {
                Ok(result) => {
                    events.log(DrawEvent::Accepted {
                        attempt,
                        repaired: false,
                    });
                    info!(attempt, "valid arrangement accepted");
                    return Ok(Self::accept(
                        result,
                        attempt,
                        Resolution::Shuffle,
                        events,
                        participants,
                        &exclusion_set,
                    ));
                }
                Err(violation) => violation,
            };

            trace!(
                attempt,
                position = violation.position,
                giver = %violation.giver,
                receiver = %violation.receiver,
                "arrangement rejected"
            );
            events.log(DrawEvent::AttemptRejected {
                attempt,
                position: violation.position,
                giver: violation.giver,
                receiver: violation.receiver,
            });

            match self.policy.action_after_rejection(attempt) {
                RejectionAction::Reshuffle => continue,
                RejectionAction::Repair => {
                    debug!(attempt, "trying swap repair");
                    events.log(DrawEvent::RepairStarted { attempt });

                    match self.repair.repair(arrangement, &exclusion_set) {
                        Ok(success) => {
                            events.log(DrawEvent::RepairSucceeded {
                                attempt,
                                rounds: success.rounds,
                            });
                            events.log(DrawEvent::Accepted {
                                attempt,
                                repaired: true,
                            });
                            info!(attempt, rounds = success.rounds, "resolved by swap repair");
                            return Ok(Self::accept(
                                success.arrangement.to_result(),
                                attempt,
                                Resolution::Repair {
                                    rounds: success.rounds,
                                },
                                events,
                                participants,
                                &exclusion_set,
                            ));
                        }
                        Err(failed) => {
                            debug!(attempt, rounds = failed.rounds, "swap repair failed");
                            events.log(DrawEvent::RepairFailed {
                                attempt,
                                rounds: failed.rounds,
                            });
                        }
                    }
                }
            }
        }

        warn!(
            attempts = self.policy.max_attempts(),
            "attempt budget exhausted without a valid draw"
        );
        Err(DrawError::DrawInfeasible {
            attempts: self.policy.max_attempts(),
        })
    }

    fn accept(
        result: DrawResult,
        attempts: usize,
        resolution: Resolution,
        events: EventLog,
        participants: &[ParticipantId],
        exclusions: &ExclusionSet,
    ) -> DrawOutcome {
        debug_assert_eq!(result.verify(participants, exclusions), Ok(()));
        DrawOutcome {
            result,
            attempts,
            resolution,
            events,
        }
    }
}

/// Run a draw with the default configuration
pub fn run_draw<R: RandomSource + ?Sized>(
    participants: &[ParticipantId],
    exclusions: &[(ParticipantId, ParticipantId)],
    rng: &mut R,
) -> Result<DrawOutcome, DrawError> {
    DrawOrchestrator::new(DrawConfig::default())?.run(participants, exclusions, rng)
}
