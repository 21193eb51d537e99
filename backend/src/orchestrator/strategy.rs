//! Retry policy - which recovery step follows a rejected attempt
//!
//! Kept separate from the loop so the schedule can be inspected and tested
//! without running a draw.

use crate::orchestrator::engine::DrawConfig;
use std::ops::RangeInclusive;

/// What the orchestrator does after a shuffled arrangement is rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionAction {
    /// Discard the arrangement and shuffle again
    Reshuffle,
    /// Run swap repair on the rejected arrangement before reshuffling
    Repair,
}

/// Attempt budget plus the periodic repair schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: usize,
    repair_interval: usize,
}

impl RetryPolicy {
    pub fn new(max_attempts: usize, repair_interval: usize) -> Self {
        Self {
            max_attempts,
            repair_interval,
        }
    }

    pub fn from_config(config: &DrawConfig) -> Self {
        Self::new(config.max_attempts, config.repair_interval)
    }

    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    pub fn repair_interval(&self) -> usize {
        self.repair_interval
    }

    /// 1-based attempt numbers in the budget
    pub fn attempts(&self) -> RangeInclusive<usize> {
        1..=self.max_attempts
    }

    /// Repair fires on every multiple of the interval; an interval of 0
    /// never repairs
    pub fn action_after_rejection(&self, attempt: usize) -> RejectionAction {
        if self.repair_interval != 0 && attempt % self.repair_interval == 0 {
            RejectionAction::Repair
        } else {
            RejectionAction::Reshuffle
        }
    }

    /// Attempts at which a rejection triggers repair
    pub fn repair_attempts(&self) -> impl Iterator<Item = usize> + '_ {
        self.attempts()
            .filter(move |&a| self.action_after_rejection(a) == RejectionAction::Repair)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&DrawConfig::default())
    }
}
