// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Recorded outcome data types.

use super::millis_serde;
use serde::{Deserialize, Serialize};
use std::time::{Duration, SystemTime};

/// One fixture's result as written to the outcome log
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RecordedOutcome {
    /// Sequence number within the run
    pub seq: u64,

    /// Wall-clock timestamp
    pub timestamp: SystemTime,

    /// Elapsed time since the log was created
    #[serde(rename = "elapsed_ms", with = "millis_serde")]
    pub elapsed: Duration,

    /// Fixture file name
    pub fixture: String,

    /// Whether the fixture passed
    pub passed: bool,

    /// Stage that decided the result
    pub stage: RecordedStage,

    /// Rendered diagnostics, in emission order
    #[serde(default)]
    pub diagnostics: Vec<String>,
}

/// Pipeline stage that produced a recorded outcome
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordedStage {
    Compile,
    Execute,
    LoadFixture,
    Compare,
}

#[cfg(test)]
#[path = "outcome_tests.rs"]
mod tests;
