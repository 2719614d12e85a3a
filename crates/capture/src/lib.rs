// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Outcome recording for cpsl-verify runs.
//!
//! Every fixture processed by a run produces one [`RecordedOutcome`]. The log
//! keeps them in memory and can mirror each record to a JSONL file so that
//! runs can be inspected or compared after the fact.

mod millis_serde;
mod log;
mod outcome;

pub use log::OutcomeLog;
pub use outcome::{RecordedOutcome, RecordedStage};
