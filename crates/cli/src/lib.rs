// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! CPSL output verification harness
//!
//! Compiles every CPSL program in a fixture tree, runs the generated assembly
//! in the MARS simulator and compares the captured output against the stored
//! `*_ExpectedOutput.txt` fixture. The comparison engine lives in
//! [`cpsl_verify_compare`]; this crate supplies the orchestration around it.

/// Re-exported comparison types from cpsl-verify-compare crate.
pub mod compare {
    pub use cpsl_verify_compare::{
        compare, report, unified_diff, CompareOptions, Diagnostic, DiscrepancyMode, Framing,
        LineSequence, LoadError, MismatchMode, Verdict,
    };
}

/// Re-exported outcome recording types from cpsl-verify-capture crate.
pub mod capture {
    pub use cpsl_verify_capture::{OutcomeLog, RecordedOutcome, RecordedStage};
}

pub mod cli;
pub mod config;
pub mod env;
pub mod fixture;
pub mod normalize;
pub mod output;
pub mod report;
pub mod runner;
pub mod toolchain;
