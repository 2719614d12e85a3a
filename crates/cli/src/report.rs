// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Per-fixture outcomes and the end-of-run report.

use cpsl_verify_capture::RecordedStage;
use cpsl_verify_compare::Verdict;
use std::fmt::Write as _;

/// Process exit codes
pub mod exit_codes {
    /// Every fixture passed
    pub const SUCCESS: i32 = 0;
    /// At least one fixture failed
    pub const FAILURES: i32 = 1;
    /// The run could not start or was aborted
    pub const FATAL: i32 = 2;
}

/// Pipeline stage that decided a fixture's outcome
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Compile,
    Execute,
    LoadFixture,
    Compare,
}

impl From<Stage> for RecordedStage {
    fn from(stage: Stage) -> Self {
        match stage {
            Stage::Compile => RecordedStage::Compile,
            Stage::Execute => RecordedStage::Execute,
            Stage::LoadFixture => RecordedStage::LoadFixture,
            Stage::Compare => RecordedStage::Compare,
        }
    }
}

/// Result for one fixture
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TestOutcome {
    /// Fixture file name
    pub fixture: String,

    /// Stage that produced the verdict
    pub stage: Stage,

    pub verdict: Verdict,

    /// Why a stage before comparison failed
    pub detail: Option<String>,
}

impl TestOutcome {
    /// Outcome of a comparison that actually ran
    pub fn compared(fixture: impl Into<String>, verdict: Verdict) -> Self {
        Self {
            fixture: fixture.into(),
            stage: Stage::Compare,
            verdict,
            detail: None,
        }
    }

    /// Failure before any comparison took place
    pub fn failed(fixture: impl Into<String>, stage: Stage, detail: impl Into<String>) -> Self {
        Self {
            fixture: fixture.into(),
            stage,
            verdict: Verdict::Fail(Vec::new()),
            detail: Some(detail.into()),
        }
    }

    pub fn passed(&self) -> bool {
        self.verdict.is_pass()
    }

    /// Detail line followed by rendered diagnostics
    pub fn messages(&self) -> Vec<String> {
        self.detail
            .iter()
            .cloned()
            .chain(self.verdict.diagnostics().iter().map(ToString::to_string))
            .collect()
    }
}

/// Passed and failed fixtures for a whole run
#[derive(Clone, Debug, Default)]
pub struct RunReport {
    passed: Vec<TestOutcome>,
    failed: Vec<TestOutcome>,
}

impl RunReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an outcome to the matching collection
    pub fn push(&mut self, outcome: TestOutcome) {
        if outcome.passed() {
            self.passed.push(outcome);
        } else {
            self.failed.push(outcome);
        }
    }

    pub fn passed(&self) -> &[TestOutcome] {
        &self.passed
    }

    pub fn failed(&self) -> &[TestOutcome] {
        &self.failed
    }

    pub fn total(&self) -> usize {
        self.passed.len() + self.failed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    pub fn all_passed(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn exit_code(&self) -> i32 {
        if self.all_passed() {
            exit_codes::SUCCESS
        } else {
            exit_codes::FAILURES
        }
    }

    /// Render the final pass/fail listing
    pub fn render(&self) -> String {
        let mut out = String::new();
        if !self.passed.is_empty() {
            out.push_str("Files that passed\n");
            for outcome in &self.passed {
                let _ = writeln!(out, "\t{}", outcome.fixture);
            }
        }
        if !self.failed.is_empty() {
            out.push_str("Files that did not pass\n");
            for outcome in &self.failed {
                let _ = writeln!(out, "\t{}", outcome.fixture);
            }
        }
        let _ = writeln!(
            out,
            "{} passed, {} failed, {} total",
            self.passed.len(),
            self.failed.len(),
            self.total()
        );
        out
    }
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
