// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Sequence comparison producing a pass/fail verdict.

use crate::diagnostic::Diagnostic;
use crate::discrepancy::{report, DiscrepancyMode};
use crate::sequence::LineSequence;
use serde::{Deserialize, Serialize};

/// How many positional mismatches to report for equal-length sequences
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MismatchMode {
    /// Stop at the first differing line
    #[default]
    First,
    /// Report every differing line
    All,
}

/// Options controlling comparison diagnostics
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CompareOptions {
    /// Emit a confirmation for every matching line
    pub verbose: bool,

    /// Positional mismatch reporting
    pub mismatch_mode: MismatchMode,
}

impl CompareOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_mismatch_mode(mut self, mode: MismatchMode) -> Self {
        self.mismatch_mode = mode;
        self
    }
}

/// Result of comparing program output with its expected output
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Verdict {
    Pass(Vec<Diagnostic>),
    Fail(Vec<Diagnostic>),
}

impl Verdict {
    pub fn is_pass(&self) -> bool {
        matches!(self, Verdict::Pass(_))
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        match self {
            Verdict::Pass(d) | Verdict::Fail(d) => d,
        }
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        match self {
            Verdict::Pass(d) | Verdict::Fail(d) => d,
        }
    }
}

/// Compare the program's `actual` output against `expected`.
///
/// Sequences of different lengths always fail; the longer one is reconciled
/// against the shorter with [`report`]. Equal-length sequences pass only when
/// every position is equal.
pub fn compare(
    actual: &LineSequence,
    expected: &LineSequence,
    options: CompareOptions,
) -> Verdict {
    if actual.len() != expected.len() {
        let mut diagnostics = vec![Diagnostic::LengthMismatch {
            actual: actual.len(),
            expected: expected.len(),
        }];
        if actual.len() > expected.len() {
            diagnostics.extend(report(actual, expected, DiscrepancyMode::Addition));
        } else {
            diagnostics.extend(report(expected, actual, DiscrepancyMode::Missing));
        }
        return Verdict::Fail(diagnostics);
    }

    let mut diagnostics = Vec::new();
    let mut failed = false;
    for (index, (found, wanted)) in actual.iter().zip(expected).enumerate() {
        let line = index + 1;
        if found != wanted {
            failed = true;
            diagnostics.push(Diagnostic::Mismatch {
                line,
                expected: wanted.clone(),
                actual: found.clone(),
            });
            if options.mismatch_mode == MismatchMode::First {
                break;
            }
        } else if options.verbose {
            diagnostics.push(Diagnostic::Matched {
                line,
                text: found.clone(),
            });
        }
    }

    if failed {
        Verdict::Fail(diagnostics)
    } else {
        Verdict::Pass(diagnostics)
    }
}

#[cfg(test)]
#[path = "comparator_tests.rs"]
mod tests;
