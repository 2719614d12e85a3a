// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Diagnostics emitted while comparing two line sequences.

use std::fmt;

/// A single comparison finding.
///
/// Line numbers are 1-based. For length mismatches they refer to the longer
/// sequence; for positional checks both sequences share the same numbering.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Diagnostic {
    /// The sequences have different lengths
    LengthMismatch { actual: usize, expected: usize },
    /// Verbose confirmation of an equal position
    Matched { line: usize, text: String },
    /// First (or, when scanning all, every) differing position
    Mismatch {
        line: usize,
        expected: String,
        actual: String,
    },
    /// Line of the longer sequence also found in the shorter one
    Contains { line: usize, text: String },
    /// Expected line that never appeared in the program output
    Missing { line: usize, text: String },
    /// Program output line that was not expected
    Addition { line: usize, text: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::LengthMismatch { actual, expected } => {
                let side = if actual > expected { "longer" } else { "shorter" };
                write!(
                    f,
                    "The length of the program's output is {} but expected a length of {}; \
                     the output is {} than expected",
                    actual, expected, side
                )
            }
            Diagnostic::Matched { line, text } => {
                write!(f, "The line {}: {} is as expected", line, text)
            }
            Diagnostic::Mismatch {
                line,
                expected,
                actual,
            } => write!(
                f,
                "Invalid output at line {}: expected {:?}, found {:?}",
                line, expected, actual
            ),
            Diagnostic::Contains { line, text } => write!(f, "Contains:  {}: {}", line, text),
            Diagnostic::Missing { line, text } => write!(f, "Missing:   {}: {}", line, text),
            Diagnostic::Addition { line, text } => write!(f, "Addition:  {}: {}", line, text),
        }
    }
}

#[cfg(test)]
#[path = "diagnostic_tests.rs"]
mod tests;
