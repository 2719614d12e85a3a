// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Unified diff rendering for failed comparisons.

use crate::sequence::LineSequence;
use similar::TextDiff;

/// Render a unified diff from `expected` to `actual`.
///
/// Returns an empty string when the sequences are equal.
pub fn unified_diff(expected: &LineSequence, actual: &LineSequence, context: usize) -> String {
    let expected_text = expected.to_text();
    let actual_text = actual.to_text();
    TextDiff::from_lines(&expected_text, &actual_text)
        .unified_diff()
        .context_radius(context)
        .header("expected", "actual")
        .to_string()
}

#[cfg(test)]
#[path = "unified_tests.rs"]
mod tests;
