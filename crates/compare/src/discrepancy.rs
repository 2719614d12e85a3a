// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Multiset reconciliation of sequences with different lengths.

use crate::diagnostic::Diagnostic;
use crate::sequence::LineSequence;
use std::collections::HashMap;

/// How lines of the longer sequence without a counterpart are classified
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DiscrepancyMode {
    /// The longer sequence is the expected output; unmatched lines are missing
    Missing,
    /// The longer sequence is the program output; unmatched lines are additions
    Addition,
}

impl DiscrepancyMode {
    fn unmatched(self, line: usize, text: String) -> Diagnostic {
        match self {
            DiscrepancyMode::Missing => Diagnostic::Missing { line, text },
            DiscrepancyMode::Addition => Diagnostic::Addition { line, text },
        }
    }
}

/// Classify every line of `longer` against `shorter`.
///
/// Walks `longer` front to back. A line still available in `shorter` is
/// reported as `Contains` and consumes exactly one occurrence, so duplicates
/// are matched one-for-one. Anything else is reported according to `mode`.
/// `shorter` itself is left untouched; the consumption happens on a private
/// occurrence count.
pub fn report(
    longer: &LineSequence,
    shorter: &LineSequence,
    mode: DiscrepancyMode,
) -> Vec<Diagnostic> {
    let mut remaining: HashMap<&str, usize> = HashMap::new();
    for line in shorter {
        *remaining.entry(line.as_str()).or_default() += 1;
    }

    longer
        .iter()
        .enumerate()
        .map(|(index, text)| {
            let line = index + 1;
            match remaining.get_mut(text.as_str()) {
                Some(count) if *count > 0 => {
                    *count -= 1;
                    Diagnostic::Contains {
                        line,
                        text: text.clone(),
                    }
                }
                _ => mode.unmatched(line, text.clone()),
            }
        })
        .collect()
}

#[cfg(test)]
#[path = "discrepancy_tests.rs"]
mod tests;
