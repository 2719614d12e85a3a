// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Optional normalization applied to both sequences before comparison.
//!
//! With no rules configured the comparison is exact. Rules run in order,
//! line by line, on the actual and the expected output alike.

use cpsl_verify_compare::LineSequence;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Static regex for matching ANSI escape sequences
static ANSI_REGEX: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\x1b\[[0-9;]*[a-zA-Z]").ok());

/// Normalization rule as written in the harness config
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NormalizationRule {
    /// Replace every match of `pattern` with `replacement`
    Replace {
        pattern: String,
        replacement: String,
    },
    /// Drop lines matching `pattern`
    RemoveLines { pattern: String },
    /// Strip ANSI escape codes
    StripAnsi,
    /// Remove trailing spaces and tabs
    TrimTrailingWhitespace,
}

enum CompiledRule {
    Replace { regex: Regex, replacement: String },
    RemoveLines(Regex),
    StripAnsi,
    TrimTrailingWhitespace,
}

/// Compiled normalization rules
#[derive(Default)]
pub struct Normalizer {
    rules: Vec<CompiledRule>,
}

impl Normalizer {
    /// Compile rules, failing on the first invalid pattern
    pub fn new(rules: &[NormalizationRule]) -> Result<Self, regex::Error> {
        let rules = rules
            .iter()
            .map(|rule| {
                Ok(match rule {
                    NormalizationRule::Replace {
                        pattern,
                        replacement,
                    } => CompiledRule::Replace {
                        regex: Regex::new(pattern)?,
                        replacement: replacement.clone(),
                    },
                    NormalizationRule::RemoveLines { pattern } => {
                        CompiledRule::RemoveLines(Regex::new(pattern)?)
                    }
                    NormalizationRule::StripAnsi => CompiledRule::StripAnsi,
                    NormalizationRule::TrimTrailingWhitespace => {
                        CompiledRule::TrimTrailingWhitespace
                    }
                })
            })
            .collect::<Result<Vec<_>, regex::Error>>()?;
        Ok(Self { rules })
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Apply every rule to every line
    pub fn apply(&self, lines: LineSequence) -> LineSequence {
        if self.is_empty() {
            return lines;
        }
        self.rules
            .iter()
            .fold(lines.into_lines(), |acc, rule| rule.apply(acc))
            .into()
    }
}

impl CompiledRule {
    fn apply(&self, lines: Vec<String>) -> Vec<String> {
        match self {
            CompiledRule::Replace { regex, replacement } => lines
                .into_iter()
                .map(|line| regex.replace_all(&line, replacement.as_str()).into_owned())
                .collect(),
            CompiledRule::RemoveLines(regex) => lines
                .into_iter()
                .filter(|line| !regex.is_match(line))
                .collect(),
            CompiledRule::StripAnsi => match ANSI_REGEX.as_ref() {
                Some(re) => lines
                    .into_iter()
                    .map(|line| re.replace_all(&line, "").into_owned())
                    .collect(),
                None => lines,
            },
            CompiledRule::TrimTrailingWhitespace => lines
                .into_iter()
                .map(|line| line.trim_end_matches([' ', '\t']).to_string())
                .collect(),
        }
    }
}

#[cfg(test)]
#[path = "normalize_tests.rs"]
mod tests;
