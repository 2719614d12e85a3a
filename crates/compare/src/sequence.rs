// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Ordered line sequences and the fixture loader.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur when loading a line sequence from disk
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("I/O error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// An ordered sequence of output lines.
///
/// Used for both the captured program output and the expected-output fixture.
/// Lines never carry their `\n` terminator; any other whitespace, including a
/// trailing `\r`, is preserved.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LineSequence {
    lines: Vec<String>,
}

impl LineSequence {
    /// Create a sequence from owned lines
    pub fn new(lines: Vec<String>) -> Self {
        Self { lines }
    }

    /// Split text into lines on `\n`.
    ///
    /// A final terminator does not produce a trailing empty line, so
    /// `"1\n2\n"` and `"1\n2"` both yield `["1", "2"]`.
    pub fn from_text(text: &str) -> Self {
        text.split_terminator('\n').collect()
    }

    /// Load a fixture file.
    ///
    /// The file is read once and never modified, so repeated loads of the
    /// same file produce equal sequences.
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_text(&text))
    }

    /// Split raw simulator output and drop its console framing.
    pub fn from_framed_output(raw: &str, framing: Framing) -> Self {
        Self::new(framing.strip(Self::from_text(raw).lines))
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.lines.iter()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }

    /// Join the lines back into newline-terminated text
    pub fn to_text(&self) -> String {
        let mut text = String::new();
        for line in &self.lines {
            text.push_str(line);
            text.push('\n');
        }
        text
    }
}

impl<S: Into<String>> FromIterator<S> for LineSequence {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}

impl From<Vec<String>> for LineSequence {
    fn from(lines: Vec<String>) -> Self {
        Self::new(lines)
    }
}

impl<'a> IntoIterator for &'a LineSequence {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}

/// Banner lines the simulator prints around the program's own output
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Framing {
    /// Leading lines to discard
    pub header_lines: usize,

    /// Trailing lines to discard
    pub footer_lines: usize,
}

impl Framing {
    pub fn new(header_lines: usize, footer_lines: usize) -> Self {
        Self {
            header_lines,
            footer_lines,
        }
    }

    /// Keep `lines[header_lines .. len - footer_lines]`.
    ///
    /// Output shorter than the framing itself leaves nothing behind.
    pub fn strip(&self, mut lines: Vec<String>) -> Vec<String> {
        let framed = self.header_lines.saturating_add(self.footer_lines);
        if lines.len() <= framed {
            return Vec::new();
        }
        lines.truncate(lines.len() - self.footer_lines);
        lines.drain(..self.header_lines);
        lines
    }
}

impl Default for Framing {
    fn default() -> Self {
        Self::new(2, 1)
    }
}

#[cfg(test)]
#[path = "sequence_tests.rs"]
mod tests;
