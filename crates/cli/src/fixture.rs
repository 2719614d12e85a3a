// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Fixture discovery and the source-to-expected-output naming convention.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Where source programs and their expected outputs live
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct FixtureLayout {
    /// Directory searched recursively for source programs
    pub source_root: PathBuf,

    /// Directory holding expected-output files
    pub expected_dir: PathBuf,

    /// Source file extension, without the dot
    pub source_extension: String,

    /// Appended to the source file stem to name its expected output
    pub expected_suffix: String,
}

impl Default for FixtureLayout {
    fn default() -> Self {
        Self {
            source_root: PathBuf::from("CpslFiles"),
            expected_dir: PathBuf::from("TestFilesCorrectOutput"),
            source_extension: "cpsl".to_string(),
            expected_suffix: "_ExpectedOutput.txt".to_string(),
        }
    }
}

impl FixtureLayout {
    /// Expected-output path for a source program.
    ///
    /// `CpslFiles/loops/while.cpsl` maps to
    /// `TestFilesCorrectOutput/while_ExpectedOutput.txt`: only the file stem
    /// is kept, the source's subdirectory is not mirrored.
    pub fn expected_path_for(&self, source: &Path) -> PathBuf {
        let stem = source
            .file_stem()
            .map(|s| s.to_string_lossy())
            .unwrap_or_default();
        self.expected_dir
            .join(format!("{}{}", stem, self.expected_suffix))
    }

    /// Find every source program under the root, sorted by path.
    ///
    /// A missing root yields no fixtures. Unreadable entries are skipped.
    pub fn discover(&self) -> Result<Vec<PathBuf>, glob::PatternError> {
        let root = glob::Pattern::escape(&self.source_root.to_string_lossy());
        let pattern = format!("{}/**/*.{}", root, self.source_extension);
        let mut sources: Vec<PathBuf> = glob::glob(&pattern)?
            .filter_map(|entry| entry.ok())
            .filter(|path| path.is_file())
            .collect();
        sources.sort();
        Ok(sources)
    }
}

/// Display name of a fixture: its file name
pub fn fixture_name(source: &Path) -> String {
    source
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| source.display().to_string())
}

#[cfg(test)]
#[path = "fixture_tests.rs"]
mod tests;
