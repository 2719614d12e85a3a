// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Command-line interface.

use crate::config::HarnessConfig;
use clap::Parser;
use cpsl_verify_compare::{CompareOptions, MismatchMode};
use std::path::PathBuf;

/// Verify that compiled CPSL programs print their expected output
#[derive(Parser, Debug, Clone)]
#[command(
    name = "cpsl-verify",
    version,
    about = "Compile CPSL fixtures, run them in MARS and compare their output"
)]
pub struct Cli {
    /// The path to a Mars.jar file
    #[arg(value_name = "MARSPATH")]
    pub marspath: PathBuf,

    /// Writes simulator output to the console
    #[arg(short = 'p', long)]
    pub pmars: bool,

    /// Prints additional details during matching
    #[arg(short, long)]
    pub verbose: bool,

    /// Path to the cpsl compiler (default: ../../cpsl)
    #[arg(short = 'c', long, env = "CPSL_VERIFY_COMPILER")]
    pub cpslpath: Option<PathBuf>,

    /// Harness configuration file (TOML)
    #[arg(long, env = "CPSL_VERIFY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory searched for .cpsl programs
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Directory holding *_ExpectedOutput.txt files
    #[arg(long)]
    pub expected_dir: Option<PathBuf>,

    /// Report every mismatched line instead of stopping at the first
    #[arg(long)]
    pub all_mismatches: bool,

    /// Print a unified diff for failed comparisons
    #[arg(long)]
    pub diff: bool,

    /// Record one JSON line per fixture to this file
    #[arg(long, value_name = "FILE")]
    pub record: Option<PathBuf>,

    /// Kill the compiler after this many milliseconds
    #[arg(long)]
    pub compile_timeout_ms: Option<u64>,

    /// Kill the simulator after this many milliseconds
    #[arg(long)]
    pub execute_timeout_ms: Option<u64>,
}

/// Per-run presentation settings threaded into the runner
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSettings {
    /// Echo raw simulator output
    pub echo_simulator: bool,

    /// Comparator options
    pub compare: CompareOptions,

    /// Append a unified diff to failed comparisons
    pub show_diff: bool,
}

impl RunSettings {
    /// Combine presentation flags with the resolved configuration
    pub fn resolve(cli: &Cli, config: &HarnessConfig) -> Self {
        let mismatch_mode = if cli.all_mismatches {
            MismatchMode::All
        } else {
            config.mismatch_mode
        };
        Self {
            echo_simulator: cli.pmars,
            compare: CompareOptions::new()
                .with_verbose(cli.verbose)
                .with_mismatch_mode(mismatch_mode),
            show_diff: cli.diff,
        }
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
