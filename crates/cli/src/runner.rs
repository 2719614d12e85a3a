// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Run coordinator: compile, execute and compare every fixture in turn.

use crate::cli::RunSettings;
use crate::fixture::{fixture_name, FixtureLayout};
use crate::normalize::Normalizer;
use crate::output::RULE;
use crate::report::{RunReport, Stage, TestOutcome};
use crate::toolchain::{CompileOutcome, Toolchain, ToolchainError};
use cpsl_verify_capture::OutcomeLog;
use cpsl_verify_compare::{compare, unified_diff, Framing, LineSequence};
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Context lines around each hunk of a `--diff` listing
const DIFF_CONTEXT: usize = 3;

/// Errors that abort the whole run
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Toolchain(#[from] ToolchainError),

    #[error("Invalid fixture pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("Failed to write progress output: {0}")]
    Io(#[from] std::io::Error),
}

/// Sequential fixture runner
pub struct Runner<T: Toolchain> {
    toolchain: T,
    layout: FixtureLayout,
    settings: RunSettings,
    framing: Framing,
    normalizer: Normalizer,
    log: Option<OutcomeLog>,
}

impl<T: Toolchain> Runner<T> {
    pub fn new(toolchain: T, layout: FixtureLayout, settings: RunSettings) -> Self {
        Self {
            toolchain,
            layout,
            settings,
            framing: Framing::default(),
            normalizer: Normalizer::default(),
            log: None,
        }
    }

    pub fn with_framing(mut self, framing: Framing) -> Self {
        self.framing = framing;
        self
    }

    pub fn with_normalizer(mut self, normalizer: Normalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    /// Record every outcome to this log as well
    pub fn with_log(mut self, log: OutcomeLog) -> Self {
        self.log = Some(log);
        self
    }

    /// Discover fixtures under the layout's root and run them all
    pub async fn run<W: Write>(&self, out: &mut W) -> Result<RunReport, RunError> {
        let sources = self.layout.discover()?;
        self.run_sources(&sources, out).await
    }

    /// Run the given source programs in order.
    ///
    /// Per-fixture failures are recorded and the run moves on; only a
    /// missing compiler (or a broken output stream) aborts it.
    pub async fn run_sources<W: Write>(
        &self,
        sources: &[PathBuf],
        out: &mut W,
    ) -> Result<RunReport, RunError> {
        self.toolchain.preflight()?;

        let mut report = RunReport::new();
        for source in sources {
            writeln!(out, "{}", RULE)?;
            let outcome = self.run_one(source, out).await?;
            writeln!(out, "{}\n", RULE)?;

            if let Some(ref log) = self.log {
                log.record(
                    outcome.fixture.clone(),
                    outcome.passed(),
                    outcome.stage.into(),
                    outcome.messages(),
                );
            }
            report.push(outcome);
        }
        Ok(report)
    }

    async fn run_one<W: Write>(&self, source: &Path, out: &mut W) -> Result<TestOutcome, RunError> {
        let name = fixture_name(source);
        let path = source.display();

        writeln!(out, "Attempting to compile {}", path)?;
        match self.toolchain.compile(source).await {
            Ok(CompileOutcome::Compiled) => writeln!(out, "Successfully compiled {}\n", path)?,
            Ok(CompileOutcome::Rejected(message)) => {
                writeln!(out, "Failed to compile {} with error {}\n", path, message)?;
                return Ok(TestOutcome::failed(name, Stage::Compile, message));
            }
            Err(e) if e.is_fatal() => return Err(e.into()),
            Err(e) => {
                writeln!(out, "Failed to compile {}: {}\n", path, e)?;
                return Ok(TestOutcome::failed(name, Stage::Compile, e.to_string()));
            }
        }

        writeln!(out, "Attempting to execute the compiled program in the simulator")?;
        let raw = match self.toolchain.execute().await {
            Ok(raw) => raw,
            Err(e) => {
                writeln!(out, "Failed to execute {}: {}\n", path, e)?;
                return Ok(TestOutcome::failed(name, Stage::Execute, e.to_string()));
            }
        };
        if self.settings.echo_simulator {
            writeln!(out, "{}", raw)?;
        }
        writeln!(out, "Finished executing the compiled program\n")?;

        let expected_path = self.layout.expected_path_for(source);
        let expected = match LineSequence::load(&expected_path) {
            Ok(lines) if lines.is_empty() => {
                let message = format!("No expected output in {}", expected_path.display());
                writeln!(out, "{}", message)?;
                return Ok(TestOutcome::failed(name, Stage::LoadFixture, message));
            }
            Ok(lines) => self.normalizer.apply(lines),
            Err(e) => {
                writeln!(out, "{}", e)?;
                return Ok(TestOutcome::failed(name, Stage::LoadFixture, e.to_string()));
            }
        };
        let actual = self
            .normalizer
            .apply(LineSequence::from_framed_output(&raw, self.framing));

        writeln!(
            out,
            "Beginning comparison of {} with {}\n",
            path,
            expected_path.display()
        )?;
        if actual.len() == expected.len() {
            writeln!(out, "The length of the program's output is as expected\n")?;
        }

        let verdict = compare(&actual, &expected, self.settings.compare);
        for diagnostic in verdict.diagnostics() {
            writeln!(out, "\t{}", diagnostic)?;
        }

        if verdict.is_pass() {
            writeln!(out, "The source program's output is as expected")?;
        } else {
            writeln!(out, "The source program's output does not match the expected output")?;
            if self.settings.show_diff {
                write!(out, "{}", unified_diff(&expected, &actual, DIFF_CONTEXT))?;
            }
        }
        writeln!(out, "\nFinished comparison of {}\n", path)?;

        Ok(TestOutcome::compared(name, verdict))
    }
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
