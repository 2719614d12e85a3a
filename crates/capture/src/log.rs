// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared, append-only outcome log.

use crate::outcome::{RecordedOutcome, RecordedStage};
use parking_lot::Mutex;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::Arc;
use std::time::{Instant, SystemTime};

struct State {
    outcomes: Vec<RecordedOutcome>,
    sink: Option<BufWriter<File>>,
}

/// Append-only log of fixture outcomes.
///
/// Clones share the same storage. When opened with [`OutcomeLog::with_file`]
/// every record is also appended to the file as one JSON line, flushed
/// immediately so an aborted run still leaves the completed fixtures behind.
#[derive(Clone)]
pub struct OutcomeLog {
    start: Instant,
    state: Arc<Mutex<State>>,
}

impl OutcomeLog {
    /// In-memory log
    pub fn new() -> Self {
        Self::from_sink(None)
    }

    /// Log mirrored to a JSONL file, truncating it
    pub fn with_file(path: &Path) -> std::io::Result<Self> {
        let file = File::create(path)?;
        Ok(Self::from_sink(Some(BufWriter::new(file))))
    }

    fn from_sink(sink: Option<BufWriter<File>>) -> Self {
        Self {
            start: Instant::now(),
            state: Arc::new(Mutex::new(State {
                outcomes: Vec::new(),
                sink,
            })),
        }
    }

    /// Append the outcome of one fixture
    pub fn record(
        &self,
        fixture: impl Into<String>,
        passed: bool,
        stage: RecordedStage,
        diagnostics: Vec<String>,
    ) -> RecordedOutcome {
        let mut state = self.state.lock();
        let outcome = RecordedOutcome {
            seq: state.outcomes.len() as u64,
            timestamp: SystemTime::now(),
            elapsed: self.start.elapsed(),
            fixture: fixture.into(),
            passed,
            stage,
            diagnostics,
        };

        // The file is a best-effort mirror; the in-memory log stays authoritative.
        if let Some(ref mut sink) = state.sink {
            if let Ok(json) = serde_json::to_string(&outcome) {
                let _ = writeln!(sink, "{}", json).and_then(|()| sink.flush());
            }
        }

        state.outcomes.push(outcome.clone());
        outcome
    }

    /// Snapshot of every outcome in recording order
    pub fn outcomes(&self) -> Vec<RecordedOutcome> {
        self.state.lock().outcomes.clone()
    }

    pub fn failures(&self) -> Vec<RecordedOutcome> {
        self.filtered(|o| !o.passed)
    }

    pub fn for_fixture(&self, fixture: &str) -> Vec<RecordedOutcome> {
        self.filtered(|o| o.fixture == fixture)
    }

    /// Outcomes decided at the given stage
    pub fn at_stage(&self, stage: RecordedStage) -> Vec<RecordedOutcome> {
        self.filtered(|o| o.stage == stage)
    }

    fn filtered(&self, keep: impl Fn(&RecordedOutcome) -> bool) -> Vec<RecordedOutcome> {
        self.state
            .lock()
            .outcomes
            .iter()
            .filter(|o| keep(o))
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.state.lock().outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for OutcomeLog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "log_tests.rs"]
mod tests;
