// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! External compiler and simulator collaborators.
//!
//! Both run as child processes in the configured working directory. Each call
//! blocks the run until the process exits or, when a timeout is configured,
//! until the timeout elapses and the process is killed.

use crate::config::{invocation_relative, CompilerConfig, HarnessConfig, SimulatorConfig};
use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::process::{Output, Stdio};
use std::time::Duration;
use thiserror::Error;
use tokio::process::Command;

/// Boxed future returned by [`Toolchain`] methods
pub type ToolchainFuture<'a, T> =
    Pin<Box<dyn Future<Output = Result<T, ToolchainError>> + Send + 'a>>;

/// Result of a compile attempt that ran to completion
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CompileOutcome {
    /// The compiler printed nothing and exited successfully
    Compiled,
    /// The compiler reported an error
    Rejected(String),
}

/// Errors raised by collaborators
#[derive(Debug, Error)]
pub enum ToolchainError {
    #[error("cpsl does not exist at {}. Did you forget to build the compiler?", .0.display())]
    MissingCompiler(PathBuf),

    #[error("Failed to spawn {program}: {message}")]
    Spawn { program: String, message: String },

    #[error("{program} I/O error: {message}")]
    Io { program: String, message: String },

    #[error("{program} timed out after {timeout_ms}ms")]
    Timeout { program: String, timeout_ms: u64 },

    #[error("{program} exited with non-zero status (code: {code:?}): {stderr}")]
    NonZeroExit {
        program: String,
        code: Option<i32>,
        stderr: String,
    },
}

impl ToolchainError {
    /// Whether the error must abort the whole run rather than one fixture
    pub fn is_fatal(&self) -> bool {
        matches!(self, ToolchainError::MissingCompiler(_))
    }
}

/// Compiler and simulator pair used by the runner
pub trait Toolchain: Send + Sync {
    /// Check that the compiler can be found before any fixture runs
    fn preflight(&self) -> Result<(), ToolchainError> {
        Ok(())
    }

    /// Compile one source program
    fn compile<'a>(&'a self, source: &'a Path) -> ToolchainFuture<'a, CompileOutcome>;

    /// Run the last compiled artifact and return its raw standard output
    fn execute(&self) -> ToolchainFuture<'_, String>;
}

/// Toolchain backed by real processes
#[derive(Clone, Debug)]
pub struct ProcessToolchain {
    compiler: CompilerConfig,
    simulator: SimulatorConfig,
    simulator_path: PathBuf,
    work_dir: Option<PathBuf>,
}

impl ProcessToolchain {
    /// `simulator_path` is relative to the invocation directory, not `work_dir`
    pub fn new(config: &HarnessConfig, simulator_path: impl Into<PathBuf>) -> Self {
        let simulator_path = simulator_path.into();
        let simulator_path = match config.work_dir {
            Some(_) => invocation_relative(&simulator_path),
            None => simulator_path,
        };
        Self {
            compiler: config.compiler.clone(),
            simulator: config.simulator.clone(),
            simulator_path,
            work_dir: config.work_dir.clone(),
        }
    }

    /// Compiler path as seen from the working directory
    fn resolved_compiler(&self) -> PathBuf {
        match &self.work_dir {
            Some(dir) if self.compiler.path.is_relative() => dir.join(&self.compiler.path),
            _ => self.compiler.path.clone(),
        }
    }

    fn command(&self, program: impl AsRef<std::ffi::OsStr>) -> Command {
        let mut cmd = Command::new(program);
        if let Some(ref dir) = self.work_dir {
            cmd.current_dir(dir);
        }
        cmd
    }

    async fn run_compiler(&self, source: &Path) -> Result<CompileOutcome, ToolchainError> {
        // Sources are discovered relative to the invocation directory.
        let source = match self.work_dir {
            Some(_) => std::path::absolute(source).map_err(|e| ToolchainError::Io {
                program: "cpsl".to_string(),
                message: e.to_string(),
            })?,
            None => source.to_path_buf(),
        };

        let mut cmd = self.command(&self.compiler.path);
        cmd.arg(&source);
        let output = match run(cmd, "cpsl", self.compiler.timeout_ms).await {
            Err(ToolchainError::Spawn { .. }) if !self.resolved_compiler().exists() => {
                return Err(ToolchainError::MissingCompiler(self.compiler.path.clone()))
            }
            other => other?,
        };

        let stdout = String::from_utf8_lossy(&output.stdout);
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let message = [stdout.trim_end(), stderr.trim_end()]
                .iter()
                .filter(|s| !s.is_empty())
                .copied()
                .collect::<Vec<_>>()
                .join("\n");
            return Ok(CompileOutcome::Rejected(match output.status.code() {
                Some(code) if message.is_empty() => format!("exited with status {}", code),
                _ if message.is_empty() => "terminated by signal".to_string(),
                _ => message,
            }));
        }
        if stdout.is_empty() {
            return Ok(CompileOutcome::Compiled);
        }
        let message = stdout.trim_end();
        Ok(CompileOutcome::Rejected(if message.is_empty() {
            // Whitespace-only output still rejects; show what was printed.
            format!("{:?}", stdout)
        } else {
            message.to_string()
        }))
    }

    async fn run_simulator(&self) -> Result<String, ToolchainError> {
        let mut cmd = self.command(&self.simulator.launcher);
        cmd.args(&self.simulator.launcher_args)
            .arg(&self.simulator_path)
            .arg(&self.simulator.artifact)
            .env(&self.simulator.env_var, &self.simulator.env_value);

        let program = self.simulator.launcher.as_str();
        let output = run(cmd, program, self.simulator.timeout_ms).await?;
        if !output.status.success() {
            return Err(ToolchainError::NonZeroExit {
                program: program.to_string(),
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim_end().to_string(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl Toolchain for ProcessToolchain {
    fn preflight(&self) -> Result<(), ToolchainError> {
        // A bare name is looked up on PATH at spawn time instead.
        if self.compiler.path.components().count() > 1 && !self.resolved_compiler().exists() {
            return Err(ToolchainError::MissingCompiler(self.compiler.path.clone()));
        }
        Ok(())
    }

    fn compile<'a>(&'a self, source: &'a Path) -> ToolchainFuture<'a, CompileOutcome> {
        Box::pin(self.run_compiler(source))
    }

    fn execute(&self) -> ToolchainFuture<'_, String> {
        Box::pin(self.run_simulator())
    }
}

/// Spawn a process and collect its output, killing it after `timeout_ms`
async fn run(
    mut cmd: Command,
    program: &str,
    timeout_ms: Option<u64>,
) -> Result<Output, ToolchainError> {
    let child = cmd
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|e| ToolchainError::Spawn {
            program: program.to_string(),
            message: e.to_string(),
        })?;

    let io_error = |e: std::io::Error| ToolchainError::Io {
        program: program.to_string(),
        message: e.to_string(),
    };

    match timeout_ms {
        Some(ms) => {
            match tokio::time::timeout(Duration::from_millis(ms), child.wait_with_output()).await {
                Ok(result) => result.map_err(io_error),
                // kill_on_drop(true) kills the process when the child handle is dropped here
                Err(_) => Err(ToolchainError::Timeout {
                    program: program.to_string(),
                    timeout_ms: ms,
                }),
            }
        }
        None => child.wait_with_output().await.map_err(io_error),
    }
}

#[cfg(test)]
#[path = "toolchain_tests.rs"]
mod tests;
