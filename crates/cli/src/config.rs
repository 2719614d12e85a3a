// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Harness configuration.
//!
//! Values are layered: built-in defaults, then an optional TOML file, then
//! environment variables, then command-line flags.

use crate::cli::Cli;
use crate::fixture::FixtureLayout;
use crate::normalize::{NormalizationRule, Normalizer};
use cpsl_verify_compare::{Framing, MismatchMode};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default compiler location, relative to the working directory
pub const DEFAULT_COMPILER_PATH: &str = "../../cpsl";
/// Artifact the compiler leaves in the working directory
pub const DEFAULT_ARTIFACT: &str = "out.asm";

/// Errors that can occur when loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("{0} timeout must be positive, got 0")]
    InvalidTimeout(&'static str),

    #[error("{0} must not be empty")]
    EmptyField(&'static str),

    #[error("invalid normalization pattern: {0}")]
    InvalidRegex(#[from] regex::Error),
}

/// Top-level harness configuration
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct HarnessConfig {
    /// Directory the compiler and simulator run in (default: current directory)
    pub work_dir: Option<PathBuf>,

    /// Positional mismatch reporting; `--all-mismatches` forces `all`
    pub mismatch_mode: MismatchMode,

    /// Fixture locations and naming
    pub layout: FixtureLayout,

    /// Compiler collaborator
    pub compiler: CompilerConfig,

    /// Simulator collaborator
    pub simulator: SimulatorConfig,

    /// Rules applied to both outputs before comparison
    pub normalization_rules: Vec<NormalizationRule>,
}

/// Compiler collaborator configuration
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct CompilerConfig {
    /// Compiler executable
    pub path: PathBuf,

    /// Timeout in milliseconds (default: wait forever)
    pub timeout_ms: Option<u64>,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_COMPILER_PATH),
            timeout_ms: None,
        }
    }
}

/// Simulator collaborator configuration.
///
/// The simulator is invoked as
/// `<launcher> <launcher_args...> <simulator path> <artifact>` with
/// `<env_var>=<env_value>` added to its environment.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct SimulatorConfig {
    pub launcher: String,
    pub launcher_args: Vec<String>,
    pub artifact: String,
    pub env_var: String,
    pub env_value: String,

    /// Timeout in milliseconds (default: wait forever)
    pub timeout_ms: Option<u64>,

    /// Console banner lines around program output
    pub framing: Framing,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            launcher: "java".to_string(),
            launcher_args: vec!["-jar".to_string()],
            artifact: DEFAULT_ARTIFACT.to_string(),
            env_var: "JAVA_OPTS".to_string(),
            env_value: "cpslmars".to_string(),
            timeout_ms: None,
            framing: Framing::default(),
        }
    }
}

impl HarnessConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&content)?)
    }

    /// Build the effective configuration for a CLI invocation
    pub fn resolve(cli: &Cli) -> Result<Self, ConfigError> {
        let mut config = match &cli.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        config.apply_env();
        config.apply_cli(cli);
        config.validate()?;
        Ok(config)
    }

    fn apply_env(&mut self) {
        if let Some(ms) = crate::env::compile_timeout_ms() {
            self.compiler.timeout_ms = Some(ms);
        }
        if let Some(ms) = crate::env::execute_timeout_ms() {
            self.simulator.timeout_ms = Some(ms);
        }
    }

    /// Overlay command-line flags.
    ///
    /// A compiler path typed on the command line is relative to the
    /// invocation directory, so it is made absolute when the toolchain runs
    /// elsewhere. Bare names still go through `PATH`.
    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(ref path) = cli.cpslpath {
            self.compiler.path = match self.work_dir {
                Some(_) if path.components().count() > 1 => invocation_relative(path),
                _ => path.clone(),
            };
        }
        if let Some(ref root) = cli.root {
            self.layout.source_root = root.clone();
        }
        if let Some(ref dir) = cli.expected_dir {
            self.layout.expected_dir = dir.clone();
        }
        if let Some(ms) = cli.compile_timeout_ms {
            self.compiler.timeout_ms = Some(ms);
        }
        if let Some(ms) = cli.execute_timeout_ms {
            self.simulator.timeout_ms = Some(ms);
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.compiler.timeout_ms == Some(0) {
            return Err(ConfigError::InvalidTimeout("compiler"));
        }
        if self.simulator.timeout_ms == Some(0) {
            return Err(ConfigError::InvalidTimeout("simulator"));
        }
        if self.compiler.path.as_os_str().is_empty() {
            return Err(ConfigError::EmptyField("compiler.path"));
        }
        if self.simulator.launcher.is_empty() {
            return Err(ConfigError::EmptyField("simulator.launcher"));
        }
        if self.simulator.artifact.is_empty() {
            return Err(ConfigError::EmptyField("simulator.artifact"));
        }
        if self.layout.source_extension.is_empty() {
            return Err(ConfigError::EmptyField("layout.source_extension"));
        }
        if self.layout.expected_suffix.is_empty() {
            return Err(ConfigError::EmptyField("layout.expected_suffix"));
        }
        self.normalizer()?;
        Ok(())
    }

    /// Compile the configured normalization rules
    pub fn normalizer(&self) -> Result<Normalizer, ConfigError> {
        Ok(Normalizer::new(&self.normalization_rules)?)
    }
}

/// Anchor a relative path to the current directory
pub(crate) fn invocation_relative(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
