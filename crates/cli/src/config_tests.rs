// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;
use clap::Parser;
use std::io::Write;

fn cli(args: &[&str]) -> Cli {
    let mut argv = vec!["cpsl-verify", "Mars.jar"];
    argv.extend_from_slice(args);
    Cli::try_parse_from(argv).unwrap()
}

fn write_config(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn defaults_match_reference_harness() {
    let config = HarnessConfig::default();
    assert_eq!(config.compiler.path, PathBuf::from("../../cpsl"));
    assert_eq!(config.compiler.timeout_ms, None);
    assert_eq!(config.simulator.launcher, "java");
    assert_eq!(config.simulator.launcher_args, vec!["-jar".to_string()]);
    assert_eq!(config.simulator.artifact, "out.asm");
    assert_eq!(config.simulator.env_var, "JAVA_OPTS");
    assert_eq!(config.simulator.env_value, "cpslmars");
    assert_eq!(config.simulator.framing, Framing::new(2, 1));
    assert_eq!(config.layout, FixtureLayout::default());
    assert!(config.normalization_rules.is_empty());
    assert_eq!(config.mismatch_mode, MismatchMode::First);
    assert!(config.validate().is_ok());
}

#[test]
fn deserialize_minimal_config() {
    let config: HarnessConfig = toml::from_str("").unwrap();
    assert_eq!(config, HarnessConfig::default());
}

#[test]
fn deserialize_full_config() {
    let config: HarnessConfig = toml::from_str(
        r#"
        work_dir = "build"
        mismatch_mode = "all"

        [layout]
        source_root = "programs"
        expected_dir = "golden"

        [compiler]
        path = "/usr/local/bin/cpsl"
        timeout_ms = 5000

        [simulator]
        launcher = "sh"
        launcher_args = []
        artifact = "prog.asm"
        timeout_ms = 10000

        [simulator.framing]
        header_lines = 1
        footer_lines = 0

        [[normalization_rules]]
        type = "trim_trailing_whitespace"
        "#,
    )
    .unwrap();
    assert_eq!(config.work_dir, Some(PathBuf::from("build")));
    assert_eq!(config.mismatch_mode, MismatchMode::All);
    assert_eq!(config.layout.source_root, PathBuf::from("programs"));
    assert_eq!(config.layout.source_extension, "cpsl");
    assert_eq!(config.compiler.timeout_ms, Some(5000));
    assert_eq!(config.simulator.launcher, "sh");
    assert!(config.simulator.launcher_args.is_empty());
    assert_eq!(config.simulator.env_var, "JAVA_OPTS");
    assert_eq!(config.simulator.framing, Framing::new(1, 0));
    assert_eq!(
        config.normalization_rules,
        vec![NormalizationRule::TrimTrailingWhitespace]
    );
}

#[test]
fn unknown_fields_are_rejected() {
    let result: Result<HarnessConfig, _> = toml::from_str("[compiler]\nbinary = \"cpsl\"");
    assert!(result.is_err());
}

#[test]
fn load_reports_missing_file() {
    let err = HarnessConfig::load(Path::new("/nonexistent/harness.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
    assert!(err.to_string().contains("harness.toml"));
}

#[test]
fn load_reports_bad_toml() {
    let file = write_config("[compiler\n");
    let err = HarnessConfig::load(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Toml(_)));
}

#[test]
fn cli_flags_override_file_values() {
    let file = write_config(
        r#"
        [compiler]
        path = "from-file"
        timeout_ms = 1000
        "#,
    );
    let mut config = HarnessConfig::load(file.path()).unwrap();
    config.apply_cli(&cli(&[
        "-c",
        "from-cli",
        "--root",
        "r",
        "--expected-dir",
        "e",
        "--compile-timeout-ms",
        "50",
        "--execute-timeout-ms",
        "60",
    ]));
    assert_eq!(config.compiler.path, PathBuf::from("from-cli"));
    assert_eq!(config.compiler.timeout_ms, Some(50));
    assert_eq!(config.simulator.timeout_ms, Some(60));
    assert_eq!(config.layout.source_root, PathBuf::from("r"));
    assert_eq!(config.layout.expected_dir, PathBuf::from("e"));
}

#[test]
fn absent_cli_flags_keep_file_values() {
    let mut config = HarnessConfig {
        compiler: CompilerConfig {
            path: PathBuf::from("kept"),
            timeout_ms: Some(7),
        },
        ..HarnessConfig::default()
    };
    config.apply_cli(&cli(&[]));
    assert_eq!(config.compiler.path, PathBuf::from("kept"));
    assert_eq!(config.compiler.timeout_ms, Some(7));
}

#[test]
fn zero_timeout_is_invalid() {
    let mut config = HarnessConfig::default();
    config.simulator.timeout_ms = Some(0);
    let err = config.validate().unwrap_err();
    assert!(matches!(err, ConfigError::InvalidTimeout("simulator")));
}

#[test]
fn empty_suffix_is_invalid() {
    let mut config = HarnessConfig::default();
    config.layout.expected_suffix.clear();
    assert!(matches!(
        config.validate(),
        Err(ConfigError::EmptyField("layout.expected_suffix"))
    ));
}

#[test]
fn bad_normalization_pattern_is_invalid() {
    let config = HarnessConfig {
        normalization_rules: vec![NormalizationRule::Replace {
            pattern: "[".to_string(),
            replacement: String::new(),
        }],
        ..HarnessConfig::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidRegex(_))
    ));
}

#[test]
fn cli_compiler_path_is_anchored_when_work_dir_is_set() {
    let mut config = HarnessConfig {
        work_dir: Some(PathBuf::from("/tmp/cpsl-work")),
        ..HarnessConfig::default()
    };
    config.apply_cli(&cli(&["-c", "bin/cpsl"]));
    assert!(config.compiler.path.is_absolute());
    assert_eq!(
        config.compiler.path,
        std::path::absolute("bin/cpsl").unwrap()
    );
}

#[test]
fn cli_compiler_bare_name_and_file_paths_stay_relative() {
    let mut config = HarnessConfig {
        work_dir: Some(PathBuf::from("/tmp/cpsl-work")),
        ..HarnessConfig::default()
    };
    config.apply_cli(&cli(&[]));
    assert_eq!(config.compiler.path, PathBuf::from(DEFAULT_COMPILER_PATH));

    config.apply_cli(&cli(&["-c", "cpsl"]));
    assert_eq!(config.compiler.path, PathBuf::from("cpsl"));
}

#[test]
fn cli_compiler_path_untouched_without_work_dir() {
    let mut config = HarnessConfig::default();
    config.apply_cli(&cli(&["-c", "bin/cpsl"]));
    assert_eq!(config.compiler.path, PathBuf::from("bin/cpsl"));
}
