// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! cpsl-verify binary entry point.

use std::io::Write;

use clap::Parser;

use cpsl_verify::capture::OutcomeLog;
use cpsl_verify::cli::{Cli, RunSettings};
use cpsl_verify::config::HarnessConfig;
use cpsl_verify::output::{print_error, print_warning};
use cpsl_verify::report::exit_codes;
use cpsl_verify::runner::Runner;
use cpsl_verify::toolchain::ProcessToolchain;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    let config = match HarnessConfig::resolve(&cli) {
        Ok(config) => config,
        Err(e) => {
            print_error(e);
            std::process::exit(exit_codes::FATAL);
        }
    };
    let normalizer = match config.normalizer() {
        Ok(normalizer) => normalizer,
        Err(e) => {
            print_error(e);
            std::process::exit(exit_codes::FATAL);
        }
    };

    let toolchain = ProcessToolchain::new(&config, &cli.marspath);
    let settings = RunSettings::resolve(&cli, &config);
    let mut runner = Runner::new(toolchain, config.layout.clone(), settings)
        .with_framing(config.simulator.framing)
        .with_normalizer(normalizer);

    if let Some(ref path) = cli.record {
        match OutcomeLog::with_file(path) {
            Ok(log) => runner = runner.with_log(log),
            Err(e) => {
                print_error(format_args!("Failed to open {}: {}", path.display(), e));
                std::process::exit(exit_codes::FATAL);
            }
        }
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let report = match runner.run(&mut out).await {
        Ok(report) => report,
        Err(e) => {
            let _ = out.flush();
            print_error(e);
            std::process::exit(exit_codes::FATAL);
        }
    };

    if report.is_empty() {
        print_warning(format_args!(
            "No .{} files found under {}",
            config.layout.source_extension,
            config.layout.source_root.display()
        ));
    }

    let _ = write!(out, "{}", report.render());
    let _ = out.flush();
    std::process::exit(report.exit_code());
}
