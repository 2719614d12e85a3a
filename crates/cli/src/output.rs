// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Console output helpers for errors, warnings and run banners.
//!
//! Progress goes to stdout through the runner's writer. Errors and warnings
//! go to stderr, colored only when stderr is a terminal and `NO_COLOR` is
//! unset.

use std::fmt::Display;
use std::io::{self, IsTerminal, Write};

/// Separator printed before and after each fixture.
pub const RULE: &str =
    "---------------------------------------------------------------------------";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Level {
    Error,
    Warning,
}

impl Level {
    fn label(self) -> &'static str {
        match self {
            Level::Error => "Error",
            Level::Warning => "Warning",
        }
    }

    /// SGR color code
    fn color(self) -> u8 {
        match self {
            Level::Error => 31,
            Level::Warning => 33,
        }
    }
}

pub fn print_error(msg: impl Display) {
    write_tagged(&mut io::stderr(), Level::Error, msg, use_color());
}

pub fn print_warning(msg: impl Display) {
    write_tagged(&mut io::stderr(), Level::Warning, msg, use_color());
}

fn write_tagged<W: Write>(writer: &mut W, level: Level, msg: impl Display, color: bool) {
    let _ = if color {
        writeln!(writer, "\x1b[{}m{}: {}\x1b[0m", level.color(), level.label(), msg)
    } else {
        writeln!(writer, "{}: {}", level.label(), msg)
    };
}

fn use_color() -> bool {
    io::stderr().is_terminal() && !crate::env::no_color()
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
