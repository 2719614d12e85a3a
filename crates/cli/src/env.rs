// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access.
//!
//! Runtime environment variables read outside of clap are defined here.
//! Use these accessors instead of calling `std::env::var()` directly.

/// Generated env var name constants.
mod names {
    include!(concat!(env!("OUT_DIR"), "/env_names.rs"));
}

pub use names::*;

/// `CPSL_VERIFY_COMPILE_TIMEOUT_MS`: Compiler timeout. Unset waits forever.
pub fn compile_timeout_ms() -> Option<u64> {
    var_u64(names::CPSL_VERIFY_COMPILE_TIMEOUT_MS)
}

/// `CPSL_VERIFY_EXECUTE_TIMEOUT_MS`: Simulator timeout. Unset waits forever.
pub fn execute_timeout_ms() -> Option<u64> {
    var_u64(names::CPSL_VERIFY_EXECUTE_TIMEOUT_MS)
}

/// `NO_COLOR`: Disable ANSI colors on stderr when set to any non-empty value.
pub fn no_color() -> bool {
    std::env::var(names::NO_COLOR).is_ok_and(|v| !v.is_empty())
}

fn var_u64(name: &str) -> Option<u64> {
    std::env::var(name).ok().and_then(|v| v.parse().ok())
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
