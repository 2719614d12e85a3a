// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Line-sequence comparison for cpsl-verify.
//!
//! This crate reconciles a program's captured output with its expected-output
//! fixture. Equal-length sequences are compared position by position; when the
//! lengths differ, every line of the longer sequence is classified against the
//! shorter one using multiset matching.

mod comparator;
mod diagnostic;
mod discrepancy;
mod sequence;
mod unified;

pub use comparator::{compare, CompareOptions, MismatchMode, Verdict};
pub use diagnostic::Diagnostic;
pub use discrepancy::{report, DiscrepancyMode};
pub use sequence::{Framing, LineSequence, LoadError};
pub use unified::unified_diff;
