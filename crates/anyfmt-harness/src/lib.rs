//! Conformance harness for anyfmt.
//!
//! This crate provides:
//! - Fixtures: JSON sets of `(template, typed args, expected)` cases
//! - Runner: execute fixtures through the engine under legacy or strict options
//! - Verification summaries, text diffs and markdown/JSON reports
//! - Structured JSONL logging with an artifact index

#![forbid(unsafe_code)]

pub mod diff;
pub mod error;
pub mod fixtures;
pub mod report;
pub mod runner;
pub mod structured_log;
pub mod verify;

pub use error::HarnessError;
pub use fixtures::{FixtureArg, FixtureCase, FixtureSet};
pub use report::ConformanceReport;
pub use runner::{RunMode, TestRunner};
pub use verify::{VerificationResult, VerificationSummary};
