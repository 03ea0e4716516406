//! # fmtscan-harness
//!
//! Conformance tooling for the fmtscan scanner engine: JSON fixture sets,
//! a fixture runner producing verification results, and a JSONL
//! structured-log emitter. The `harness` binary exposes `verify` and
//! `scan` subcommands.

use thiserror::Error;

pub mod fixtures;
pub mod runner;
pub mod structured_log;

/// Harness-level failures (distinct from scan verdicts: a fixture case
/// that merely fails verification is a result, not an error).
#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("fixture json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("scan destination contract: {0}")]
    Scan(#[from] fmtscan_core::ScanError),
}
