//! Harness error type.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid argument literal '{literal}': {reason}")]
    BadArgument { literal: String, reason: String },
    #[error("unknown mode '{0}', expected legacy|strict")]
    UnknownMode(String),
    #[error("no fixture JSON files found in {}", .0.display())]
    NoFixtures(PathBuf),
}
