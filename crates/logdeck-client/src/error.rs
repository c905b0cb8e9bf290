use std::path::PathBuf;

use thiserror::Error;

/// Failures talking to the analysis backend
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to upload data (HTTP {0})")]
    Status(reqwest::StatusCode),

    #[error("could not read {}: {source}", .path.display())]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Ingest input rejected before any request is made
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IngestError {
    #[error("Please select a file")]
    MissingFile,

    #[error("Please paste some logs")]
    EmptyPaste,
}
