//! Analysis backend client for logdeck
//!
//! This crate talks to the `/analyse` endpoint that turns raw log text into
//! structured entries, and validates ingest input before anything is sent.

mod client;
mod error;
mod ingest;

pub use client::{ANALYSIS_PROMPT, AnalyseClient, AnalyseResponse, DEFAULT_BACKEND_URL};
pub use error::{ClientError, IngestError};
pub use ingest::{IngestForm, IngestMode, IngestPayload};

// Re-export types that are used in our public API
pub use logdeck_types::LogEntry;
