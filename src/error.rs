//! Error types for the batch boundary.
//!
//! Per-record problems (unparseable dates, extraction misses, malformed
//! fields) never surface here — they degrade to explicit absent markers or
//! sentinels inside the pipeline. These variants cover the file boundary
//! and the CLI only.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum JobtrailError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config file not readable: {0}")]
    ConfigNotReadable(PathBuf),

    #[error("input file not readable: {path}")]
    InputNotReadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid reference date '{0}', expected YYYY-MM-DD")]
    InvalidReferenceDate(String),
}
