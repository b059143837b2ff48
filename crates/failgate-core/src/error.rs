use std::path::PathBuf;

use thiserror::Error;

/// Errors raised at the I/O boundary of the gate.
///
/// The evaluation pipeline itself never fails: report problems become a
/// synthetic failure and missing data resolves to defaults. These variants
/// surface only where a caller reads or writes files directly.
#[derive(Debug, Error)]
pub enum GateError {
    #[error("failed to read test report {}: {source}", .path.display())]
    ReportRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read execution log {}: {source}", .path.display())]
    LogRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {artifact} to {}: {source}", .path.display())]
    Write {
        artifact: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize summary: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GateError>;
