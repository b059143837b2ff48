use sha2::{Digest, Sha256};
use std::{fs, path::Path};

use crate::error::{GateError, Result};
use crate::report::model::{ReportArtifact, ReportHash};

/// Raw test report as read from disk.
///
/// Holds the exact bytes parsed and a fingerprint that identifies the
/// report in the summary.
#[derive(Debug, Clone)]
pub struct ReportSource {
    /// Source path (informational only).
    pub path: String,

    /// Exact bytes read from disk.
    pub bytes: Vec<u8>,

    pub size_bytes: u64,

    pub hash_alg: String,

    /// Hex-encoded SHA-256 of the report bytes.
    pub hash_hex: String,
}

impl ReportSource {
    /// Report-facing provenance, without the raw bytes.
    pub fn artifact(&self) -> ReportArtifact {
        ReportArtifact {
            path: self.path.clone(),
            size_bytes: self.size_bytes,
            hash: ReportHash {
                algorithm: self.hash_alg.clone(),
                value: self.hash_hex.clone(),
            },
        }
    }
}

/// Read a test report and fingerprint its bytes.
///
/// The fingerprint depends only on the file contents.
pub fn read_report(path: &Path) -> Result<ReportSource> {
    let bytes = fs::read(path).map_err(|source| GateError::ReportRead {
        path: path.to_path_buf(),
        source,
    })?;

    let digest = Sha256::digest(&bytes);

    Ok(ReportSource {
        path: path.display().to_string(),
        size_bytes: bytes.len() as u64,
        bytes,
        hash_alg: "sha256".to_string(),
        hash_hex: hex::encode(digest),
    })
}

/// Read an execution log, replacing invalid UTF-8 sequences.
pub fn read_log(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|source| GateError::LogRead {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
