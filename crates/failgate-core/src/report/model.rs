use serde::{Deserialize, Serialize};

use crate::SCHEMA_VERSION;
use crate::failures::model::FailureRecord;
use crate::junit::parse::UnparsableKind;
use crate::rules::classify::GateDecision;
use crate::rules::eval::GateCounts;

/// Top-level gate summary.
///
/// This struct is the machine-readable JSON contract of the gate.
/// It must remain deterministic for identical inputs, `meta.generated_at`
/// excepted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Summary {
    pub schema_version: String,
    pub tool: ToolInfo,
    pub gate_status: GateDecision,
    pub counts: GateCounts,
    /// Failures in deterministic `(severity, suite, name)` order.
    pub failed: Vec<FailureRecord>,
    pub meta: RunMeta,
    pub report: Option<ReportArtifact>,
    pub analysis: AnalysisInfo,
}

impl Summary {
    /// Assemble a summary from pipeline outputs.
    ///
    /// Assumes `failed` is already sorted.
    pub fn new(
        tool: ToolInfo,
        gate_status: GateDecision,
        counts: GateCounts,
        failed: Vec<FailureRecord>,
        meta: RunMeta,
        report: Option<ReportArtifact>,
        analysis: AnalysisInfo,
    ) -> Self {
        Self {
            schema_version: SCHEMA_VERSION.to_string(),
            tool,
            gate_status,
            counts,
            failed,
            meta,
            report,
            analysis,
        }
    }
}

/// Tool metadata.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ToolInfo {
    pub name: String,
    pub version: String,
}

/// CI run metadata. Values are opaque; absent ones are empty strings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RunMeta {
    pub sha: String,
    #[serde(rename = "ref")]
    pub git_ref: String,
    pub run_id: String,
    /// RFC 3339 UTC timestamp of summary generation.
    pub generated_at: String,
}

impl RunMeta {
    /// Build metadata stamped with the current UTC time.
    pub fn now(
        sha: impl Into<String>,
        git_ref: impl Into<String>,
        run_id: impl Into<String>,
    ) -> Self {
        Self {
            sha: sha.into(),
            git_ref: git_ref.into(),
            run_id: run_id.into(),
            generated_at: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
        }
    }
}

/// Provenance of the parsed test report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReportArtifact {
    pub path: String,
    pub size_bytes: u64,
    pub hash: ReportHash,
}

/// Cryptographic fingerprint of the report bytes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReportHash {
    pub algorithm: String,
    pub value: String,
}

/// Ingestion status and deterministic warnings.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AnalysisInfo {
    pub status: String,
    pub warnings: Vec<String>,
}

impl AnalysisInfo {
    pub fn ok() -> Self {
        Self {
            status: "ok".into(),
            warnings: vec![],
        }
    }

    pub fn unparsable(kind: UnparsableKind, msg: impl Into<String>) -> Self {
        Self {
            status: kind.status().into(),
            warnings: vec![msg.into()],
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}
