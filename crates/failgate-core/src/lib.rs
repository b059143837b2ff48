pub mod config;
pub mod error;
pub mod failures;
pub mod junit;
pub mod report;
pub mod rules;
pub mod seeds;
pub mod util;

use std::path::Path;

use tracing::{info, warn};

use crate::failures::model::{FailureKey, FailureRecord};
use crate::junit::parse::{ReportOutcome, load_report};
use crate::junit::read::read_log;
use crate::report::model::{AnalysisInfo, RunMeta, Summary, ToolInfo};
use crate::rules::classify::{GateDecision, decide};
use crate::rules::eval::{GateCounts, count_by_severity};
use crate::rules::severity::classify_all;
use crate::seeds::{attach_seeds, correlate_seeds};
use crate::util::deterministic::sort_failures;

pub const TOOL_NAME: &str = "failgate";

/// JSON schema version of gate summaries.
/// Bump only when the summary layout changes semantically.
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Result of running the gate pipeline over one report.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    /// Failures in deterministic `(severity, suite, name)` order.
    pub failures: Vec<FailureRecord>,
    pub counts: GateCounts,
    /// Verdict of the gate policy applied to `counts`.
    pub decision: GateDecision,
    /// Final status: `decision`, forced to fail when the report was unusable.
    pub gate_status: GateDecision,
    pub analysis: AnalysisInfo,
}

/// Run classification, seed correlation, aggregation and the gate decision.
///
/// Stages run strictly in that order. The decision is taken only after all
/// counts are final, and an unparsable report always ends in `Fail`.
pub fn evaluate(outcome: ReportOutcome, log: Option<&str>) -> Evaluation {
    let mut analysis = match &outcome {
        ReportOutcome::Parsed { .. } => AnalysisInfo::ok(),
        ReportOutcome::Unparsable { kind, record } => {
            AnalysisInfo::unparsable(*kind, record.message.clone())
        }
    };
    let unparsable = outcome.is_unparsable();
    let mut failures = outcome.into_failures();

    classify_all(&mut failures);

    if let Some(log) = log.filter(|text| !text.is_empty()) {
        let keys: Vec<FailureKey> = failures.iter().map(FailureRecord::key).collect();
        let seeds = correlate_seeds(log, &keys);
        attach_seeds(&mut failures, &seeds);
    }

    sort_failures(&mut failures);
    let counts = count_by_severity(&failures);
    let decision = decide(&counts);

    let gate_status = if unparsable {
        GateDecision::Fail
    } else {
        decision
    };

    analysis.warnings.sort();

    info!(
        failures = failures.len(),
        p1 = counts.p1,
        p2 = counts.p2,
        p3 = counts.p3,
        gate = %gate_status,
        "gate evaluated"
    );

    Evaluation {
        failures,
        counts,
        decision,
        gate_status,
        analysis,
    }
}

/// Read the report (and optional log) from disk and build the summary.
///
/// Never fails: an unusable report becomes a synthetic failure, and a
/// missing or unreadable log only adds a warning.
pub fn summarize(junit: &Path, log: Option<&Path>, tool: ToolInfo, meta: RunMeta) -> Summary {
    let (outcome, artifact) = load_report(junit);

    let mut log_warning = None;
    let log_text = log.and_then(|path| match read_log(path) {
        Ok(text) => Some(text),
        Err(err) => {
            warn!(error = %err, "continuing without seed correlation");
            log_warning = Some(err.to_string());
            None
        }
    });

    let mut evaluation = evaluate(outcome, log_text.as_deref());
    if let Some(warning) = log_warning {
        evaluation.analysis.warnings.push(warning);
        evaluation.analysis.warnings.sort();
    }

    Summary::new(
        tool,
        evaluation.gate_status,
        evaluation.counts,
        evaluation.failures,
        meta,
        artifact,
        evaluation.analysis,
    )
}
