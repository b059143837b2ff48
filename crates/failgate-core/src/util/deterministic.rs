//! Deterministic ordering helpers.
//!
//! These utilities enforce the stable ordering guarantees of the gate
//! summary. Identical inputs always produce identical outputs, regardless of
//! the order in which failures appeared in the report.

use std::cmp::Ordering;

use crate::failures::model::FailureRecord;

/// Total order over failures: `(severity_rank, suite, name)`.
///
/// Records that tie on all three keys are further ordered by message, time
/// and seed so that shuffled inputs still sort identically.
pub fn failure_order(a: &FailureRecord, b: &FailureRecord) -> Ordering {
    (a.severity.rank(), a.suite.as_str(), a.name.as_str())
        .cmp(&(b.severity.rank(), b.suite.as_str(), b.name.as_str()))
        .then_with(|| a.message.cmp(&b.message))
        .then_with(|| a.time.total_cmp(&b.time))
        .then_with(|| a.seed.cmp(&b.seed))
}

/// Sort failures deterministically by `(severity_rank, suite, name)`.
///
/// This ordering is part of the summary contract and must not change
/// without a schema version bump.
pub fn sort_failures(failures: &mut [FailureRecord]) {
    failures.sort_by(failure_order);
}
