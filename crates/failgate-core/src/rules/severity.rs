//! Severity classifier.
//!
//! A failing test is tagged `P1`, `P2` or `P3` by an embedded marker token in
//! its name or, failing that, in its suite name. Markers match as whole
//! tokens, optionally bracketed (`[P1]`), in any case. Absent a marker the
//! failure is `P2`.

use std::sync::LazyLock;

use regex::Regex;

use crate::failures::model::FailureRecord;
use crate::rules::catalog::Severity;

static SEVERITY_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\[?\b(P[123])\b\]?").expect("severity marker pattern is valid")
});

/// Return the first marker found in `name`, then in `suite`.
///
/// The test name wins when both carry different markers.
pub fn detect_severity(name: &str, suite: &str) -> Severity {
    [name, suite]
        .into_iter()
        .filter(|candidate| !candidate.is_empty())
        .find_map(|candidate| {
            SEVERITY_MARKER
                .captures(candidate)
                .and_then(|caps| caps.get(1))
                .and_then(|m| Severity::from_marker(m.as_str()))
        })
        .unwrap_or_default()
}

/// Assign a severity to every record in place.
pub fn classify_all(failures: &mut [FailureRecord]) {
    for failure in failures.iter_mut() {
        failure.severity = detect_severity(&failure.name, &failure.suite);
    }
}
