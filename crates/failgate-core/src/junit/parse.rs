//! JUnit XML report parser.
//!
//! Turns a test-results document into raw failure records. Every
//! `<testcase>` carrying a `<failure>` or `<error>` child becomes one record;
//! passing and skipped cases are ignored.
//!
//! The parser is total: a document that cannot be read or parsed yields a
//! single synthetic failure instead of an error, so a broken report always
//! reaches the gate as a failure.

use std::path::Path;

use roxmltree::{Document, Node, ParsingOptions};
use tracing::{debug, warn};

use crate::error::GateError;
use crate::failures::model::{FailureRecord, NO_MESSAGE, parse_time};
use crate::junit::read::read_report;
use crate::report::model::ReportArtifact;
use crate::util::text::{first_nonblank_line, normalize_whitespace};

/// Suite assigned to the synthetic record describing a broken report.
pub const PARSER_SUITE: &str = "<junit>";

/// Why a report could not be turned into failure records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnparsableKind {
    /// The file was read but is not well-formed XML.
    Malformed,
    /// The file is missing or could not be read.
    Unreadable,
}

impl UnparsableKind {
    /// Test name of the synthetic record.
    pub const fn record_name(self) -> &'static str {
        match self {
            Self::Malformed => "invalid-junit-xml",
            Self::Unreadable => "unreadable-junit-xml",
        }
    }

    /// Analysis status reported in the summary.
    pub const fn status(self) -> &'static str {
        match self {
            Self::Malformed => "parse_error",
            Self::Unreadable => "unreadable",
        }
    }
}

/// Result of ingesting a test report.
#[derive(Debug, Clone, PartialEq)]
pub enum ReportOutcome {
    Parsed {
        failures: Vec<FailureRecord>,
    },
    /// The report is unusable. `record` is the synthetic failure that
    /// stands in for it downstream.
    Unparsable {
        kind: UnparsableKind,
        record: FailureRecord,
    },
}

impl ReportOutcome {
    /// Build the failed-to-parse variant with its synthetic record.
    pub fn unparsable(kind: UnparsableKind, detail: impl std::fmt::Display) -> Self {
        let prefix = match kind {
            UnparsableKind::Malformed => "Invalid JUnit XML",
            UnparsableKind::Unreadable => "Failed to read JUnit XML",
        };
        let message = normalize_whitespace(&format!("{prefix}: {detail}"));
        Self::Unparsable {
            kind,
            record: FailureRecord::new(PARSER_SUITE, kind.record_name(), 0.0, message),
        }
    }

    pub fn is_unparsable(&self) -> bool {
        matches!(self, Self::Unparsable { .. })
    }

    pub fn unparsable_kind(&self) -> Option<UnparsableKind> {
        match self {
            Self::Parsed { .. } => None,
            Self::Unparsable { kind, .. } => Some(*kind),
        }
    }

    /// Records to feed into classification: the parsed failures, or exactly
    /// the one synthetic record.
    pub fn into_failures(self) -> Vec<FailureRecord> {
        match self {
            Self::Parsed { failures } => failures,
            Self::Unparsable { record, .. } => vec![record],
        }
    }
}

/// Parse JUnit XML text into failure records.
pub fn parse_junit(xml: &str) -> ReportOutcome {
    // Reports from some runners carry a DOCTYPE; entities are still not
    // fetched from outside the document.
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    let doc = match Document::parse_with_options(xml, options) {
        Ok(doc) => doc,
        Err(e) => {
            warn!(error = %e, "test report is not well-formed");
            return ReportOutcome::unparsable(UnparsableKind::Malformed, e);
        }
    };

    let failures: Vec<FailureRecord> = doc
        .descendants()
        .filter(|node| node.has_tag_name("testcase"))
        .filter_map(failure_from_testcase)
        .collect();

    debug!(failures = failures.len(), "parsed test report");
    ReportOutcome::Parsed { failures }
}

/// Read and parse the report at `path`.
///
/// Returns the outcome and, when the file could be read, its provenance.
pub fn load_report(path: &Path) -> (ReportOutcome, Option<ReportArtifact>) {
    let source = match read_report(path) {
        Ok(source) => source,
        Err(err) => {
            warn!(error = %err, "test report is unreadable");
            let detail = match err {
                GateError::ReportRead { source, .. } => format!("{}: {source}", path.display()),
                other => other.to_string(),
            };
            return (
                ReportOutcome::unparsable(UnparsableKind::Unreadable, detail),
                None,
            );
        }
    };

    let artifact = source.artifact();
    let outcome = match std::str::from_utf8(&source.bytes) {
        Ok(text) => parse_junit(text),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "test report is not valid UTF-8");
            ReportOutcome::unparsable(UnparsableKind::Malformed, e)
        }
    };

    (outcome, Some(artifact))
}

fn failure_from_testcase(testcase: Node<'_, '_>) -> Option<FailureRecord> {
    let indicators: Vec<Node<'_, '_>> = testcase
        .children()
        .filter(|child| child.has_tag_name("failure") || child.has_tag_name("error"))
        .collect();

    if indicators.is_empty() {
        return None;
    }

    let suite = non_empty_attr(testcase, "classname")
        .or_else(|| non_empty_attr(testcase, "class"))
        .or_else(|| {
            testcase
                .ancestors()
                .find(|a| a.has_tag_name("testsuite"))
                .and_then(|a| non_empty_attr(a, "name"))
        })
        .unwrap_or_default();
    let name = non_empty_attr(testcase, "name").unwrap_or_default();
    let time = parse_time(testcase.attribute("time"));
    let message = extract_message(&indicators);

    let record = FailureRecord::new(suite, name, time, message);
    debug!(suite = %record.suite, name = %record.name, "failing test case");
    Some(record)
}

fn non_empty_attr<'a>(node: Node<'a, '_>, attr: &str) -> Option<&'a str> {
    node.attribute(attr)
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

/// First body line across the indicators, else the first `message`
/// attribute, else the placeholder.
fn extract_message(indicators: &[Node<'_, '_>]) -> String {
    let from_body = indicators.iter().find_map(|el| {
        let body: String = el
            .descendants()
            .filter(|n| n.is_text())
            .filter_map(|n| n.text())
            .collect();
        first_nonblank_line(&body).map(str::to_string)
    });

    let from_attr = || {
        indicators
            .iter()
            .filter_map(|el| el.attribute("message"))
            .map(normalize_whitespace)
            .find(|m| !m.is_empty())
    };

    from_body
        .or_else(from_attr)
        .map(|m| normalize_whitespace(&m))
        .unwrap_or_else(|| NO_MESSAGE.to_string())
}
