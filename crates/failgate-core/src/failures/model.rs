use serde::{Deserialize, Serialize};

use crate::rules::catalog::Severity;

/// Suite name used when a test case carries no container name.
pub const UNSPECIFIED_SUITE: &str = "<unspecified>";

/// Test name used when a test case carries no `name` attribute.
pub const UNKNOWN_TEST: &str = "<unknown>";

/// Message used when neither body text nor a `message` attribute exists.
pub const NO_MESSAGE: &str = "No failure message provided.";

/// One observed test failure.
///
/// Maps to an entry of the `failed` array in the JSON summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailureRecord {
    pub suite: String,
    pub name: String,
    pub severity: Severity,
    /// Elapsed seconds. Never negative.
    pub time: f64,
    /// Single-line, whitespace-normalized description.
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<String>,
}

impl FailureRecord {
    /// Build a record with default severity and no seed.
    ///
    /// Empty suite/name fall back to their sentinels and the time is clamped
    /// to a finite, non-negative value.
    pub fn new(
        suite: impl Into<String>,
        name: impl Into<String>,
        time: f64,
        message: impl Into<String>,
    ) -> Self {
        let suite = suite.into();
        let name = name.into();
        Self {
            suite: if suite.is_empty() {
                UNSPECIFIED_SUITE.to_string()
            } else {
                suite
            },
            name: if name.is_empty() {
                UNKNOWN_TEST.to_string()
            } else {
                name
            },
            severity: Severity::default(),
            time: sanitize_time(time),
            message: message.into(),
            seed: None,
        }
    }

    pub fn key(&self) -> FailureKey {
        FailureKey {
            suite: self.suite.clone(),
            name: self.name.clone(),
        }
    }
}

/// Identity of a failure for correlation: `(suite, name)`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FailureKey {
    pub suite: String,
    pub name: String,
}

/// Clamp negative, NaN and infinite times to zero.
pub fn sanitize_time(time: f64) -> f64 {
    if time.is_finite() && time > 0.0 {
        time
    } else {
        0.0
    }
}

/// Parse an elapsed-time attribute, defaulting to zero.
pub fn parse_time(raw: Option<&str>) -> f64 {
    raw.and_then(|value| value.trim().parse::<f64>().ok())
        .map(sanitize_time)
        .unwrap_or(0.0)
}
