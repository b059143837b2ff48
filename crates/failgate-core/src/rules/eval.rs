use serde::{Deserialize, Serialize};

use crate::failures::model::FailureRecord;
use crate::rules::catalog::Severity;

/// Number of failures per severity. All three buckets are always present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateCounts {
    #[serde(rename = "P1")]
    pub p1: usize,
    #[serde(rename = "P2")]
    pub p2: usize,
    #[serde(rename = "P3")]
    pub p3: usize,
}

impl GateCounts {
    pub fn get(&self, severity: Severity) -> usize {
        match severity {
            Severity::P1 => self.p1,
            Severity::P2 => self.p2,
            Severity::P3 => self.p3,
        }
    }

    pub fn increment(&mut self, severity: Severity) {
        let bucket = match severity {
            Severity::P1 => &mut self.p1,
            Severity::P2 => &mut self.p2,
            Severity::P3 => &mut self.p3,
        };
        *bucket = bucket.saturating_add(1);
    }

    pub fn total(&self) -> usize {
        self.p1 + self.p2 + self.p3
    }
}

/// Count failures per severity in a single pass.
pub fn count_by_severity(failures: &[FailureRecord]) -> GateCounts {
    failures.iter().fold(GateCounts::default(), |mut counts, f| {
        counts.increment(f.severity);
        counts
    })
}
