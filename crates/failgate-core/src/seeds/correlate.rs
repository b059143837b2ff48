//! Seed correlator.
//!
//! Attaches a reproduction seed to a failure when a seed mention in the log
//! sits next to a line naming the failing test or its suite.
//!
//! For every seed occurrence the context window is the matched line plus
//! its immediate neighbours. An occurrence is a candidate for a failure when
//! the failure's name, or its suite, appears in any window line. The
//! latest candidate in the log wins. Failures without a candidate get no
//! seed.
//!
//! The correlation is a pure function of the log text and the failure keys:
//! log lines are visited in document order, keys in input order, and the
//! result is an ordered map.

use std::collections::BTreeMap;

use tracing::debug;

use crate::failures::model::{FailureKey, FailureRecord};
use crate::seeds::patterns::{SeedOccurrence, scan_seeds};

/// Map each failure key to its best-guess seed.
pub fn correlate_seeds(log: &str, keys: &[FailureKey]) -> BTreeMap<FailureKey, String> {
    let lines: Vec<&str> = log.lines().collect();
    let occurrences = scan_seeds(&lines);
    debug!(occurrences = occurrences.len(), "scanned log for seeds");

    let mut seeds = BTreeMap::new();
    if occurrences.is_empty() {
        return seeds;
    }

    for key in keys {
        // Occurrences are ascending by line; the last candidate is the latest.
        let latest = occurrences
            .iter()
            .rev()
            .find(|occurrence| window_mentions(&lines, occurrence, key));

        if let Some(occurrence) = latest {
            debug!(
                suite = %key.suite,
                name = %key.name,
                seed = %occurrence.seed,
                line = occurrence.line_index + 1,
                "correlated seed"
            );
            seeds.insert(key.clone(), occurrence.seed.clone());
        }
    }

    seeds
}

/// Enrich records with correlated seeds without reordering them.
pub fn attach_seeds(failures: &mut [FailureRecord], seeds: &BTreeMap<FailureKey, String>) {
    for failure in failures.iter_mut() {
        if let Some(seed) = seeds.get(&failure.key()) {
            failure.seed = Some(seed.clone());
        }
    }
}

fn window_mentions(lines: &[&str], occurrence: &SeedOccurrence, key: &FailureKey) -> bool {
    let start = occurrence.line_index.saturating_sub(1);
    let end = (occurrence.line_index + 1).min(lines.len().saturating_sub(1));
    let window = &lines[start..=end];

    let mentions =
        |needle: &str| !needle.is_empty() && window.iter().any(|line| line.contains(needle));
    mentions(key.name.as_str()) || mentions(key.suite.as_str())
}
