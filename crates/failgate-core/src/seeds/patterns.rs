use std::sync::LazyLock;

use regex::Regex;

/// Seed phrasings, most specific first. Only the first pattern that matches
/// a line is used. Seeds shorter than four digits are ignored so that
/// incidental small numbers are not mistaken for seeds.
static SEED_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)minimal failing.*?seed\s*[:=]\s*(\d{4,})",
        r"--seed(?:=|\s+)(\d{4,})",
        r"(?i)seed\s*[:=]\s*(\d{4,})",
    ]
    .into_iter()
    .map(|pattern| Regex::new(pattern).expect("seed pattern is valid"))
    .collect()
});

/// A seed found on a given line of the log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedOccurrence {
    /// Zero-based line number within the log.
    pub line_index: usize,
    pub seed: String,
}

/// Extract the seed mentioned on a single line, if any.
pub fn extract_seed(line: &str) -> Option<&str> {
    SEED_PATTERNS.iter().find_map(|pattern| {
        pattern
            .captures(line)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    })
}

/// Every seed occurrence in `lines`, in document order.
pub fn scan_seeds(lines: &[&str]) -> Vec<SeedOccurrence> {
    lines
        .iter()
        .enumerate()
        .filter_map(|(line_index, line)| {
            extract_seed(line).map(|seed| SeedOccurrence {
                line_index,
                seed: seed.to_string(),
            })
        })
        .collect()
}
