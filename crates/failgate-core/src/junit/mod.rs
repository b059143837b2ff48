pub mod parse;
pub mod read;

pub use parse::{ReportOutcome, UnparsableKind, load_report, parse_junit};
