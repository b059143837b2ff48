use crate::config::GateConfig;
use crate::failures::model::FailureRecord;
use crate::report::model::Summary;
use crate::util::text::{escape_table_cell, normalize_whitespace, truncate_chars};

/// Render the human-readable Markdown report.
pub fn render_markdown(summary: &Summary, config: &GateConfig) -> String {
    let mut out = String::new();

    out.push_str("# Test Gate Summary\n\n");

    out.push_str("| Severity | Suite | Test | Time | Seed | Message |\n");
    out.push_str("| --- | --- | --- | --- | --- | --- |\n");
    if summary.failed.is_empty() {
        out.push_str("| ✅ | - | No failures | 0.000 | - | - |\n");
    }
    for failure in &summary.failed {
        out.push_str(&table_row(failure, config.message_limit));
    }

    out.push_str("\n## Reproduce locally\n\n```\n");
    if summary.failed.is_empty() {
        out.push_str("cargo test\n");
    }
    for failure in &summary.failed {
        out.push_str(&config.repro_command(&failure.name, failure.seed.as_deref()));
        out.push('\n');
    }
    out.push_str("```\n\n");

    let counts = &summary.counts;
    out.push_str(&format!(
        "- Counts: P1={}, P2={}, P3={}\n",
        counts.p1, counts.p2, counts.p3
    ));
    let decision = if summary.gate_status.is_pass() {
        "✅ Pass"
    } else {
        "❌ Fail"
    };
    out.push_str(&format!("- Decision: {decision}\n"));

    if !summary.analysis.is_ok() {
        out.push_str(&format!("- Report status: {}\n", summary.analysis.status));
    }
    for warning in &summary.analysis.warnings {
        out.push_str(&format!("- Warning: {}\n", normalize_whitespace(warning)));
    }

    out
}

fn table_row(failure: &FailureRecord, message_limit: usize) -> String {
    let message = truncate_chars(&normalize_whitespace(&failure.message), message_limit);
    format!(
        "| {} | {} | {} | {:.3} | {} | {} |\n",
        failure.severity,
        escape_table_cell(&failure.suite),
        escape_table_cell(&failure.name),
        failure.time,
        failure.seed.as_deref().unwrap_or("-"),
        escape_table_cell(&message),
    )
}
