//! Message normalization helpers.

/// Collapse every run of whitespace (including line breaks) into one space.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// First line of `text` that is not blank, trimmed.
pub fn first_nonblank_line(text: &str) -> Option<&str> {
    text.lines().map(str::trim).find(|line| !line.is_empty())
}

/// Truncate to at most `limit` characters, marking the cut with `…`.
pub fn truncate_chars(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    if limit == 0 {
        return String::new();
    }
    let mut out: String = text.chars().take(limit - 1).collect();
    out.push('…');
    out
}

/// Make a value safe to place inside a Markdown table cell.
pub fn escape_table_cell(text: &str) -> String {
    normalize_whitespace(text).replace('|', "\\|")
}
