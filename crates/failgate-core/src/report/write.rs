use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{GateError, Result};
use crate::report::model::Summary;

/// Serialize the summary as pretty JSON with a trailing newline.
pub fn summary_json(summary: &Summary) -> Result<String> {
    let mut json = serde_json::to_string_pretty(summary)?;
    json.push('\n');
    Ok(json)
}

/// Write the JSON summary to `path`, creating parent directories.
pub fn write_json(path: &Path, summary: &Summary) -> Result<()> {
    let json = summary_json(summary)?;
    write_artifact("JSON summary", path, &json)
}

/// Write the Markdown report to `path`, creating parent directories.
pub fn write_markdown(path: &Path, markdown: &str) -> Result<()> {
    write_artifact("Markdown summary", path, markdown)
}

fn write_artifact(artifact: &'static str, path: &Path, contents: &str) -> Result<()> {
    let to_error = |source: std::io::Error| GateError::Write {
        artifact,
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(to_error)?;
    }
    fs::write(path, contents).map_err(to_error)?;

    info!(path = %path.display(), "wrote {artifact}");
    Ok(())
}
