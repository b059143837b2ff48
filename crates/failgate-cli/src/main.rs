use anyhow::{Context, Result};
use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use failgate_core::report::model::{RunMeta, ToolInfo};
use failgate_core::report::{render, write};
use failgate_core::summarize;

mod args;

fn main() -> Result<()> {
    let args = args::Args::parse();
    init_logging(args.verbose);

    let tool = ToolInfo {
        name: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };
    let meta = RunMeta::now(&args.sha, &args.git_ref, &args.run_id);
    let config = args.gate_config();

    let summary = summarize(&args.junit, args.log.as_deref(), tool, meta);
    let markdown = render::render_markdown(&summary, &config);

    // Each artifact is attempted independently; a failed write is logged
    // and does not change the verdict.
    if let Some(path) = &args.summary_json {
        if let Err(err) = write::write_json(path, &summary) {
            error!(error = %err, "could not write JSON summary");
        }
    }
    if let Some(path) = &args.summary_md {
        if let Err(err) = write::write_markdown(path, &markdown) {
            error!(error = %err, "could not write Markdown summary");
        }
    }

    if args.prints_to_stdout() {
        let output = match args.format {
            args::OutputFormat::Json => {
                write::summary_json(&summary).context("failed to render JSON summary")?
            }
            args::OutputFormat::Markdown => markdown,
        };
        print!("{output}");
    }

    let exit_code = if args.report_only {
        0
    } else {
        summary.gate_status.exit_code()
    };
    std::process::exit(exit_code);
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
