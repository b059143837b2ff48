use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use failgate_core::config::{
    DEFAULT_MESSAGE_LIMIT, DEFAULT_SEED_ENV_VAR, DEFAULT_TEST_COMMAND, GateConfig,
};

#[derive(Debug, Parser)]
#[command(
    name = "failgate",
    version,
    about = "Summarize test failures into a CI pass/fail gate"
)]
pub struct Args {
    /// Path to the JUnit XML test report
    #[arg(long)]
    pub junit: PathBuf,

    /// Path to the cargo test log used to recover property-test seeds
    #[arg(long)]
    pub log: Option<PathBuf>,

    /// Write the JSON summary to this path
    #[arg(long)]
    pub summary_json: Option<PathBuf>,

    /// Write the Markdown summary to this path
    #[arg(long)]
    pub summary_md: Option<PathBuf>,

    /// Format printed to stdout when no summary path is given
    #[arg(long, default_value = "json")]
    pub format: OutputFormat,

    /// Maximum message length in the Markdown table
    #[arg(long, default_value_t = DEFAULT_MESSAGE_LIMIT)]
    pub message_limit: usize,

    /// Environment variable that pins the seed in reproduction commands
    #[arg(long, default_value = DEFAULT_SEED_ENV_VAR)]
    pub seed_env: String,

    /// Test invocation used in reproduction commands
    #[arg(long, default_value = DEFAULT_TEST_COMMAND)]
    pub test_command: String,

    /// Always exit 0; the verdict is only reported in the summaries
    #[arg(long)]
    pub report_only: bool,

    /// Enable debug logging on stderr (RUST_LOG takes precedence)
    #[arg(short, long)]
    pub verbose: bool,

    /// Commit identifier recorded in the summary
    #[arg(long, env = "GITHUB_SHA", default_value = "", hide_env_values = true)]
    pub sha: String,

    /// Git ref recorded in the summary
    #[arg(long = "ref", env = "GITHUB_REF", default_value = "", hide_env_values = true)]
    pub git_ref: String,

    /// CI run identifier recorded in the summary
    #[arg(long, env = "GITHUB_RUN_ID", default_value = "", hide_env_values = true)]
    pub run_id: String,
}

impl Args {
    pub fn gate_config(&self) -> GateConfig {
        GateConfig {
            message_limit: self.message_limit,
            seed_env_var: self.seed_env.clone(),
            test_command: self.test_command.clone(),
        }
    }

    /// Whether the summary should go to stdout instead of files.
    pub fn prints_to_stdout(&self) -> bool {
        self.summary_json.is_none() && self.summary_md.is_none()
    }
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Markdown,
}
