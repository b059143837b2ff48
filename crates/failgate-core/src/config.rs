/// Rendering knobs for the gate summaries.
///
/// None of these influence classification or the gate decision; they only
/// shape how failures are displayed and how reproduction commands are built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateConfig {
    /// Maximum number of characters of a failure message shown in the
    /// Markdown report. The JSON summary always carries the full message.
    pub message_limit: usize,

    /// Environment variable that pins the property-test seed when reproducing.
    pub seed_env_var: String,

    /// Test invocation prefix; the failing test name is appended.
    pub test_command: String,
}

pub const DEFAULT_MESSAGE_LIMIT: usize = 200;
pub const DEFAULT_SEED_ENV_VAR: &str = "PROPTEST_SEED";
pub const DEFAULT_TEST_COMMAND: &str = "cargo test --";

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            message_limit: DEFAULT_MESSAGE_LIMIT,
            seed_env_var: DEFAULT_SEED_ENV_VAR.to_string(),
            test_command: DEFAULT_TEST_COMMAND.to_string(),
        }
    }
}

impl GateConfig {
    /// Shell command that reruns a single failing test, seeded when possible.
    pub fn repro_command(&self, name: &str, seed: Option<&str>) -> String {
        let command = format!("{} {}", self.test_command, name);
        match seed {
            Some(seed) => format!("{}={} {}", self.seed_env_var, seed, command),
            None => command,
        }
    }
}
