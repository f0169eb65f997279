use derive_getters::Getters;
use serde::Deserialize;

/// Request to run an allowlisted command
#[derive(Debug, Clone, Deserialize, Getters)]
pub struct ExecRequest {
    /// Program name, matched case-insensitively against the allowlist
    command: String,
    /// Arguments passed verbatim; only the first is checked
    #[serde(default)]
    args: Vec<String>,
    /// Working directory relative to the workspace root (defaults to the root)
    cwd: Option<String>,
}

impl ExecRequest {
    pub fn new<I, S>(command: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            command: command.into(),
            args: args.into_iter().map(Into::into).collect(),
            cwd: None,
        }
    }

    pub fn in_dir(mut self, cwd: impl Into<String>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    /// Human-readable command line as echoed back to the caller
    pub fn command_line(&self) -> String {
        if self.args.is_empty() {
            self.command.clone()
        } else {
            format!("{} {}", self.command, self.args.join(" "))
        }
    }
}
