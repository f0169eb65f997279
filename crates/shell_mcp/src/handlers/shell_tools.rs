use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use mcp_stdio_core::{Capability, Method, Params, ServerInfo, WorkspaceRoot};
use serde_json::Value;

use crate::{
    application::ProcessRunner,
    config::{Allowlist, Config},
    domain::{CommandRunner, Invocation},
    errors::{ShellError, ShellResult},
    models::{requests::ExecRequest, responses::ExecutionResult},
    service::validation::validate_command,
};

/// Methods served by the shell capability
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellMethod {
    Exec,
    Allowed,
}

impl Method for ShellMethod {
    const ALL: &'static [Self] = &[Self::Exec, Self::Allowed];

    fn name(self) -> &'static str {
        match self {
            Self::Exec => "shell/exec",
            Self::Allowed => "shell/allowed",
        }
    }

    fn description(self) -> &'static str {
        match self {
            Self::Exec => {
                "Run an allowlisted command (command, args?, cwd?) with a 30 second timeout"
            }
            Self::Allowed => "List allowlisted commands and their permitted first arguments",
        }
    }
}

/// Shell capability
///
/// Validation against the allowlist and workspace always completes before the
/// injected [`CommandRunner`] is asked to spawn anything.
pub struct ShellService {
    workspace: WorkspaceRoot,
    allowlist: Allowlist,
    timeout: Duration,
    runner: Arc<dyn CommandRunner>,
}

impl ShellService {
    pub fn new(config: Config) -> Self {
        Self::with_runner(config, Arc::new(ProcessRunner::new()))
    }

    pub fn with_runner(config: Config, runner: Arc<dyn CommandRunner>) -> Self {
        Self {
            workspace: config.workspace,
            allowlist: config.allowlist,
            timeout: config.timeout,
            runner,
        }
    }

    pub fn allowed(&self) -> &Allowlist {
        &self.allowlist
    }

    pub async fn exec(&self, request: ExecRequest) -> ShellResult<ExecutionResult> {
        let program = validate_command(&self.allowlist, request.command(), request.args())?;

        let cwd = match request.cwd() {
            Some(cwd) => self.workspace.confine(cwd).await?,
            None => self.workspace.path().to_path_buf(),
        };

        let invocation = Invocation {
            program: program.to_string(),
            args: request.args().clone(),
            cwd,
        };
        let command_line = request.command_line();

        tracing::info!(command = %command_line, "executing command");
        let output = self.runner.run(&invocation, self.timeout).await?;
        tracing::debug!(command = %command_line, exit_code = ?output.exit_code, "command finished");

        Ok(ExecutionResult {
            command: command_line,
            success: output.exit_code == Some(0),
            exit_code: output.exit_code,
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }
}

#[async_trait]
impl Capability for ShellService {
    type Method = ShellMethod;
    type Error = ShellError;

    fn server_info(&self) -> ServerInfo {
        ServerInfo {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
        }
    }

    async fn call(&self, method: ShellMethod, params: Params) -> ShellResult<Value> {
        let result = match method {
            ShellMethod::Exec => serde_json::to_value(self.exec(params.parse()?).await?)?,
            ShellMethod::Allowed => serde_json::to_value(self.allowed())?,
        };
        Ok(result)
    }
}
