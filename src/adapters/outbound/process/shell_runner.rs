use crate::ports::outbound::{CommandOutput, CommandRunner};
use crate::sbom_action::domain::CommandLine;
use crate::shared::error::ActionError;
use crate::shared::Result;
use async_trait::async_trait;
use secrecy::ExposeSecret;
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::{Duration, Instant};
use tokio::process::Command;
use tracing::{debug, info};

/// ShellRunner adapter executing command lines through `sh -c`
///
/// The child inherits this process's environment plus the command's own
/// variables and secrets. Search directories are prepended to `PATH` for the
/// child only; nothing is written to this process's environment.
pub struct ShellRunner {
    shell: String,
    timeout: Option<Duration>,
}

impl ShellRunner {
    pub fn new() -> Self {
        Self {
            shell: "sh".to_string(),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    fn child_path(search_paths: &[PathBuf]) -> Option<OsString> {
        if search_paths.is_empty() {
            return None;
        }
        let inherited = std::env::var_os("PATH").unwrap_or_default();
        let dirs = search_paths
            .iter()
            .cloned()
            .chain(std::env::split_paths(&inherited));
        std::env::join_paths(dirs).ok()
    }

    fn build(&self, command: &CommandLine) -> Command {
        let mut cmd = Command::new(&self.shell);
        cmd.arg("-c").arg(command.render());

        for (key, value) in command.env_vars() {
            cmd.env(key, value);
        }
        for (key, value) in command.secret_env_vars() {
            cmd.env(key, value.expose_secret());
        }
        if let Some(path) = Self::child_path(command.search_paths()) {
            cmd.env("PATH", path);
        }
        if let Some(dir) = command.working_dir() {
            cmd.current_dir(dir);
        }

        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        cmd
    }
}

impl Default for ShellRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CommandRunner for ShellRunner {
    async fn run(&self, command: &CommandLine) -> Result<CommandOutput> {
        let rendered = command.render();
        debug!(
            command = %rendered,
            secrets = ?command.secret_env_keys().collect::<Vec<_>>(),
            "spawning"
        );

        let start = Instant::now();
        let mut cmd = self.build(command);
        let output = cmd.output();
        let output = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, output).await {
                Ok(result) => result,
                Err(_) => {
                    return Err(ActionError::CommandTimeout {
                        command: rendered,
                        seconds: limit.as_secs(),
                    }
                    .into())
                }
            },
            None => output.await,
        };
        let output = output.map_err(|e| ActionError::CommandFailed {
            command: rendered.clone(),
            status: "a spawn failure".to_string(),
            stderr: e.to_string(),
        })?;

        let duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
        info!(
            program = command.program(),
            exit_code = ?output.status.code(),
            duration_ms,
            "command finished"
        );

        Ok(CommandOutput {
            status: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}
