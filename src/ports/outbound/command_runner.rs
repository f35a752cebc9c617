use crate::sbom_action::domain::{CommandLine, StderrPolicy};
use crate::shared::error::ActionError;
use crate::shared::Result;
use async_trait::async_trait;

/// Captured result of a finished command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code; `None` when the process was terminated by a signal
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(stdout: impl Into<String>) -> Self {
        Self {
            status: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// Applies the stderr policy to this output.
    ///
    /// A non-zero exit is always fatal. Non-empty stderr is fatal under
    /// [`StderrPolicy::Fail`]; under [`StderrPolicy::Warn`] it is handed back
    /// so the caller can surface it.
    pub fn check(
        &self,
        command: &CommandLine,
        policy: StderrPolicy,
    ) -> std::result::Result<Option<String>, ActionError> {
        let stderr = self.stderr.trim();

        if self.status != Some(0) {
            return Err(ActionError::CommandFailed {
                command: command.render(),
                status: self
                    .status
                    .map(|code| format!("exit code {}", code))
                    .unwrap_or_else(|| "a signal".to_string()),
                stderr: stderr.to_string(),
            });
        }

        if stderr.is_empty() {
            return Ok(None);
        }
        match policy {
            StderrPolicy::Fail => Err(ActionError::CommandStderr {
                command: command.render(),
                stderr: stderr.to_string(),
            }),
            StderrPolicy::Warn => Ok(Some(stderr.to_string())),
        }
    }
}

/// CommandRunner port for executing a built command line
///
/// Implementations run the command through the host shell with the
/// command's environment, secret environment, search path and working
/// directory applied to the child only.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Runs `command` to completion and captures its output
    ///
    /// # Errors
    /// Returns an error if the process cannot be spawned or exceeds the
    /// runner's timeout. A non-zero exit is *not* an error at this level;
    /// use [`CommandOutput::check`].
    async fn run(&self, command: &CommandLine) -> Result<CommandOutput>;
}
