use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// The action only distinguishes success from failure; clap argument errors
/// keep their own code so wrappers can tell a bad invocation apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// The pipeline ran to completion
    Success = 0,
    /// Any fatal error halted the pipeline
    Failure = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::Failure => write!(f, "Failure (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
        }
    }
}

/// Machine-readable label for the class of a fatal error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Resolution,
    Acquisition,
    Execution,
    Network,
}

impl ErrorCategory {
    pub fn label(self) -> &'static str {
        match self {
            ErrorCategory::Configuration => "configuration",
            ErrorCategory::Resolution => "resolution",
            ErrorCategory::Acquisition => "acquisition",
            ErrorCategory::Execution => "execution",
            ErrorCategory::Network => "network",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Fatal errors raised by the SBOM action pipeline.
///
/// Capability mismatches are deliberately absent: they are warnings and travel
/// alongside the built command instead.
#[derive(Debug, Error)]
pub enum ActionError {
    #[error("Invalid value '{value}' for input '{input}'\n\n💡 Hint: Expected one of: {expected}")]
    InvalidInput {
        input: String,
        value: String,
        expected: String,
    },

    #[error("Failed to load configuration: {details}")]
    Configuration { details: String },

    #[error("Could not find asset '{asset}' in release {tag} of {repository}\nAvailable: {available}")]
    AssetNotFound {
        asset: String,
        tag: String,
        repository: String,
        available: String,
    },

    #[error("Failed to resolve the latest release of {repository}: {details}")]
    ReleaseLookup { repository: String, details: String },

    #[error("Failed to download {url}\nDetails: {details}")]
    Download { url: String, details: String },

    #[error("Failed to install tool into {path}\nDetails: {details}")]
    Install { path: PathBuf, details: String },

    #[error("Command '{command}' exited with {status}\n{stderr}")]
    CommandFailed {
        command: String,
        status: String,
        stderr: String,
    },

    #[error("Command '{command}' wrote to stderr\n{stderr}")]
    CommandStderr { command: String, stderr: String },

    #[error("Command '{command}' did not finish within {seconds}s")]
    CommandTimeout { command: String, seconds: u64 },

    #[error("Publish endpoint rejected the SBOM with status {status}: {message}")]
    PublishRejected { status: u16, message: String },

    #[error("Network error while contacting {endpoint}: {details}")]
    Network { endpoint: String, details: String },
}

impl ActionError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ActionError::InvalidInput { .. } | ActionError::Configuration { .. } => {
                ErrorCategory::Configuration
            }
            ActionError::AssetNotFound { .. } | ActionError::ReleaseLookup { .. } => {
                ErrorCategory::Resolution
            }
            ActionError::Download { .. } | ActionError::Install { .. } => {
                ErrorCategory::Acquisition
            }
            ActionError::CommandFailed { .. }
            | ActionError::CommandStderr { .. }
            | ActionError::CommandTimeout { .. } => ErrorCategory::Execution,
            ActionError::PublishRejected { .. } | ActionError::Network { .. } => {
                ErrorCategory::Network
            }
        }
    }
}

/// Finds the categorized cause of an error chain, if any.
pub fn category_of(error: &anyhow::Error) -> Option<ErrorCategory> {
    error
        .chain()
        .find_map(|cause| cause.downcast_ref::<ActionError>())
        .map(ActionError::category)
}
