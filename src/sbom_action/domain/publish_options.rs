use crate::shared::error::ActionError;
use std::fmt;

/// Whether the SBOM describes first-party or third-party software
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Relationship {
    #[default]
    First,
    Third,
}

impl Relationship {
    pub fn as_str(&self) -> &'static str {
        match self {
            Relationship::First => "first",
            Relationship::Third => "third",
        }
    }

    pub fn parse_input(input: &str, value: &str) -> Result<Self, ActionError> {
        match value.trim().to_lowercase().as_str() {
            "first" => Ok(Relationship::First),
            "third" => Ok(Relationship::Third),
            _ => Err(ActionError::InvalidInput {
                input: input.to_string(),
                value: value.to_string(),
                expected: "first, third".to_string(),
            }),
        }
    }
}

impl fmt::Display for Relationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the SBOM reaches the Manifest platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PublishMode {
    /// `manifest publish` through the installed CLI
    #[default]
    Cli,
    /// Authenticated HTTP PUT straight to the upload endpoint
    Direct,
}

impl PublishMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PublishMode::Cli => "cli",
            PublishMode::Direct => "direct",
        }
    }

    pub fn parse_input(input: &str, value: &str) -> Result<Self, ActionError> {
        match value.trim().to_lowercase().as_str() {
            "cli" => Ok(PublishMode::Cli),
            "direct" | "http" => Ok(PublishMode::Direct),
            _ => Err(ActionError::InvalidInput {
                input: input.to_string(),
                value: value.to_string(),
                expected: "cli, direct".to_string(),
            }),
        }
    }
}

/// Policy applied when a command writes to stderr but exits zero
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StderrPolicy {
    /// Surface stderr as a warning; only the exit code decides failure
    #[default]
    Warn,
    /// Treat any stderr output as fatal (legacy behavior)
    Fail,
}
