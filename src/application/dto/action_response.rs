use crate::ports::outbound::UploadDescriptor;
use crate::sbom_action::domain::PublishMode;
use crate::sbom_action::services::ResolvedVersion;
use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The publish toggle was off
    Disabled,
    /// No API key was configured
    NoApiKey,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Disabled => write!(f, "publishing disabled"),
            SkipReason::NoApiKey => write!(f, "no API key provided"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    Published(PublishMode),
    Skipped(SkipReason),
}

impl PublishOutcome {
    pub fn is_published(&self) -> bool {
        matches!(self, PublishOutcome::Published(_))
    }
}

/// ActionResponse - Result of a completed pipeline run
#[derive(Debug, Clone)]
pub struct ActionResponse {
    /// Release tag of the installed Manifest CLI
    pub tool_version: String,
    /// Full path of the generated SBOM
    pub sbom_path: PathBuf,
    pub version: ResolvedVersion,
    /// Present when the SBOM was uploaded as a build artifact
    pub artifact: Option<UploadDescriptor>,
    pub publish: PublishOutcome,
    /// Capability and stderr warnings collected along the way
    pub warnings: Vec<String>,
}
