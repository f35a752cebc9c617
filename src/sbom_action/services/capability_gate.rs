use crate::sbom_action::policies::GatedFlag;
use semver::Version;
use std::fmt;

/// Why a requested flag was left off a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapabilityWarning {
    pub flag: GatedFlag,
    pub tool_version: String,
    pub min_version: &'static str,
}

impl fmt::Display for CapabilityWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} requires Manifest CLI {} or newer (installed: {}); the flag was omitted",
            self.flag, self.min_version, self.tool_version
        )
    }
}

/// Decides which gated flags the installed CLI understands.
///
/// The tool version is parsed once. When it cannot be parsed every gated flag
/// is treated as unsupported; this never raises an error.
#[derive(Debug, Clone)]
pub struct CapabilityGate {
    raw_version: String,
    parsed: Option<Version>,
}

impl CapabilityGate {
    pub fn new(tool_version: &str) -> Self {
        Self {
            raw_version: tool_version.to_string(),
            parsed: parse_tool_version(tool_version),
        }
    }

    pub fn tool_version(&self) -> &str {
        &self.raw_version
    }

    /// `Ok(())` when the flag may be emitted, otherwise the warning to report
    pub fn check(&self, flag: GatedFlag) -> Result<(), CapabilityWarning> {
        let min_version = flag.min_version();
        let eligible = match (&self.parsed, parse_tool_version(min_version)) {
            (Some(installed), Some(minimum)) => installed >= &minimum,
            _ => false,
        };

        if eligible {
            Ok(())
        } else {
            Err(CapabilityWarning {
                flag,
                tool_version: self.raw_version.clone(),
                min_version,
            })
        }
    }
}

/// flag eligible ⇔ parsed tool version ≥ minimum version; unparseable ⇒ ineligible
pub fn is_eligible(tool_version: &str, min_version: &str) -> bool {
    match (parse_tool_version(tool_version), parse_tool_version(min_version)) {
        (Some(installed), Some(minimum)) => installed >= minimum,
        _ => false,
    }
}

/// Parses a release tag such as `v0.9.1` as a semantic version
pub fn parse_tool_version(raw: &str) -> Option<Version> {
    let trimmed = raw.trim();
    let trimmed = trimmed
        .strip_prefix('v')
        .or_else(|| trimmed.strip_prefix('V'))
        .unwrap_or(trimmed);
    Version::parse(trimmed).ok()
}
