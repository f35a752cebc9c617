use crate::shared::error::ActionError;
use std::fmt;
use std::str::FromStr;

/// Pinned generator versions installed when the caller leaves the version empty.
/// Bump these independently as upstream generators release.
pub const SYFT_DEFAULT_VERSION: &str = "v0.96.0";
pub const TRIVY_DEFAULT_VERSION: &str = "v0.47.0";
pub const CDXGEN_DEFAULT_VERSION: &str = "v9.9.5";
pub const SIGSTORE_BOM_DEFAULT_VERSION: &str = "v0.6.1";
pub const SPDX_SBOM_GENERATOR_DEFAULT_VERSION: &str = "v0.0.15";
pub const DOCKER_SBOM_DEFAULT_VERSION: &str = "v0.6.1";

/// Third-party tool the Manifest CLI drives to produce the SBOM
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Generator {
    #[default]
    Syft,
    Trivy,
    Cdxgen,
    SigstoreBom,
    SpdxSbomGenerator,
    DockerSbom,
}

impl Generator {
    pub const ALL: [Generator; 6] = [
        Generator::Syft,
        Generator::Trivy,
        Generator::Cdxgen,
        Generator::SigstoreBom,
        Generator::SpdxSbomGenerator,
        Generator::DockerSbom,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Generator::Syft => "syft",
            Generator::Trivy => "trivy",
            Generator::Cdxgen => "cdxgen",
            Generator::SigstoreBom => "sigstore-bom",
            Generator::SpdxSbomGenerator => "spdx-sbom-generator",
            Generator::DockerSbom => "docker-sbom",
        }
    }

    pub fn default_version(&self) -> &'static str {
        match self {
            Generator::Syft => SYFT_DEFAULT_VERSION,
            Generator::Trivy => TRIVY_DEFAULT_VERSION,
            Generator::Cdxgen => CDXGEN_DEFAULT_VERSION,
            Generator::SigstoreBom => SIGSTORE_BOM_DEFAULT_VERSION,
            Generator::SpdxSbomGenerator => SPDX_SBOM_GENERATOR_DEFAULT_VERSION,
            Generator::DockerSbom => DOCKER_SBOM_DEFAULT_VERSION,
        }
    }

    /// Returns `requested` unless it is blank, in which case the pinned default
    pub fn version_or_default<'a>(&self, requested: &'a str) -> &'a str {
        let requested = requested.trim();
        if requested.is_empty() {
            self.default_version()
        } else {
            requested
        }
    }

    pub fn parse_input(input: &str, value: &str) -> Result<Self, ActionError> {
        value.parse().map_err(|_| ActionError::InvalidInput {
            input: input.to_string(),
            value: value.to_string(),
            expected: Self::ALL
                .iter()
                .map(|g| g.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        })
    }
}

impl FromStr for Generator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        Generator::ALL
            .into_iter()
            .find(|g| g.as_str() == normalized)
            .ok_or_else(|| format!("Unknown SBOM generator: {}", s))
    }
}

impl fmt::Display for Generator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
