use crate::shared::error::ActionError;
use std::fmt;
use std::str::FromStr;

/// SBOM document format the CLI is asked to produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SbomFormat {
    SpdxJson,
    #[default]
    CycloneDxJson,
}

impl SbomFormat {
    pub const ALL: [SbomFormat; 2] = [SbomFormat::SpdxJson, SbomFormat::CycloneDxJson];

    pub fn as_str(&self) -> &'static str {
        match self {
            SbomFormat::SpdxJson => "spdx-json",
            SbomFormat::CycloneDxJson => "cyclonedx-json",
        }
    }

    /// Parses an input value, naming the input in the error
    pub fn parse_input(input: &str, value: &str) -> Result<Self, ActionError> {
        value.parse().map_err(|_| ActionError::InvalidInput {
            input: input.to_string(),
            value: value.to_string(),
            expected: Self::ALL
                .iter()
                .map(|f| f.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        })
    }
}

impl FromStr for SbomFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "spdx-json" => Ok(SbomFormat::SpdxJson),
            "cyclonedx-json" => Ok(SbomFormat::CycloneDxJson),
            _ => Err(format!(
                "Invalid output format: {}. Please specify 'spdx-json' or 'cyclonedx-json'",
                s
            )),
        }
    }
}

impl fmt::Display for SbomFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
