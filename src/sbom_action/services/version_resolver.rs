use chrono::{DateTime, Utc};
use std::fmt;

/// Short SHA used when the commit cannot be determined
pub const UNKNOWN_SHA: &str = "0000000";

const SHORT_SHA_LEN: usize = 7;

/// Where the artifact version came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionOrigin {
    Explicit,
    Manifest,
    GitTag,
    Synthesized,
}

impl VersionOrigin {
    pub fn as_str(&self) -> &'static str {
        match self {
            VersionOrigin::Explicit => "input",
            VersionOrigin::Manifest => "package.json",
            VersionOrigin::GitTag => "git tag",
            VersionOrigin::Synthesized => "synthesized",
        }
    }
}

impl fmt::Display for VersionOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedVersion {
    pub value: String,
    pub origin: VersionOrigin,
}

impl ResolvedVersion {
    pub fn new(value: impl Into<String>, origin: VersionOrigin) -> Self {
        Self {
            value: value.into(),
            origin,
        }
    }
}

/// Picks the first available version candidate.
///
/// Order: explicit input, project manifest, latest git tag, then a
/// synthesized pseudo-version. Empty candidates count as absent.
pub fn resolve_version(
    explicit: Option<&str>,
    manifest: Option<&str>,
    tag: Option<&str>,
    short_sha: Option<&str>,
    now: DateTime<Utc>,
) -> ResolvedVersion {
    fn present(value: Option<&str>) -> Option<&str> {
        value.map(str::trim).filter(|v| !v.is_empty())
    }

    if let Some(value) = present(explicit) {
        return ResolvedVersion::new(value, VersionOrigin::Explicit);
    }
    if let Some(value) = present(manifest) {
        return ResolvedVersion::new(value, VersionOrigin::Manifest);
    }
    if let Some(value) = present(tag) {
        return ResolvedVersion::new(value, VersionOrigin::GitTag);
    }
    ResolvedVersion::new(synthesize(short_sha, now), VersionOrigin::Synthesized)
}

/// `v0.0.0-<UTC YYYYMMDDHHMMSS>-<7 hex chars>`
pub fn synthesize(short_sha: Option<&str>, now: DateTime<Utc>) -> String {
    format!(
        "v0.0.0-{}-{}",
        now.format("%Y%m%d%H%M%S"),
        normalize_short_sha(short_sha)
    )
}

/// Lowercases and truncates to 7 characters; anything that is not 7 hex
/// digits becomes [`UNKNOWN_SHA`].
pub fn normalize_short_sha(raw: Option<&str>) -> String {
    let Some(raw) = raw else {
        return UNKNOWN_SHA.to_string();
    };
    let sha: String = raw.trim().to_lowercase().chars().take(SHORT_SHA_LEN).collect();
    if sha.len() == SHORT_SHA_LEN && sha.chars().all(|c| c.is_ascii_hexdigit()) {
        sha
    } else {
        UNKNOWN_SHA.to_string()
    }
}
