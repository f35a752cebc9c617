use std::path::{Path, PathBuf};

const JSON_EXTENSION: &str = ".json";

/// Location of the generated SBOM.
///
/// The CLI's `--file` flag takes the path without extension and appends one
/// itself; every later step (hook, artifact, publish) needs the full `.json`
/// path. Both forms are derived once here so callers cannot mix them up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SbomFile {
    full: String,
}

impl SbomFile {
    pub const DEFAULT: &'static str = "sbom.json";

    pub fn new(raw: &str) -> Self {
        let raw = raw.trim();
        let raw = if raw.is_empty() { Self::DEFAULT } else { raw };
        let full = if raw.ends_with(JSON_EXTENSION) {
            raw.to_string()
        } else {
            format!("{}{}", raw, JSON_EXTENSION)
        };
        Self { full }
    }

    /// Path with the trailing `.json` stripped, as passed to `--file`
    pub fn stem(&self) -> &str {
        self.full
            .strip_suffix(JSON_EXTENSION)
            .unwrap_or(self.full.as_str())
    }

    /// Path including `.json`, as written by the CLI
    pub fn full(&self) -> &str {
        &self.full
    }

    /// Full path resolved against the working directory
    pub fn resolve(&self, work_dir: &Path) -> PathBuf {
        work_dir.join(&self.full)
    }
}

impl Default for SbomFile {
    fn default() -> Self {
        Self::new(Self::DEFAULT)
    }
}
