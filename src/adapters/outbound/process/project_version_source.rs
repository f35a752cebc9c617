use crate::ports::outbound::VersionSource;
use crate::shared::security::read_regular_file;
use crate::shared::Result;
use anyhow::Context;
use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

const MANIFEST_FILE: &str = "package.json";

/// ProjectVersionSource adapter reading version candidates from the source tree
///
/// The manifest candidate is the `version` string of `package.json`; the git
/// candidates come from the `git` binary on `PATH`. A directory that is not a
/// repository, or has no tags, simply yields no candidate.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProjectVersionSource;

impl ProjectVersionSource {
    pub fn new() -> Self {
        Self
    }

    /// Runs `git <args>` in `dir`; `Ok(None)` when git reports an error
    async fn git(dir: &Path, args: &[&str]) -> Result<Option<String>> {
        let output = Command::new("git")
            .args(args)
            .current_dir(dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .with_context(|| format!("Failed to run git {}", args.join(" ")))?;

        if !output.status.success() {
            debug!(
                args = ?args,
                stderr = %String::from_utf8_lossy(&output.stderr).trim(),
                "git returned no value"
            );
            return Ok(None);
        }

        let value = String::from_utf8_lossy(&output.stdout).trim().to_string();
        Ok(Some(value).filter(|v| !v.is_empty()))
    }
}

#[async_trait]
impl VersionSource for ProjectVersionSource {
    async fn manifest_version(&self, dir: &Path) -> Result<Option<String>> {
        let path = dir.join(MANIFEST_FILE);
        if !path.exists() {
            return Ok(None);
        }

        let contents = read_regular_file(&path, MANIFEST_FILE)?;
        let manifest: serde_json::Value = serde_json::from_slice(&contents)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        Ok(manifest
            .get("version")
            .and_then(|v| v.as_str())
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty()))
    }

    async fn latest_tag(&self, dir: &Path) -> Result<Option<String>> {
        Self::git(dir, &["describe", "--tags", "--abbrev=0"]).await
    }

    async fn short_sha(&self, dir: &Path) -> Result<Option<String>> {
        Self::git(dir, &["rev-parse", "--short=7", "HEAD"]).await
    }
}
