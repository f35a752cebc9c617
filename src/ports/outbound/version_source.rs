use crate::shared::Result;
use async_trait::async_trait;
use std::path::Path;

/// VersionSource port for the artifact version candidates of a source tree
///
/// Each lookup returns `Ok(None)` when the candidate simply does not exist
/// (no manifest, no tags, not a repository) and `Err` only when reading it failed.
#[async_trait]
pub trait VersionSource: Send + Sync {
    /// `version` field of `<dir>/package.json`
    async fn manifest_version(&self, dir: &Path) -> Result<Option<String>>;

    /// Most recent tag reachable from HEAD
    async fn latest_tag(&self, dir: &Path) -> Result<Option<String>>;

    /// Abbreviated commit hash of HEAD
    async fn short_sha(&self, dir: &Path) -> Result<Option<String>>;
}
