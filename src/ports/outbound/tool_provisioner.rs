use crate::sbom_action::domain::{InstalledTool, ResolvedRelease, ToolSpec};
use crate::shared::Result;
use async_trait::async_trait;

/// ToolProvisioner port for making a released binary available locally
///
/// Implementations must be idempotent: a second call for the same tool
/// returns the same binary path without downloading again.
#[async_trait]
pub trait ToolProvisioner: Send + Sync {
    async fn provision(&self, spec: &ToolSpec, release: &ResolvedRelease) -> Result<InstalledTool>;
}
