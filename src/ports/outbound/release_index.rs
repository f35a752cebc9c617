use crate::sbom_action::domain::Release;
use crate::shared::Result;
use async_trait::async_trait;

/// ReleaseIndex port for looking up published tool releases
///
/// This port abstracts the release API (GitHub releases in production)
/// so resolution can be tested without network access.
#[async_trait]
pub trait ReleaseIndex: Send + Sync {
    /// Fetches the latest release of `owner/repository` with its assets in
    /// upstream order
    ///
    /// # Errors
    /// Returns `ActionError::ReleaseLookup` when the index cannot be reached,
    /// answers with a non-success status, or returns an unreadable body
    async fn latest_release(&self, owner: &str, repository: &str) -> Result<Release>;
}
