use crate::shared::Result;
use async_trait::async_trait;
use std::path::Path;

/// AssetDownloader port for fetching a release asset to disk
#[async_trait]
pub trait AssetDownloader: Send + Sync {
    /// Downloads `url` to `destination`, returning the number of bytes written
    ///
    /// The destination only appears once the transfer completed; a failed
    /// download leaves no file at `destination`.
    ///
    /// # Errors
    /// Returns `ActionError::Download` on transport errors or a non-success status
    async fn download(&self, url: &str, destination: &Path) -> Result<u64>;
}
