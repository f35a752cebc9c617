use crate::shared::Result;
use std::path::Path;

/// ArchiveExtractor port for unpacking a downloaded tool archive
pub trait ArchiveExtractor: Send + Sync {
    /// Extracts `archive` into `destination`, which must not exist yet
    ///
    /// # Errors
    /// Returns `ActionError::Install` if the archive is corrupt or the
    /// destination cannot be created
    fn extract(&self, archive: &Path, destination: &Path) -> Result<()>;
}
