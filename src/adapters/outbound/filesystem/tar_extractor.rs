use crate::ports::outbound::ArchiveExtractor;
use crate::shared::error::ActionError;
use crate::shared::Result;
use flate2::read::GzDecoder;
use std::fs::File;
use std::path::Path;
use tar::Archive;
use tracing::debug;

/// TarGzExtractor adapter for `.tar.gz` release archives
///
/// Unpacks into a temporary directory next to the destination and renames
/// it into place, so a corrupt archive never leaves a half-populated
/// install directory behind.
#[derive(Debug, Default, Clone, Copy)]
pub struct TarGzExtractor;

impl TarGzExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl ArchiveExtractor for TarGzExtractor {
    fn extract(&self, archive: &Path, destination: &Path) -> Result<()> {
        let install_error = |details: String| ActionError::Install {
            path: destination.to_path_buf(),
            details,
        };

        let parent = destination
            .parent()
            .ok_or_else(|| install_error("destination has no parent directory".to_string()))?;
        std::fs::create_dir_all(parent).map_err(|e| install_error(e.to_string()))?;

        let staging = tempfile::Builder::new()
            .prefix(".extract-")
            .tempdir_in(parent)
            .map_err(|e| install_error(e.to_string()))?;

        let file = File::open(archive)
            .map_err(|e| install_error(format!("cannot open {}: {}", archive.display(), e)))?;
        let mut tarball = Archive::new(GzDecoder::new(file));
        tarball.set_preserve_permissions(true);
        tarball
            .unpack(staging.path())
            .map_err(|e| install_error(format!("failed to extract {}: {}", archive.display(), e)))?;

        let staged = staging.keep();
        if let Err(e) = std::fs::rename(&staged, destination) {
            let _ = std::fs::remove_dir_all(&staged);
            return Err(install_error(e.to_string()).into());
        }
        debug!(
            archive = %archive.display(),
            destination = %destination.display(),
            "extracted archive"
        );
        Ok(())
    }
}
