use crate::shared::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Receipt for an uploaded build artifact
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadDescriptor {
    pub id: Uuid,
    pub name: String,
    /// Where the artifact can be found after upload
    pub location: PathBuf,
    /// Uploaded files, relative to the root they were uploaded from
    pub files: Vec<PathBuf>,
}

/// ArtifactStore port for handing files to the CI system as a named artifact
#[async_trait]
pub trait ArtifactStore: Send + Sync {
    /// Uploads `files` under `name`. Paths are recorded relative to `root`.
    ///
    /// # Errors
    /// Returns an error if a file is missing or cannot be copied
    async fn upload(&self, name: &str, files: &[PathBuf], root: &Path) -> Result<UploadDescriptor>;
}
