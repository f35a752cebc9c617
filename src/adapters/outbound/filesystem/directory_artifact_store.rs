use crate::ports::outbound::{ArtifactStore, UploadDescriptor};
use crate::shared::security::validate_regular_file;
use crate::shared::Result;
use anyhow::Context;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::debug;
use uuid::Uuid;

/// DirectoryArtifactStore adapter that "uploads" by copying into a directory
///
/// Each artifact lands in `<root>/<name>/`, keeping the file layout relative
/// to the upload root. A CI step after this one can pick the directory up.
pub struct DirectoryArtifactStore {
    artifact_root: PathBuf,
}

impl DirectoryArtifactStore {
    pub fn new(artifact_root: impl Into<PathBuf>) -> Self {
        Self {
            artifact_root: artifact_root.into(),
        }
    }

    fn relative_to(file: &Path, root: &Path) -> PathBuf {
        match file.strip_prefix(root) {
            Ok(relative) => relative.to_path_buf(),
            Err(_) => file
                .file_name()
                .map(PathBuf::from)
                .unwrap_or_else(|| file.to_path_buf()),
        }
    }
}

#[async_trait]
impl ArtifactStore for DirectoryArtifactStore {
    async fn upload(&self, name: &str, files: &[PathBuf], root: &Path) -> Result<UploadDescriptor> {
        let location = self.artifact_root.join(name);
        let mut uploaded = Vec::with_capacity(files.len());

        for file in files {
            validate_regular_file(file, "Artifact file")?;
            let relative = Self::relative_to(file, root);
            let target = location.join(&relative);
            if let Some(parent) = target.parent() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
            tokio::fs::copy(file, &target)
                .await
                .with_context(|| {
                    format!("Failed to copy {} into artifact '{}'", file.display(), name)
                })?;
            debug!(file = %relative.display(), artifact = name, "added artifact file");
            uploaded.push(relative);
        }

        Ok(UploadDescriptor {
            id: Uuid::new_v4(),
            name: name.to_string(),
            location,
            files: uploaded,
        })
    }
}
