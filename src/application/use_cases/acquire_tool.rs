use crate::ports::outbound::{ArchiveExtractor, AssetDownloader, ToolProvisioner};
use crate::sbom_action::domain::tool::is_tarball;
use crate::sbom_action::domain::{InstalledTool, ResolvedRelease, ToolSpec};
use crate::shared::error::ActionError;
use crate::shared::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// ToolAcquirer - Makes a released CLI binary available on local disk
///
/// Layout: the archive is downloaded to `<download_dir>/<asset>` and the
/// binary ends up at `<install_root>/<binary>/<binary>`. The install
/// directory acts as a cache keyed only by the binary's existence, so a
/// stale binary from an older release is reused as-is.
///
/// # Type Parameters
/// * `D` - AssetDownloader implementation
/// * `X` - ArchiveExtractor implementation
pub struct ToolAcquirer<D, X> {
    downloader: D,
    extractor: Arc<X>,
    install_root: PathBuf,
    download_dir: PathBuf,
}

impl<D, X> ToolAcquirer<D, X>
where
    D: AssetDownloader,
    X: ArchiveExtractor + 'static,
{
    pub fn new(downloader: D, extractor: X, install_root: PathBuf, download_dir: PathBuf) -> Self {
        Self {
            downloader,
            extractor: Arc::new(extractor),
            install_root,
            download_dir,
        }
    }

    pub fn install_dir(&self, spec: &ToolSpec) -> PathBuf {
        self.install_root.join(spec.binary_name)
    }

    async fn fetch_asset(&self, release: &ResolvedRelease) -> Result<PathBuf> {
        tokio::fs::create_dir_all(&self.download_dir)
            .await
            .map_err(|e| ActionError::Install {
                path: self.download_dir.clone(),
                details: e.to_string(),
            })?;

        let archive = self.download_dir.join(&release.asset_name);
        if archive.exists() {
            debug!(path = %archive.display(), "release asset already downloaded");
            return Ok(archive);
        }

        let bytes = self
            .downloader
            .download(&release.download_url, &archive)
            .await?;
        info!(asset = %release.asset_name, bytes, "downloaded release asset");
        Ok(archive)
    }

    async fn install(&self, spec: &ToolSpec, asset_name: &str, archive: &Path) -> Result<PathBuf> {
        let install_dir = self.install_dir(spec);
        let binary_path = install_dir.join(spec.binary_name);
        let install_error = |details: String| ActionError::Install {
            path: install_dir.clone(),
            details,
        };

        // A directory without the binary is a leftover from an interrupted run
        if install_dir.exists() {
            tokio::fs::remove_dir_all(&install_dir)
                .await
                .map_err(|e| install_error(e.to_string()))?;
        }
        if let Some(parent) = install_dir.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| install_error(e.to_string()))?;
        }

        if is_tarball(asset_name) {
            // Decompression is blocking file I/O
            let extractor = Arc::clone(&self.extractor);
            let (source, destination) = (archive.to_path_buf(), install_dir.clone());
            tokio::task::spawn_blocking(move || extractor.extract(&source, &destination))
                .await
                .map_err(|e| install_error(format!("extraction task failed: {}", e)))??;
            hoist_nested_binary(&install_dir, spec.binary_name)
                .await
                .map_err(|e| install_error(format!("could not move binary into place: {}", e)))?;
        } else {
            tokio::fs::create_dir_all(&install_dir)
                .await
                .map_err(|e| install_error(e.to_string()))?;
            tokio::fs::copy(archive, &binary_path)
                .await
                .map_err(|e| install_error(e.to_string()))?;
        }

        if !binary_path.is_file() {
            return Err(install_error(format!(
                "'{}' not found after extracting {}",
                spec.binary_name, asset_name
            ))
            .into());
        }

        make_executable(&binary_path)
            .await
            .map_err(|e| install_error(e.to_string()))?;
        Ok(binary_path)
    }
}

#[async_trait]
impl<D, X> ToolProvisioner for ToolAcquirer<D, X>
where
    D: AssetDownloader,
    X: ArchiveExtractor + 'static,
{
    async fn provision(&self, spec: &ToolSpec, release: &ResolvedRelease) -> Result<InstalledTool> {
        let bin_dir = self.install_dir(spec);
        let binary_path = bin_dir.join(spec.binary_name);

        if binary_path.is_file() {
            debug!(path = %binary_path.display(), "reusing installed binary");
            return Ok(InstalledTool {
                binary_name: spec.binary_name.to_string(),
                version: release.version.clone(),
                bin_dir,
                binary_path,
                cached: true,
            });
        }

        let archive = self.fetch_asset(release).await?;
        let binary_path = self.install(spec, &release.asset_name, &archive).await?;
        info!(path = %binary_path.display(), version = %release.version, "installed tool");

        Ok(InstalledTool {
            binary_name: spec.binary_name.to_string(),
            version: release.version.clone(),
            bin_dir,
            binary_path,
            cached: false,
        })
    }
}

/// Moves `<dir>/<sub>/<binary>` up to `<dir>/<binary>` when the archive
/// wrapped its contents in a single top-level directory.
async fn hoist_nested_binary(dir: &Path, binary_name: &str) -> std::io::Result<()> {
    let target = dir.join(binary_name);
    if target.is_file() {
        return Ok(());
    }

    let mut entries = tokio::fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        let candidate = entry.path().join(binary_name);
        if entry.file_type().await?.is_dir() && candidate.is_file() {
            debug!(from = %candidate.display(), "binary found one level deep");
            tokio::fs::rename(&candidate, &target).await?;
            return Ok(());
        }
    }
    Ok(())
}

#[cfg(unix)]
async fn make_executable(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    tokio::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755)).await
}

#[cfg(not(unix))]
async fn make_executable(_path: &Path) -> std::io::Result<()> {
    Ok(())
}
