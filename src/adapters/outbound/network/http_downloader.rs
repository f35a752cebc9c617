use crate::ports::outbound::AssetDownloader;
use crate::shared::error::ActionError;
use crate::shared::Result;
use async_trait::async_trait;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tracing::debug;

/// HttpDownloader adapter for fetching release assets
///
/// Streams the body into `<destination>.part` and renames it into place once
/// complete, so an interrupted download never looks like a finished one.
pub struct HttpDownloader {
    client: reqwest::Client,
    show_progress: bool,
}

impl HttpDownloader {
    pub fn new() -> Result<Self> {
        let version = env!("CARGO_PKG_VERSION");
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(30))
            .user_agent(format!("manifest-sbom/{}", version))
            .build()?;

        Ok(Self {
            client,
            show_progress: std::io::stderr().is_terminal(),
        })
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    fn progress_bar(&self, total: Option<u64>) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }
        match total {
            Some(len) => {
                let bar = ProgressBar::new(len);
                if let Ok(style) = ProgressStyle::default_bar()
                    .template("   {spinner:.green} [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta})")
                {
                    bar.set_style(style.progress_chars("=>-"));
                }
                bar
            }
            None => ProgressBar::new_spinner(),
        }
    }

    async fn stream_to(&self, url: &str, partial: &Path) -> Result<u64> {
        let download_error = |details: String| ActionError::Download {
            url: url.to_string(),
            details,
        };

        let mut response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| download_error(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(download_error(format!("HTTP {}", status)).into());
        }

        let bar = self.progress_bar(response.content_length());
        let mut file = tokio::fs::File::create(partial)
            .await
            .map_err(|e| download_error(e.to_string()))?;
        let mut written = 0u64;

        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| download_error(e.to_string()))?
        {
            file.write_all(&chunk)
                .await
                .map_err(|e| download_error(e.to_string()))?;
            written += chunk.len() as u64;
            bar.set_position(written);
        }
        file.flush()
            .await
            .map_err(|e| download_error(e.to_string()))?;
        bar.finish_and_clear();

        Ok(written)
    }
}

fn partial_path(destination: &Path) -> PathBuf {
    let mut name = destination.as_os_str().to_owned();
    name.push(".part");
    PathBuf::from(name)
}

#[async_trait]
impl AssetDownloader for HttpDownloader {
    async fn download(&self, url: &str, destination: &Path) -> Result<u64> {
        let partial = partial_path(destination);
        debug!(%url, destination = %destination.display(), "downloading asset");

        match self.stream_to(url, &partial).await {
            Ok(bytes) => {
                tokio::fs::rename(&partial, destination)
                    .await
                    .map_err(|e| ActionError::Download {
                        url: url.to_string(),
                        details: e.to_string(),
                    })?;
                Ok(bytes)
            }
            Err(e) => {
                let _ = tokio::fs::remove_file(&partial).await;
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn serve_asset(status: u16, body: Vec<u8>) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/asset.tar.gz"))
            .respond_with(ResponseTemplate::new(status).set_body_bytes(body))
            .mount(&server)
            .await;
        server
    }

    #[test]
    fn test_partial_path() {
        assert_eq!(
            partial_path(Path::new("/tmp/manifest.tar.gz")),
            PathBuf::from("/tmp/manifest.tar.gz.part")
        );
    }

    #[tokio::test]
    async fn test_download_writes_destination() {
        let payload = vec![7u8; 10_000];
        let server = serve_asset(200, payload.clone()).await;
        let temp = TempDir::new().unwrap();
        let destination = temp.path().join("asset.tar.gz");

        let downloader = HttpDownloader::new().unwrap().with_progress(false);
        let bytes = downloader
            .download(&format!("{}/asset.tar.gz", server.uri()), &destination)
            .await
            .unwrap();

        assert_eq!(bytes, 10_000);
        assert_eq!(std::fs::read(&destination).unwrap(), payload);
        assert!(!partial_path(&destination).exists());
    }

    #[tokio::test]
    async fn test_failed_download_leaves_nothing_behind() {
        let server = serve_asset(404, b"missing".to_vec()).await;
        let temp = TempDir::new().unwrap();
        let destination = temp.path().join("asset.tar.gz");

        let downloader = HttpDownloader::new().unwrap().with_progress(false);
        let err = downloader
            .download(&format!("{}/asset.tar.gz", server.uri()), &destination)
            .await
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<ActionError>(),
            Some(ActionError::Download { .. })
        ));
        assert!(!destination.exists());
        assert!(!partial_path(&destination).exists());
    }
}
