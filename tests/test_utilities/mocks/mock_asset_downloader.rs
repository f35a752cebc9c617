use async_trait::async_trait;
use manifest_sbom::prelude::*;
use std::path::Path;
use std::sync::{Arc, Mutex};

/// Mock AssetDownloader writing canned bytes instead of fetching a URL
#[derive(Clone)]
pub struct MockAssetDownloader {
    pub payload: Vec<u8>,
    pub downloads: Arc<Mutex<Vec<String>>>,
}

impl MockAssetDownloader {
    pub fn new(payload: Vec<u8>) -> Self {
        Self {
            payload,
            downloads: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn download_count(&self) -> usize {
        self.downloads.lock().unwrap().len()
    }
}

#[async_trait]
impl AssetDownloader for MockAssetDownloader {
    async fn download(&self, url: &str, destination: &Path) -> Result<u64> {
        self.downloads.lock().unwrap().push(url.to_string());
        std::fs::write(destination, &self.payload)?;
        Ok(self.payload.len() as u64)
    }
}
