use async_trait::async_trait;
use manifest_sbom::prelude::*;
use secrecy::ExposeSecret;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// What the mock publisher saw for one request
#[derive(Debug, Clone)]
pub struct PublishedSbom {
    pub file_path: PathBuf,
    pub contents: String,
    pub relationship: Relationship,
    pub api_key: String,
}

/// Mock SbomPublisher answering with a fixed status
#[derive(Clone)]
pub struct MockSbomPublisher {
    pub status: u16,
    pub published: Arc<Mutex<Vec<PublishedSbom>>>,
}

impl MockSbomPublisher {
    pub fn new() -> Self {
        Self::with_status(200)
    }

    pub fn with_status(status: u16) -> Self {
        Self {
            status,
            published: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn get_published(&self) -> Vec<PublishedSbom> {
        self.published.lock().unwrap().clone()
    }
}

impl Default for MockSbomPublisher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SbomPublisher for MockSbomPublisher {
    async fn publish(&self, request: &PublishRequest) -> Result<PublishReceipt> {
        let contents = std::fs::read_to_string(&request.file_path)?;
        self.published.lock().unwrap().push(PublishedSbom {
            file_path: request.file_path.clone(),
            contents,
            relationship: request.relationship,
            api_key: request.api_key.expose_secret().to_string(),
        });
        if !(200..300).contains(&self.status) {
            return Err(ActionError::PublishRejected {
                status: self.status,
                message: "mock rejection".to_string(),
            }
            .into());
        }
        Ok(PublishReceipt {
            endpoint: "https://api.test/v1/sbom/upload".to_string(),
            status: self.status,
        })
    }
}
