use crate::sbom_action::domain::Relationship;
use crate::shared::Result;
use async_trait::async_trait;
use secrecy::SecretString;
use std::path::PathBuf;

/// Everything the direct publish needs; the API key stays wrapped
#[derive(Debug)]
pub struct PublishRequest {
    pub file_path: PathBuf,
    pub relationship: Relationship,
    /// Empty means the client's default source label
    pub source: String,
    pub api_key: SecretString,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishReceipt {
    pub endpoint: String,
    pub status: u16,
}

/// SbomPublisher port for uploading an SBOM over HTTP without the CLI
#[async_trait]
pub trait SbomPublisher: Send + Sync {
    /// Uploads the SBOM at `request.file_path`
    ///
    /// # Errors
    /// Returns `ActionError::PublishRejected` for a non-2xx answer and
    /// `ActionError::Network` for transport failures
    async fn publish(&self, request: &PublishRequest) -> Result<PublishReceipt>;
}
