use crate::ports::outbound::{PublishReceipt, PublishRequest, SbomPublisher};
use crate::shared::error::ActionError;
use crate::shared::security::read_regular_file;
use crate::shared::Result;
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use secrecy::ExposeSecret;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info};

/// Upload path below the API base
pub const UPLOAD_PATH: &str = "/v1/sbom/upload";
/// Production upload endpoint
pub const DEFAULT_UPLOAD_URL: &str = "https://api.manifestcyber.com/v1/sbom/upload";
/// Upload endpoint of a locally running API
pub const LOCAL_UPLOAD_URL: &str = "http://127.0.0.1:8081/v1/sbom/upload";
/// Source label used when none was configured
pub const DEFAULT_SOURCE: &str = "github-action";

/// Picks the upload endpoint: explicit override, then local testing, then production
///
/// The override is the API base also handed to the CLI as `--api-uri`, so the
/// upload path is appended unless it is already there.
pub fn upload_endpoint(api_uri: &str, test_locally: bool) -> String {
    let api_uri = api_uri.trim().trim_end_matches('/');
    if api_uri.ends_with(UPLOAD_PATH) {
        api_uri.to_string()
    } else if !api_uri.is_empty() {
        format!("{}{}", api_uri, UPLOAD_PATH)
    } else if test_locally {
        LOCAL_UPLOAD_URL.to_string()
    } else {
        DEFAULT_UPLOAD_URL.to_string()
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UploadPayload<'a> {
    base64_encoded_sbom: String,
    relationship: &'a str,
    filename: String,
    source: &'a str,
}

/// ManifestApiClient adapter for publishing an SBOM without the CLI
///
/// Sends one authenticated PUT with the SBOM base64-encoded in a JSON body.
/// There is no retry; any non-2xx answer is fatal.
pub struct ManifestApiClient {
    client: reqwest::Client,
    endpoint: String,
}

impl ManifestApiClient {
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        let version = env!("CARGO_PKG_VERSION");
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(120))
            .user_agent(format!("manifest-sbom/{}", version))
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn payload<'a>(request: &'a PublishRequest, contents: &[u8]) -> UploadPayload<'a> {
        let source = request.source.trim();
        UploadPayload {
            base64_encoded_sbom: STANDARD.encode(contents),
            relationship: request.relationship.as_str(),
            filename: request.file_path.to_string_lossy().to_string(),
            source: if source.is_empty() { DEFAULT_SOURCE } else { source },
        }
    }
}

#[async_trait]
impl SbomPublisher for ManifestApiClient {
    async fn publish(&self, request: &PublishRequest) -> Result<PublishReceipt> {
        let contents = read_regular_file(&request.file_path, "SBOM")?;
        let payload = Self::payload(request, &contents);
        debug!(
            endpoint = %self.endpoint,
            bytes = contents.len(),
            relationship = payload.relationship,
            "uploading SBOM"
        );

        let response = self
            .client
            .put(&self.endpoint)
            .bearer_auth(request.api_key.expose_secret())
            .json(&payload)
            .send()
            .await
            .map_err(|e| ActionError::Network {
                endpoint: self.endpoint.clone(),
                details: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ActionError::PublishRejected {
                status: status.as_u16(),
                message: message.trim().to_string(),
            }
            .into());
        }

        info!(endpoint = %self.endpoint, status = status.as_u16(), "SBOM accepted");
        Ok(PublishReceipt {
            endpoint: self.endpoint.clone(),
            status: status.as_u16(),
        })
    }
}
