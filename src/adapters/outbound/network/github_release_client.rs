use crate::ports::outbound::ReleaseIndex;
use crate::sbom_action::domain::{Release, ReleaseAsset};
use crate::shared::error::ActionError;
use crate::shared::Result;
use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

pub const GITHUB_API_URL: &str = "https://api.github.com";

#[derive(Debug, Deserialize)]
struct GitHubRelease {
    tag_name: String,
    #[serde(default)]
    assets: Vec<GitHubAsset>,
}

#[derive(Debug, Deserialize)]
struct GitHubAsset {
    name: String,
    browser_download_url: String,
}

/// GitHubReleaseClient adapter for the GitHub releases API
///
/// Implements the ReleaseIndex port. A `GITHUB_TOKEN` (or `GH_TOKEN`) is sent
/// as a bearer token when present so CI runners are not throttled by the
/// anonymous rate limit.
pub struct GitHubReleaseClient {
    client: reqwest::Client,
    api_base: String,
    token: Option<SecretString>,
}

impl GitHubReleaseClient {
    /// Creates a client against api.github.com using the token from the environment
    pub fn new() -> Result<Self> {
        let version = env!("CARGO_PKG_VERSION");
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(format!("manifest-sbom/{}", version))
            .build()?;

        Ok(Self {
            client,
            api_base: GITHUB_API_URL.to_string(),
            token: token_from_env(),
        })
    }

    /// Points the client at another API root (GitHub Enterprise, tests)
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_token(mut self, token: Option<SecretString>) -> Self {
        self.token = token;
        self
    }

    fn latest_release_url(&self, owner: &str, repository: &str) -> String {
        format!(
            "{}/repos/{}/{}/releases/latest",
            self.api_base,
            urlencoding::encode(owner),
            urlencoding::encode(repository)
        )
    }
}

/// Reads `GITHUB_TOKEN`, falling back to `GH_TOKEN`
pub fn token_from_env() -> Option<SecretString> {
    ["GITHUB_TOKEN", "GH_TOKEN"]
        .iter()
        .filter_map(|name| std::env::var(name).ok())
        .find(|value| !value.trim().is_empty())
        .map(SecretString::from)
}

#[async_trait]
impl ReleaseIndex for GitHubReleaseClient {
    async fn latest_release(&self, owner: &str, repository: &str) -> Result<Release> {
        let slug = format!("{}/{}", owner, repository);
        let lookup_error = |details: String| ActionError::ReleaseLookup {
            repository: slug.clone(),
            details,
        };

        let url = self.latest_release_url(owner, repository);
        debug!(%url, "fetching latest release");

        let mut request = self
            .client
            .get(&url)
            .header("Accept", "application/vnd.github+json");
        if let Some(token) = &self.token {
            request = request.bearer_auth(token.expose_secret());
        }

        let response = request
            .send()
            .await
            .map_err(|e| lookup_error(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(lookup_error(format!("release index returned HTTP {}", status)).into());
        }

        let release: GitHubRelease = response
            .json()
            .await
            .map_err(|e| lookup_error(format!("unreadable release metadata: {}", e)))?;
        debug!(tag = %release.tag_name, assets = release.assets.len(), "latest release");

        Ok(Release {
            tag: release.tag_name,
            assets: release
                .assets
                .into_iter()
                .map(|asset| ReleaseAsset {
                    name: asset.name,
                    download_url: asset.browser_download_url,
                })
                .collect(),
        })
    }
}
