/// Network adapters for external API calls
mod github_release_client;
mod http_downloader;
mod manifest_api_client;

pub use github_release_client::{token_from_env, GitHubReleaseClient, GITHUB_API_URL};
pub use http_downloader::HttpDownloader;
pub use manifest_api_client::{
    upload_endpoint, ManifestApiClient, DEFAULT_SOURCE, DEFAULT_UPLOAD_URL, LOCAL_UPLOAD_URL,
};
