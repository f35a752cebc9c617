use async_trait::async_trait;
use manifest_sbom::prelude::*;
use std::sync::{Arc, Mutex};

/// Mock ReleaseIndex serving a fixed release
pub struct MockReleaseIndex {
    pub release: Release,
    pub should_fail: bool,
    pub queries: Arc<Mutex<Vec<String>>>,
}

impl MockReleaseIndex {
    /// A release carrying the Linux and Darwin tarballs of the Manifest CLI
    pub fn new(tag: &str) -> Self {
        let assets = ["linux", "darwin"]
            .iter()
            .map(|platform| ReleaseAsset {
                name: format!("manifest_{}_x86_64.tar.gz", platform),
                download_url: format!(
                    "https://downloads.test/{}/manifest_{}_x86_64.tar.gz",
                    tag, platform
                ),
            })
            .collect();
        Self::with_release(Release {
            tag: tag.to_string(),
            assets,
        })
    }

    pub fn with_release(release: Release) -> Self {
        Self {
            release,
            should_fail: false,
            queries: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_failure() -> Self {
        Self {
            should_fail: true,
            ..Self::new("v0.0.0")
        }
    }
}

#[async_trait]
impl ReleaseIndex for MockReleaseIndex {
    async fn latest_release(&self, owner: &str, repository: &str) -> Result<Release> {
        self.queries
            .lock()
            .unwrap()
            .push(format!("{}/{}", owner, repository));
        if self.should_fail {
            return Err(ActionError::ReleaseLookup {
                repository: format!("{}/{}", owner, repository),
                details: "mock release index failure".to_string(),
            }
            .into());
        }
        Ok(self.release.clone())
    }
}
