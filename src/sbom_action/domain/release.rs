use crate::shared::error::ActionError;

/// A downloadable file attached to an upstream release
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseAsset {
    pub name: String,
    pub download_url: String,
}

/// Latest release metadata as returned by the release index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Release {
    pub tag: String,
    pub assets: Vec<ReleaseAsset>,
}

/// The release version plus the one asset selected for this platform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRelease {
    pub version: String,
    pub asset_name: String,
    pub download_url: String,
}

impl Release {
    /// Selects the first asset whose name equals `asset_name` exactly, in the
    /// order upstream returned them.
    ///
    /// # Errors
    /// Returns `ActionError::AssetNotFound` listing the available assets
    pub fn select_asset(
        &self,
        repository: &str,
        asset_name: &str,
    ) -> Result<ResolvedRelease, ActionError> {
        self.assets
            .iter()
            .find(|asset| asset.name == asset_name)
            .map(|asset| ResolvedRelease {
                version: self.tag.clone(),
                asset_name: asset.name.clone(),
                download_url: asset.download_url.clone(),
            })
            .ok_or_else(|| ActionError::AssetNotFound {
                asset: asset_name.to_string(),
                tag: self.tag.clone(),
                repository: repository.to_string(),
                available: if self.assets.is_empty() {
                    "(none)".to_string()
                } else {
                    self.assets
                        .iter()
                        .map(|a| a.name.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                },
            })
    }
}
