use std::path::PathBuf;

/// Upstream coordinates and canonical binary name of a vendored CLI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolSpec {
    pub owner: &'static str,
    pub repository: &'static str,
    pub binary_name: &'static str,
}

impl ToolSpec {
    /// The Manifest CLI published at github.com/manifest-cyber/cli
    pub const MANIFEST_CLI: ToolSpec = ToolSpec {
        owner: "manifest-cyber",
        repository: "cli",
        binary_name: "manifest",
    };

    pub fn slug(&self) -> String {
        format!("{}/{}", self.owner, self.repository)
    }

    /// Release asset name for the given platform
    pub fn asset_name(&self, platform: Platform) -> String {
        format!("{}_{}_x86_64.tar.gz", self.binary_name, platform.as_str())
    }
}

/// Platform whose release asset is fetched.
///
/// Chosen by the local-testing toggle rather than by inspecting the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Platform {
    #[default]
    Linux,
    Darwin,
}

impl Platform {
    pub fn for_local_testing(test_locally: bool) -> Self {
        if test_locally {
            Platform::Darwin
        } else {
            Platform::Linux
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Linux => "linux",
            Platform::Darwin => "darwin",
        }
    }
}

/// A binary materialized on local disk and ready to run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstalledTool {
    pub binary_name: String,
    pub version: String,
    /// Directory exposed on the search path of later commands
    pub bin_dir: PathBuf,
    pub binary_path: PathBuf,
    /// True when an existing binary was reused without downloading
    pub cached: bool,
}

/// True when the asset name denotes a gzip-compressed tarball
pub fn is_tarball(asset_name: &str) -> bool {
    asset_name.ends_with(".tar.gz") || asset_name.ends_with(".tgz")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_asset_names() {
        let tool = ToolSpec::MANIFEST_CLI;
        assert_eq!(tool.asset_name(Platform::Linux), "manifest_linux_x86_64.tar.gz");
        assert_eq!(
            tool.asset_name(Platform::Darwin),
            "manifest_darwin_x86_64.tar.gz"
        );
        assert_eq!(tool.slug(), "manifest-cyber/cli");
    }

    #[test]
    fn test_platform_toggle() {
        assert_eq!(Platform::for_local_testing(false), Platform::Linux);
        assert_eq!(Platform::for_local_testing(true), Platform::Darwin);
    }

    #[test]
    fn test_is_tarball() {
        assert!(is_tarball("manifest_linux_x86_64.tar.gz"));
        assert!(is_tarball("manifest.tgz"));
        assert!(!is_tarball("manifest"));
        assert!(!is_tarball("manifest.zip"));
    }
}
