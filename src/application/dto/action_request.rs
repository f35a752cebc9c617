use crate::sbom_action::domain::{ActionConfig, Platform};
use std::path::PathBuf;

/// ActionRequest - Everything one pipeline run needs
///
/// The configuration has already been validated; paths come from the
/// command line or the runner environment.
#[derive(Debug)]
pub struct ActionRequest {
    pub config: ActionConfig,
    /// Directory the commands run in (the checked-out repository)
    pub work_dir: PathBuf,
    /// Local SBOM post-processing script, if any
    pub hook_script: Option<PathBuf>,
    /// Which release asset to install
    pub platform: Platform,
}

impl ActionRequest {
    pub fn new(config: ActionConfig, work_dir: PathBuf, hook_script: Option<PathBuf>) -> Self {
        let platform = Platform::for_local_testing(config.test_locally);
        Self {
            config,
            work_dir,
            hook_script,
            platform,
        }
    }

    /// Absolute-or-relative path of the generated SBOM
    pub fn sbom_path(&self) -> PathBuf {
        self.config.sbom_file.resolve(&self.work_dir)
    }

    /// Source tree the version candidates are read from
    pub fn target_dir(&self) -> PathBuf {
        self.work_dir.join(&self.config.target_path)
    }
}
