use clap::Parser;
use std::path::PathBuf;

/// Name of the hook script looked up in the action directory
pub const DEFAULT_HOOK_SCRIPT: &str = "update-sbom.sh";

/// A single `KEY=VALUE` input override
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputPair {
    pub key: String,
    pub value: String,
}

impl std::str::FromStr for InputPair {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('=') {
            Some((key, value)) if !key.trim().is_empty() => Ok(InputPair {
                key: key.trim().to_string(),
                value: value.to_string(),
            }),
            _ => Err(format!(
                "Invalid input: {}. Please specify it as KEY=VALUE (e.g. sbomGenerator=syft)",
                s
            )),
        }
    }
}

/// Install the Manifest CLI, generate an SBOM and optionally publish it
#[derive(Parser, Debug)]
#[command(name = "manifest-sbom")]
#[command(version)]
#[command(
    about = "Install the Manifest CLI, generate an SBOM and optionally publish it",
    long_about = None
)]
pub struct Args {
    /// Action input override, highest precedence (repeatable): -i sbomGenerator=syft
    #[arg(short, long = "input", value_name = "KEY=VALUE")]
    pub inputs: Vec<InputPair>,

    /// YAML config file (defaults to manifest-sbom.config.yml in the work dir)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory the run operates in
    #[arg(long, env = "GITHUB_WORKSPACE", default_value = ".")]
    pub work_dir: PathBuf,

    /// Directory holding the action's bundled scripts
    #[arg(long, env = "GITHUB_ACTION_PATH")]
    pub action_dir: Option<PathBuf>,

    /// Local SBOM update hook (defaults to <action-dir>/update-sbom.sh)
    #[arg(long, value_name = "FILE")]
    pub hook_script: Option<PathBuf>,

    /// Install root for downloaded tools
    #[arg(long, env = "RUNNER_TOOL_CACHE")]
    pub tool_dir: Option<PathBuf>,

    /// Scratch directory for downloads
    #[arg(long, env = "RUNNER_TEMP")]
    pub temp_dir: Option<PathBuf>,

    /// Directory artifacts are stored under
    #[arg(long)]
    pub artifact_dir: Option<PathBuf>,

    /// Enable debug diagnostics on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn temp_dir(&self) -> PathBuf {
        self.temp_dir.clone().unwrap_or_else(std::env::temp_dir)
    }

    pub fn tool_dir(&self) -> PathBuf {
        self.tool_dir
            .clone()
            .unwrap_or_else(|| self.temp_dir().join("manifest-sbom").join("tools"))
    }

    pub fn artifact_dir(&self) -> PathBuf {
        self.artifact_dir
            .clone()
            .unwrap_or_else(|| self.temp_dir().join("manifest-sbom-artifacts"))
    }

    pub fn download_dir(&self) -> PathBuf {
        self.temp_dir().join("manifest-sbom").join("downloads")
    }

    /// Explicit hook, else the bundled one when an action directory is known
    pub fn hook_script(&self) -> Option<PathBuf> {
        self.hook_script.clone().or_else(|| {
            self.action_dir
                .as_ref()
                .map(|dir| dir.join(DEFAULT_HOOK_SCRIPT))
        })
    }

    pub fn input_pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.inputs
            .iter()
            .map(|pair| (pair.key.as_str(), pair.value.as_str()))
    }
}
