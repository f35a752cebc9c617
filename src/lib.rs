//! manifest-sbom - SBOM generation step for CI pipelines
//!
//! This library installs the Manifest CLI from its GitHub releases, drives it to
//! generate a Software Bill of Materials for a source tree, optionally runs a
//! local post-processing hook, stores the SBOM as a build artifact and publishes
//! it to the Manifest platform. It follows a hexagonal architecture.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`sbom_action`): Configuration record, command model and pure services
//! - **Application Layer** (`application`): The pipeline use case and its DTOs
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use manifest_sbom::prelude::*;
//! use std::path::PathBuf;
//!
//! # async fn run() -> Result<()> {
//! let inputs = MapInputs::new("example", [("sbomGenerator", "syft"), ("sbomPublish", "false")]);
//! let config = ActionConfig::from_fields(|field| inputs.resolve(field))?;
//!
//! // Create adapters
//! let use_case = RunActionUseCase::new(
//!     GitHubReleaseClient::new()?,
//!     ToolAcquirer::new(
//!         HttpDownloader::new()?,
//!         TarGzExtractor::new(),
//!         PathBuf::from("/tmp/tools"),
//!         PathBuf::from("/tmp/downloads"),
//!     ),
//!     ShellRunner::new(),
//!     ProjectVersionSource::new(),
//!     DirectoryArtifactStore::new("/tmp/artifacts"),
//!     None::<ManifestApiClient>,
//!     ActionsConsoleReporter::from_env(),
//! );
//!
//! // Execute
//! let response = use_case
//!     .execute(ActionRequest::new(config, PathBuf::from("."), None))
//!     .await?;
//! println!("{}", response.sbom_path.display());
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod cli;
pub mod config;
pub mod ports;
pub mod sbom_action;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::inbound::{EnvInputs, LayeredInputs, MapInputs};
    pub use crate::adapters::outbound::console::{ActionsConsoleReporter, OutputMode};
    pub use crate::adapters::outbound::filesystem::{DirectoryArtifactStore, TarGzExtractor};
    pub use crate::adapters::outbound::network::{
        GitHubReleaseClient, HttpDownloader, ManifestApiClient,
    };
    pub use crate::adapters::outbound::process::{ProjectVersionSource, ShellRunner};
    pub use crate::application::dto::{ActionRequest, ActionResponse, PublishOutcome, SkipReason};
    pub use crate::application::use_cases::{RunActionUseCase, Step, ToolAcquirer};
    pub use crate::ports::inbound::{InputSource, SbomActionPort};
    pub use crate::ports::outbound::{
        ArchiveExtractor, ArtifactStore, AssetDownloader, CommandOutput, CommandRunner,
        ProgressReporter, PublishReceipt, PublishRequest, ReleaseIndex, SbomPublisher,
        ToolProvisioner, UploadDescriptor, VersionSource,
    };
    pub use crate::sbom_action::domain::{
        ActionConfig, CommandLine, Generator, InstalledTool, LabelList, Platform, PublishMode,
        Relationship, Release, ReleaseAsset, ResolvedRelease, SbomFile, SbomFormat,
        StderrPolicy, ToolSpec,
    };
    pub use crate::sbom_action::services::{
        CapabilityGate, CapabilityWarning, CommandBuilder, ResolvedVersion, VersionOrigin,
    };
    pub use crate::shared::error::{ActionError, ErrorCategory};
    pub use crate::shared::Result;
}
