/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (release index, filesystem, processes,
/// the publish endpoint and the console).
pub mod archive_extractor;
pub mod artifact_store;
pub mod asset_downloader;
pub mod command_runner;
pub mod progress_reporter;
pub mod release_index;
pub mod sbom_publisher;
pub mod tool_provisioner;
pub mod version_source;

pub use archive_extractor::ArchiveExtractor;
pub use artifact_store::{ArtifactStore, UploadDescriptor};
pub use asset_downloader::AssetDownloader;
pub use command_runner::{CommandOutput, CommandRunner};
pub use progress_reporter::ProgressReporter;
pub use release_index::ReleaseIndex;
pub use sbom_publisher::{PublishReceipt, PublishRequest, SbomPublisher};
pub use tool_provisioner::ToolProvisioner;
pub use version_source::VersionSource;
