/// Filesystem adapters for archives and artifacts
mod directory_artifact_store;
mod tar_extractor;

pub use directory_artifact_store::DirectoryArtifactStore;
pub use tar_extractor::TarGzExtractor;
