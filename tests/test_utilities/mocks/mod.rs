/// Mock implementations for testing
mod mock_asset_downloader;
mod mock_progress_reporter;
mod mock_release_index;
mod mock_sbom_publisher;

pub use mock_asset_downloader::MockAssetDownloader;
pub use mock_progress_reporter::MockProgressReporter;
pub use mock_release_index::MockReleaseIndex;
pub use mock_sbom_publisher::MockSbomPublisher;
