pub mod action_config;
pub mod command_line;
pub mod generator;
pub mod labels;
pub mod publish_options;
pub mod release;
pub mod sbom_file;
pub mod sbom_format;
pub mod tool;

pub use action_config::ActionConfig;
pub use command_line::CommandLine;
pub use generator::Generator;
pub use labels::LabelList;
pub use publish_options::{PublishMode, Relationship, StderrPolicy};
pub use release::{Release, ReleaseAsset, ResolvedRelease};
pub use sbom_file::SbomFile;
pub use sbom_format::SbomFormat;
pub use tool::{InstalledTool, Platform, ToolSpec};
