pub mod capability_gate;
pub mod command_builder;
pub mod version_resolver;

pub use capability_gate::{is_eligible, CapabilityGate, CapabilityWarning};
pub use command_builder::{BuiltCommand, CommandBuilder, API_KEY_ENV};
pub use version_resolver::{resolve_version, ResolvedVersion, VersionOrigin};
