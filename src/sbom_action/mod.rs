//! Domain layer for the SBOM action: configuration record, command model,
//! capability rules and the pure services that build commands and versions.
pub mod domain;
pub mod policies;
pub mod services;
