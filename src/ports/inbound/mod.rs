/// Inbound ports (Driving ports) - Use case interfaces
///
/// These ports define the interfaces that external adapters (the CLI, the
/// Actions runner environment) use to drive the application core.
pub mod input_source;
pub mod sbom_action_port;

pub use input_source::InputSource;
pub use sbom_action_port::SbomActionPort;
