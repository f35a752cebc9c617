/// Process adapters spawning child programs
mod project_version_source;
mod shell_runner;

pub use project_version_source::ProjectVersionSource;
pub use shell_runner::ShellRunner;
