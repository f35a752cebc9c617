/// Console adapters for user-facing output
mod actions_reporter;

pub use actions_reporter::{escape_data, ActionsConsoleReporter, OutputMode};
