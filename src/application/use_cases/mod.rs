/// Use cases module containing application business logic orchestration
mod acquire_tool;
mod run_action;

pub use acquire_tool::ToolAcquirer;
pub use run_action::{RunActionUseCase, Step};
