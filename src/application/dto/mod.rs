/// Data Transfer Objects for application layer
///
/// DTOs are used to transfer data between the application layer
/// and adapters, keeping the domain layer isolated.
mod action_request;
mod action_response;

pub use action_request::ActionRequest;
pub use action_response::{ActionResponse, PublishOutcome, SkipReason};
