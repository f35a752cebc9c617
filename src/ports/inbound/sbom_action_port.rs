use crate::application::dto::{ActionRequest, ActionResponse};
use crate::shared::Result;
use async_trait::async_trait;

/// SbomActionPort - Inbound port for the acquire/generate/publish pipeline
///
/// This is the application's public entry point. `main` builds an
/// [`ActionRequest`] from the inputs and hands it to an implementation.
#[async_trait]
pub trait SbomActionPort {
    /// Runs the whole pipeline once
    ///
    /// # Errors
    /// Returns the first fatal error. Its context names the step that failed,
    /// and the root cause is usually an `ActionError` carrying the category.
    async fn run(&self, request: ActionRequest) -> Result<ActionResponse>;
}
