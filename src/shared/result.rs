/// Result alias used throughout the action; fatal causes are `ActionError`
/// values wrapped in `anyhow::Error` so step context can be attached on the way up.
pub type Result<T> = std::result::Result<T, anyhow::Error>;
