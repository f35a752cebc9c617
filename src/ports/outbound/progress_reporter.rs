/// ProgressReporter port for the user-facing log
///
/// This port abstracts where progress goes (workflow commands on a CI
/// runner, colored stderr on a terminal). Implementations must be
/// `Send + Sync` because the reporter is shared across awaited steps.
pub trait ProgressReporter: Send + Sync {
    /// Reports a progress message
    ///
    /// # Arguments
    /// * `message` - The progress message to report
    fn report(&self, message: &str);

    /// Reports a non-fatal problem
    ///
    /// # Arguments
    /// * `message` - The warning message
    fn report_warning(&self, message: &str);

    /// Reports an error message
    ///
    /// # Arguments
    /// * `message` - The error message
    fn report_error(&self, message: &str);

    /// Reports completion of an operation
    ///
    /// # Arguments
    /// * `message` - Completion message
    fn report_completion(&self, message: &str);

    /// Registers a value that must never appear in any later output
    fn register_secret(&self, secret: &str);
}
