/// ProgressReporter port for reporting progress during operations
///
/// This port abstracts progress reporting (e.g., to stderr)
/// to provide user feedback during long-running operations.
pub trait ProgressReporter {
    /// Reports a progress message
    ///
    /// # Arguments
    /// * `message` - The progress message to report
    fn report(&self, message: &str);

    /// Reports incremental progress
    ///
    /// The total is never passed: during graph discovery the number of
    /// packages still to fetch is unknown, so only a running count is
    /// available.
    ///
    /// # Arguments
    /// * `current` - Number of packages fetched so far
    /// * `message` - Message describing the current step
    fn report_progress(&self, current: usize, message: &str);

    /// Reports an error or warning message
    ///
    /// # Arguments
    /// * `message` - The error/warning message
    fn report_error(&self, message: &str);

    /// Reports completion of an operation
    ///
    /// # Arguments
    /// * `message` - Completion message
    fn report_completion(&self, message: &str);
}
