use crate::shared::Result;

/// OutputPresenter port for presenting the payload
///
/// This port abstracts the payload destination (stdout or a file).
/// Diagnostics never travel through it; only the listings, trees, and
/// reverse-lookup results a user would pipe into another tool.
pub trait OutputPresenter {
    /// Presents the payload to the output destination
    ///
    /// # Arguments
    /// * `content` - The rendered payload to present
    ///
    /// # Errors
    /// Returns an error if:
    /// - Writing to the output destination fails
    /// - File permissions prevent writing
    fn present(&self, content: &str) -> Result<()>;
}
