use crate::audit::domain::{Advisory, PackageName, UpdateOutcome};
use crate::shared::Result;
use std::path::PathBuf;

/// AdvisoryDatabase port for the local vulnerability advisory store
///
/// The storage layout and the transport used to refresh it belong to the
/// adapter; the core only sees the tri-state update outcome, the advisory
/// count and per-package lookups.
pub trait AdvisoryDatabase {
    /// Attempts to refresh the local copy.
    ///
    /// # Arguments
    /// * `quiet` - Ask the underlying tool to suppress its own output
    fn update(&self, quiet: bool) -> UpdateOutcome;

    /// Where the local copy lives, for messages
    fn location(&self) -> PathBuf;

    /// Number of advisories currently stored locally (0 when none are present)
    fn size(&self) -> Result<usize>;

    /// Name of the external tool the update depends on
    fn required_tool(&self) -> &str;

    /// Whether [`AdvisoryDatabase::required_tool`] can be run
    fn required_tool_present(&self) -> bool;

    /// Advisories recorded against a package
    ///
    /// # Errors
    /// Returns an error if an advisory file exists but cannot be read or parsed
    fn advisories_for(&self, package: &PackageName) -> Result<Vec<Advisory>>;
}
