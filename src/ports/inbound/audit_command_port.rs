use crate::application::dto::{CheckOptions, UpdateOptions};
use crate::shared::error::ExitCode;
use crate::shared::Result;

/// AuditCommandPort - the three commands the CLI can issue
///
/// Implementations run exactly one command per call. Fatal conditions come
/// back as `Err`; a completed command returns the exit code its outcome
/// warrants (for `check`, whether anything vulnerable was found).
pub trait AuditCommandPort {
    /// Audits a lockfile, optionally refreshing the advisory database first
    fn check(&mut self, options: &CheckOptions) -> Result<ExitCode>;

    /// Refreshes the advisory database
    fn update(&mut self, options: &UpdateOptions) -> Result<ExitCode>;

    /// Prints the program version and the number of known advisories
    fn version(&mut self) -> Result<ExitCode>;
}
