use crate::audit::domain::AuditReport;
use crate::shared::Result;
use std::path::PathBuf;

/// Everything a scan needs to locate and audit one lockfile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanRequest {
    /// Directory the lockfile is discovered in, and relative paths resolve against
    pub working_dir: PathBuf,
    /// Explicit lockfile path; `None` discovers `uv.lock` in `working_dir`
    pub lockfile: Option<PathBuf>,
    /// Advisory identifiers to leave out of the report, forwarded verbatim
    pub ignore: Vec<String>,
}

/// DependencyScanner port for matching a lockfile against advisories
pub trait DependencyScanner {
    /// Scans the requested lockfile and returns the findings
    ///
    /// # Errors
    /// Returns an error if:
    /// - The lockfile cannot be found or parsed
    /// - The advisory database cannot be read
    fn scan(&self, request: &ScanRequest) -> Result<AuditReport>;
}
