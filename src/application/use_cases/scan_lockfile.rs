use crate::application::dto::CheckOptions;
use crate::audit::domain::AuditReport;
use crate::ports::outbound::{DependencyScanner, ScanRequest};
use crate::shared::Result;

/// ScanLockfileUseCase - turns check options into a scan request and runs it
///
/// # Type Parameters
/// * `S` - DependencyScanner implementation
pub struct ScanLockfileUseCase<'a, S: DependencyScanner> {
    scanner: &'a S,
}

impl<'a, S: DependencyScanner> ScanLockfileUseCase<'a, S> {
    pub fn new(scanner: &'a S) -> Self {
        Self { scanner }
    }

    /// The ignore list is forwarded as given, duplicates included
    pub fn execute(&self, options: &CheckOptions) -> Result<AuditReport> {
        let request = ScanRequest {
            working_dir: options.working_dir.clone(),
            lockfile: options.file.clone(),
            ignore: options.ignore.clone(),
        };
        tracing::debug!(
            working_dir = %request.working_dir.display(),
            ignored = request.ignore.len(),
            "scanning lockfile"
        );

        let report = self.scanner.scan(&request)?;
        tracing::debug!(
            packages = report.packages_scanned(),
            findings = report.findings().len(),
            "scan finished"
        );
        Ok(report)
    }
}
