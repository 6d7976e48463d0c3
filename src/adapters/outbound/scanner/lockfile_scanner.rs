use super::uv_lock::parse_uv_lock;
use crate::audit::domain::{AuditFinding, AuditReport};
use crate::audit::services::{AdvisoryMatcher, SourcePolicy};
use crate::ports::outbound::{AdvisoryDatabase, DependencyScanner, LockfileReader, ScanRequest};
use crate::shared::Result;

/// LockfileScanner adapter implementing the DependencyScanner port
///
/// Reads a uv.lock through the injected reader, looks every locked package
/// up in the advisory database and lets the domain matcher decide which
/// advisories apply.
///
/// # Type Parameters
/// * `R` - LockfileReader implementation
/// * `D` - AdvisoryDatabase implementation
pub struct LockfileScanner<R: LockfileReader, D: AdvisoryDatabase> {
    lockfile_reader: R,
    advisory_database: D,
}

impl<R: LockfileReader, D: AdvisoryDatabase> LockfileScanner<R, D> {
    pub fn new(lockfile_reader: R, advisory_database: D) -> Self {
        Self {
            lockfile_reader,
            advisory_database,
        }
    }
}

impl<R: LockfileReader, D: AdvisoryDatabase> DependencyScanner for LockfileScanner<R, D> {
    fn scan(&self, request: &ScanRequest) -> Result<AuditReport> {
        let lockfile = self
            .lockfile_reader
            .read_lockfile(&request.working_dir, request.lockfile.as_deref())?;
        let packages = parse_uv_lock(&lockfile.path, &lockfile.content)?;
        tracing::debug!(
            lockfile = %lockfile.path.display(),
            packages = packages.len(),
            "parsed lockfile"
        );

        let insecure = SourcePolicy::insecure_uris(
            packages
                .iter()
                .flat_map(|locked| locked.source_uris.iter().map(String::as_str)),
        );
        let mut findings: Vec<AuditFinding> = insecure
            .into_iter()
            .map(|uri| AuditFinding::InsecureSource { uri })
            .collect();

        for locked in &packages {
            let candidates = self
                .advisory_database
                .advisories_for(locked.package.name())?;
            findings.extend(AdvisoryMatcher::findings_for(
                &locked.package,
                candidates,
                &request.ignore,
            ));
        }

        Ok(AuditReport::new(lockfile.path, packages.len(), findings))
    }
}
