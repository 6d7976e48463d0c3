use crate::audit::domain::{Advisory, AuditFinding, Package};

/// AdvisoryMatcher decides which advisories apply to a locked package
///
/// Pure domain service: it never touches the database, it only filters the
/// candidates it is handed.
pub struct AdvisoryMatcher;

impl AdvisoryMatcher {
    /// Returns one finding per advisory that affects `package` and is not ignored.
    ///
    /// The ignore list is compared verbatim against every identifier of an
    /// advisory; it is neither validated nor deduplicated here.
    pub fn findings_for(
        package: &Package,
        candidates: Vec<Advisory>,
        ignore: &[String],
    ) -> Vec<AuditFinding> {
        candidates
            .into_iter()
            .filter(|advisory| advisory.affects(package.version()))
            .filter(|advisory| {
                let ignored = advisory.is_ignored_by(ignore);
                if ignored {
                    tracing::debug!(
                        advisory = advisory.id(),
                        package = %package.name(),
                        "advisory ignored"
                    );
                }
                !ignored
            })
            .map(|advisory| AuditFinding::UnpatchedPackage {
                package: package.clone(),
                advisory,
            })
            .collect()
    }
}
