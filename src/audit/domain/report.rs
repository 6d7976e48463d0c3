use super::advisory::Advisory;
use super::package::Package;
use std::path::{Path, PathBuf};

/// One problem found in a lockfile
#[derive(Debug, Clone, PartialEq)]
pub enum AuditFinding {
    /// A locked package version affected by an advisory
    UnpatchedPackage { package: Package, advisory: Advisory },
    /// A package index or download URL fetched over a plaintext protocol
    InsecureSource { uri: String },
}

/// Everything a scan produced for one lockfile
#[derive(Debug, Clone, PartialEq)]
pub struct AuditReport {
    lockfile: PathBuf,
    packages_scanned: usize,
    findings: Vec<AuditFinding>,
}

impl AuditReport {
    pub fn new(lockfile: PathBuf, packages_scanned: usize, findings: Vec<AuditFinding>) -> Self {
        Self {
            lockfile,
            packages_scanned,
            findings,
        }
    }

    pub fn lockfile(&self) -> &Path {
        &self.lockfile
    }

    pub fn packages_scanned(&self) -> usize {
        self.packages_scanned
    }

    pub fn findings(&self) -> &[AuditFinding] {
        &self.findings
    }

    pub fn is_vulnerable(&self) -> bool {
        !self.findings.is_empty()
    }

    pub fn unpatched_packages(&self) -> impl Iterator<Item = (&Package, &Advisory)> {
        self.findings.iter().filter_map(|finding| match finding {
            AuditFinding::UnpatchedPackage { package, advisory } => Some((package, advisory)),
            AuditFinding::InsecureSource { .. } => None,
        })
    }

    pub fn insecure_sources(&self) -> impl Iterator<Item = &str> {
        self.findings.iter().filter_map(|finding| match finding {
            AuditFinding::InsecureSource { uri } => Some(uri.as_str()),
            AuditFinding::UnpatchedPackage { .. } => None,
        })
    }

    /// Number of distinct packages with at least one advisory
    pub fn vulnerable_package_count(&self) -> usize {
        let mut names: Vec<String> = self
            .unpatched_packages()
            .map(|(package, _)| package.name().normalized())
            .collect();
        names.sort();
        names.dedup();
        names.len()
    }
}
