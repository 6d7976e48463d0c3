use std::sync::{Arc, Mutex};
use uv_audit::prelude::*;

/// Mock DependencyScanner for testing that returns a fixed report
#[derive(Clone)]
pub struct MockDependencyScanner {
    report: Option<AuditReport>,
    pub requests: Arc<Mutex<Vec<ScanRequest>>>,
}

impl MockDependencyScanner {
    pub fn new(report: AuditReport) -> Self {
        Self {
            report: Some(report),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A scanner whose every scan fails as if uv.lock were missing
    pub fn failing() -> Self {
        Self {
            report: None,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn scan_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl DependencyScanner for MockDependencyScanner {
    fn scan(&self, request: &ScanRequest) -> Result<AuditReport> {
        self.requests.lock().unwrap().push(request.clone());
        match &self.report {
            Some(report) => Ok(report.clone()),
            None => Err(AuditError::LockfileNotFound {
                path: request.working_dir.join("uv.lock"),
                suggestion: "mock scanner".to_string(),
            }
            .into()),
        }
    }
}
