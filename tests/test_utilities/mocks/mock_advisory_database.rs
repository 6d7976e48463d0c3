use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use uv_audit::prelude::*;

/// Mock AdvisoryDatabase for testing with a scripted update outcome
#[derive(Clone)]
pub struct MockAdvisoryDatabase {
    outcome: UpdateOutcome,
    tool_present: bool,
    size: usize,
    update_calls: Arc<AtomicUsize>,
}

impl MockAdvisoryDatabase {
    pub fn new(outcome: UpdateOutcome) -> Self {
        Self {
            outcome,
            tool_present: true,
            size: 0,
            update_calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn with_size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    pub fn without_tool(mut self) -> Self {
        self.tool_present = false;
        self
    }

    pub fn update_calls(&self) -> usize {
        self.update_calls.load(Ordering::SeqCst)
    }
}

impl AdvisoryDatabase for MockAdvisoryDatabase {
    fn update(&self, _quiet: bool) -> UpdateOutcome {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        self.outcome
    }

    fn location(&self) -> PathBuf {
        PathBuf::from("/mock/advisory-db")
    }

    fn size(&self) -> Result<usize> {
        Ok(self.size)
    }

    fn required_tool(&self) -> &str {
        "git"
    }

    fn required_tool_present(&self) -> bool {
        self.tool_present
    }

    fn advisories_for(&self, _package: &PackageName) -> Result<Vec<Advisory>> {
        Ok(Vec::new())
    }
}
