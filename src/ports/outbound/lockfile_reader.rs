use crate::shared::Result;
use std::path::{Path, PathBuf};

/// Raw lockfile text together with the path it was read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockfileContent {
    pub path: PathBuf,
    pub content: String,
}

/// LockfileReader port for reading lockfile contents
///
/// This port abstracts the file system operations needed to locate and
/// read the uv.lock file of a project.
pub trait LockfileReader {
    /// Reads the lockfile
    ///
    /// # Arguments
    /// * `working_dir` - Directory searched for `uv.lock` when no explicit path is given
    /// * `explicit` - Lockfile path supplied by the user; relative paths are
    ///   resolved against `working_dir`
    ///
    /// # Errors
    /// Returns an error if:
    /// - The lockfile does not exist
    /// - The file cannot be read due to permissions or I/O errors
    fn read_lockfile(&self, working_dir: &Path, explicit: Option<&Path>) -> Result<LockfileContent>;
}
