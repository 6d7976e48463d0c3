use crate::ports::outbound::{LockfileContent, LockfileReader};
use crate::shared::error::AuditError;
use crate::shared::security::read_checked;
use crate::shared::Result;
use std::path::Path;

/// File name discovered in the working directory when `--file` is absent
pub const LOCKFILE_NAME: &str = "uv.lock";

/// FileSystemReader adapter for reading lockfiles from the file system
///
/// Reads go through the shared security checks: symbolic links, non-regular
/// files and files over the size limit are refused.
pub struct FileSystemReader;

impl FileSystemReader {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FileSystemReader {
    fn default() -> Self {
        Self::new()
    }
}

impl LockfileReader for FileSystemReader {
    fn read_lockfile(&self, working_dir: &Path, explicit: Option<&Path>) -> Result<LockfileContent> {
        let lockfile_path = match explicit {
            Some(path) => working_dir.join(path),
            None => working_dir.join(LOCKFILE_NAME),
        };

        if !lockfile_path.exists() {
            let suggestion = match explicit {
                Some(path) => format!(
                    "The lockfile given with --file (\"{}\") does not exist.",
                    path.display()
                ),
                None => format!(
                    "{} does not exist in directory \"{}\".\n   \
                     Please run in the root directory of a uv project, or specify the lockfile with the --file option.",
                    LOCKFILE_NAME,
                    working_dir.display()
                ),
            };
            return Err(AuditError::LockfileNotFound {
                path: lockfile_path,
                suggestion,
            }
            .into());
        }

        tracing::debug!(path = %lockfile_path.display(), "reading lockfile");
        let content = read_checked(&lockfile_path, LOCKFILE_NAME).map_err(|e| {
            AuditError::FileReadError {
                path: lockfile_path.clone(),
                details: e.to_string(),
            }
        })?;

        Ok(LockfileContent {
            path: lockfile_path,
            content,
        })
    }
}
