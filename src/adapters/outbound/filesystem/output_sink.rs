use crate::shared::error::AuditError;
use crate::shared::security::validate_not_symlink;
use crate::shared::Result;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// OutputSink adapter - the destination a report is rendered into
///
/// `Console` borrows a writer owned by someone else and is never closed;
/// `File` owns its handle. [`OutputSink::close`] consumes the sink, so a
/// file is closed at most once, and the `Drop` of the inner writer releases
/// it on any path that returns early without calling `close`.
pub enum OutputSink<'a> {
    Console(&'a mut dyn Write),
    File {
        path: PathBuf,
        writer: BufWriter<File>,
    },
}

impl<'a> OutputSink<'a> {
    pub fn console(writer: &'a mut dyn Write) -> Self {
        OutputSink::Console(writer)
    }

    /// Creates (or truncates) the report file at `path`
    ///
    /// # Errors
    /// Returns [`AuditError::FileWriteError`] if the parent directory is
    /// missing, the path is a symbolic link, or the file cannot be created
    pub fn create_file(path: PathBuf) -> Result<Self> {
        validate_parent_directory(&path)?;
        validate_not_symlink(&path, "write").map_err(|e| AuditError::FileWriteError {
            path: path.clone(),
            details: e.to_string(),
        })?;

        let file = File::create(&path).map_err(|e| AuditError::FileWriteError {
            path: path.clone(),
            details: e.to_string(),
        })?;
        tracing::debug!(path = %path.display(), "opened report file");

        Ok(OutputSink::File {
            path,
            writer: BufWriter::new(file),
        })
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            OutputSink::Console(_) => None,
            OutputSink::File { path, .. } => Some(path),
        }
    }

    /// Flushes and releases the sink
    ///
    /// For the console this is only a flush. For a file, buffered data is
    /// written out and the handle is dropped.
    pub fn close(self) -> Result<()> {
        match self {
            OutputSink::Console(writer) => {
                writer.flush()?;
                Ok(())
            }
            OutputSink::File { path, writer } => {
                let file = writer.into_inner().map_err(|e| AuditError::FileWriteError {
                    path: path.clone(),
                    details: e.error().to_string(),
                })?;
                file.sync_all().map_err(|e| AuditError::FileWriteError {
                    path: path.clone(),
                    details: e.to_string(),
                })?;
                tracing::debug!(path = %path.display(), "closed report file");
                Ok(())
            }
        }
    }
}

impl Write for OutputSink<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            OutputSink::Console(writer) => writer.write(buf),
            OutputSink::File { writer, .. } => writer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            OutputSink::Console(writer) => writer.flush(),
            OutputSink::File { writer, .. } => writer.flush(),
        }
    }
}

/// The parent directory of the report must already exist
fn validate_parent_directory(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if parent != Path::new("") && !parent.is_dir() {
            return Err(AuditError::FileWriteError {
                path: path.to_path_buf(),
                details: format!("Parent directory does not exist: {}", parent.display()),
            }
            .into());
        }
    }
    Ok(())
}
