/// Filesystem adapters for file I/O operations
mod file_reader;
mod output_sink;

pub use file_reader::{FileSystemReader, LOCKFILE_NAME};
pub use output_sink::OutputSink;
