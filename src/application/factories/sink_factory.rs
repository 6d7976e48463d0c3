use crate::adapters::outbound::filesystem::OutputSink;
use crate::shared::Result;
use std::io::Write;
use std::path::PathBuf;

/// Where a rendered report goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkTarget {
    Console,
    File(PathBuf),
}

impl SinkTarget {
    /// `--output <path>` selects a file, its absence the console
    pub fn from_output(output: Option<PathBuf>) -> Self {
        match output {
            Some(path) => SinkTarget::File(path),
            None => SinkTarget::Console,
        }
    }

    pub fn is_console(&self) -> bool {
        matches!(self, SinkTarget::Console)
    }
}

/// Factory for opening output sinks
///
/// The console variant borrows the writer it is given rather than grabbing
/// the process stdout, so callers (and tests) decide what "console" means.
pub struct SinkFactory;

impl SinkFactory {
    /// Opens the sink for `target`
    ///
    /// # Examples
    /// ```
    /// use uv_audit::application::factories::{SinkFactory, SinkTarget};
    /// use std::io::Write;
    ///
    /// let mut console = Vec::new();
    /// let mut sink = SinkFactory::open(&SinkTarget::Console, &mut console).unwrap();
    /// write!(sink, "hello").unwrap();
    /// sink.close().unwrap();
    /// assert_eq!(console, b"hello");
    /// ```
    pub fn open<'a>(target: &SinkTarget, console: &'a mut dyn Write) -> Result<OutputSink<'a>> {
        match target {
            SinkTarget::Console => Ok(OutputSink::console(console)),
            SinkTarget::File(path) => OutputSink::create_file(path.clone()),
        }
    }
}
