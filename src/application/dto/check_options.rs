use std::path::PathBuf;

/// Identifier of the format used when none is requested
pub const DEFAULT_FORMAT: &str = "text";

/// CheckOptions - immutable configuration of one `check` invocation
///
/// Built once by the CLI adapter (command-line flags merged with the config
/// file) and only read afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOptions {
    /// Suppress informational output
    pub quiet: bool,
    /// Show advisory descriptions and debug logging
    pub verbose: bool,
    /// Advisory identifiers to exclude from the report
    pub ignore: Vec<String>,
    /// Refresh the advisory database before scanning
    pub update: bool,
    /// Identifier of the report format
    pub format: String,
    /// Write the report to this file instead of stdout
    pub output: Option<PathBuf>,
    /// Explicit lockfile path instead of `uv.lock` discovery
    pub file: Option<PathBuf>,
    /// Directory the lockfile is discovered in
    pub working_dir: PathBuf,
}

impl CheckOptions {
    /// The subset of options the update step of `check` runs with
    pub fn update_options(&self) -> UpdateOptions {
        UpdateOptions { quiet: self.quiet }
    }
}

impl Default for CheckOptions {
    fn default() -> Self {
        Self {
            quiet: false,
            verbose: false,
            ignore: Vec::new(),
            update: false,
            format: DEFAULT_FORMAT.to_string(),
            output: None,
            file: None,
            working_dir: PathBuf::from("."),
        }
    }
}

/// UpdateOptions - configuration of one `update` invocation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateOptions {
    /// Suppress the progress, success and count lines
    pub quiet: bool,
}
