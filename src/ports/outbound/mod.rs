/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (file system, git, console, etc.).
pub mod advisory_database;
pub mod dependency_scanner;
pub mod lockfile_reader;
pub mod report_format;
pub mod status_reporter;

pub use advisory_database::AdvisoryDatabase;
pub use dependency_scanner::{DependencyScanner, ScanRequest};
pub use lockfile_reader::{LockfileContent, LockfileReader};
pub use report_format::{RenderSettings, ReportFormat};
pub use status_reporter::StatusReporter;
