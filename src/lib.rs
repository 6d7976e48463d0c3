//! uv-audit - vulnerability auditor for uv projects
//!
//! Checks `uv.lock` files against a local, git-managed copy of an OSV
//! advisory database, following hexagonal architecture and Domain-Driven
//! Design principles.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`audit`): packages, versions, advisories and the matching rules
//! - **Application Layer** (`application`): the command dispatcher, use cases and format registry
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use uv_audit::prelude::*;
//! use std::path::PathBuf;
//!
//! # fn main() -> Result<()> {
//! let database = GitAdvisoryDatabase::locate(None);
//! let scanner = LockfileScanner::new(FileSystemReader::new(), database.clone());
//! let mut dispatcher = AuditDispatcher::new(
//!     scanner,
//!     database,
//!     ConsoleStatusReporter::new(),
//!     std::io::stdout(),
//! );
//!
//! let options = CheckOptions {
//!     format: "json".to_string(),
//!     working_dir: PathBuf::from("."),
//!     ..CheckOptions::default()
//! };
//! let exit_code = dispatcher.check(&options)?;
//! println!("{}", exit_code);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod audit;
pub mod cli;
pub mod config;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::ConsoleStatusReporter;
    pub use crate::adapters::outbound::database::GitAdvisoryDatabase;
    pub use crate::adapters::outbound::filesystem::{FileSystemReader, OutputSink};
    pub use crate::adapters::outbound::formatters::{
        JsonFormatter, MarkdownFormatter, TextFormatter,
    };
    pub use crate::adapters::outbound::scanner::LockfileScanner;
    pub use crate::application::dispatcher::AuditDispatcher;
    pub use crate::application::dto::{CheckOptions, UpdateOptions};
    pub use crate::application::factories::{FormatRegistry, SinkFactory, SinkTarget};
    pub use crate::audit::domain::{
        Advisory, AuditFinding, AuditReport, Package, PackageName, Severity, UnavailableReason,
        UpdateOutcome, Version,
    };
    pub use crate::ports::inbound::AuditCommandPort;
    pub use crate::ports::outbound::{
        AdvisoryDatabase, DependencyScanner, LockfileReader, RenderSettings, ReportFormat,
        ScanRequest, StatusReporter,
    };
    pub use crate::shared::error::{exit_code_for, AuditError, ExitCode};
    pub use crate::shared::Result;
}
