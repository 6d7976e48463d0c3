/// Use cases module containing application business logic orchestration
mod render_report;
mod scan_lockfile;
mod update_database;

pub use render_report::render_report;
pub use scan_lockfile::ScanLockfileUseCase;
pub use update_database::{UpdateDatabaseUseCase, UpdateStatus};
