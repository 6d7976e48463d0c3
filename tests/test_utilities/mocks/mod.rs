/// Mock implementations for testing
mod mock_advisory_database;
mod mock_dependency_scanner;
mod mock_status_reporter;

pub use mock_advisory_database::MockAdvisoryDatabase;
pub use mock_dependency_scanner::MockDependencyScanner;
pub use mock_status_reporter::MockStatusReporter;
