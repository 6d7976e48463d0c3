/// Console adapter - user-facing status lines on stdout
mod status_reporter;

pub use status_reporter::ConsoleStatusReporter;
