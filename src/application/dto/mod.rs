/// Data Transfer Objects for application layer
///
/// DTOs are used to transfer data between the application layer
/// and adapters, keeping the domain layer isolated.
mod check_options;

pub use check_options::{CheckOptions, UpdateOptions, DEFAULT_FORMAT};
