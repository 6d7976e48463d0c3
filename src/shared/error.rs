use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow CI systems to distinguish between different
/// types of failures and successes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - no vulnerabilities detected, or a non-scanning command finished
    Success = 0,
    /// The audited lockfile contains vulnerable packages or insecure sources
    VulnerabilitiesDetected = 1,
    /// Invalid command-line arguments (clap parsing errors, unknown report format)
    InvalidArguments = 2,
    /// Application error (update failure, missing git, file I/O error, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::VulnerabilitiesDetected => write!(f, "Vulnerabilities Detected (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Application-specific errors for lockfile auditing.
///
/// Every fatal condition a command can end with has a variant here, so the
/// entry point can pick the exit code with a single downcast.
#[derive(Debug, Error)]
pub enum AuditError {
    #[error("Unknown format: {format}\n\n💡 Hint: Available formats: {available}")]
    UnknownFormat { format: String, available: String },

    #[error("Failed updating advisory-db!\n\n💡 Hint: Check your network connection and the state of {path}")]
    UpdateFailed { path: PathBuf },

    #[error("{tool} is not installed!\n\n💡 Hint: Install {tool} and make sure it is on your PATH to update the advisory database")]
    RequiredToolMissing { tool: String },

    #[error("uv.lock file not found: {path}\n\n💡 Hint: {suggestion}")]
    LockfileNotFound { path: PathBuf, suggestion: String },

    #[error("Failed to parse uv.lock file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the uv.lock file is in the correct format")]
    LockfileParseError { path: PathBuf, details: String },

    #[error("Failed to parse advisory: {path}\nDetails: {details}\n\n💡 Hint: Run `uv-audit update` to refresh the advisory database")]
    AdvisoryParseError { path: PathBuf, details: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    #[error("Failed to read file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    FileReadError { path: PathBuf, details: String },
}

impl AuditError {
    /// Process exit code for a command that ended with this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            AuditError::UnknownFormat { .. } => ExitCode::InvalidArguments,
            _ => ExitCode::ApplicationError,
        }
    }
}

/// Maps any error that reached the entry point to an exit code.
///
/// Errors that did not originate from [`AuditError`] are application errors.
pub fn exit_code_for(error: &anyhow::Error) -> ExitCode {
    error
        .chain()
        .find_map(|cause| cause.downcast_ref::<AuditError>())
        .map(AuditError::exit_code)
        .unwrap_or(ExitCode::ApplicationError)
}
