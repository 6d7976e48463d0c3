/// Result alias used across every layer.
///
/// Errors travel as `anyhow::Error` so adapters can attach context; the
/// entry point recovers the [`crate::shared::error::AuditError`] underneath
/// to choose an exit code.
pub type Result<T> = std::result::Result<T, anyhow::Error>;
