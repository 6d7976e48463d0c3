use crate::application::dto::UpdateOptions;
use crate::audit::domain::{UnavailableReason, UpdateOutcome};
use crate::ports::outbound::{AdvisoryDatabase, StatusReporter};
use crate::shared::error::AuditError;
use crate::shared::Result;

/// What a completed update step amounted to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateStatus {
    Updated,
    /// The database could not be updated, which is not an error
    Skipped,
}

/// UpdateDatabaseUseCase - refreshes the advisory database and reports on it
///
/// Turns the three-valued [`UpdateOutcome`] into either a status or one of
/// the fatal [`AuditError`] variants:
///
/// | Outcome                         | Result                             |
/// |---------------------------------|------------------------------------|
/// | `Updated`                       | `Ok(Updated)`                      |
/// | `Failed`                        | `Err(UpdateFailed)`                |
/// | `Unavailable(ToolMissing)`      | `Err(RequiredToolMissing)`         |
/// | `Unavailable(NothingToUpdate)`  | `Ok(Skipped)`, unless the tool is also missing |
///
/// # Type Parameters
/// * `D` - AdvisoryDatabase implementation
/// * `R` - StatusReporter implementation
pub struct UpdateDatabaseUseCase<'a, D: AdvisoryDatabase, R: StatusReporter> {
    advisory_database: &'a D,
    status_reporter: &'a R,
}

impl<'a, D: AdvisoryDatabase, R: StatusReporter> UpdateDatabaseUseCase<'a, D, R> {
    pub fn new(advisory_database: &'a D, status_reporter: &'a R) -> Self {
        Self {
            advisory_database,
            status_reporter,
        }
    }

    pub fn execute(&self, options: UpdateOptions) -> Result<UpdateStatus> {
        if !options.quiet {
            self.status_reporter.report("Updating advisory-db ...");
        }

        let outcome = self.advisory_database.update(options.quiet);
        tracing::debug!(?outcome, "advisory database update finished");

        let status = match outcome {
            UpdateOutcome::Updated => {
                if !options.quiet {
                    self.status_reporter.report_success("Updated advisory-db");
                }
                UpdateStatus::Updated
            }
            UpdateOutcome::Failed => {
                return Err(AuditError::UpdateFailed {
                    path: self.advisory_database.location(),
                }
                .into());
            }
            UpdateOutcome::Unavailable(UnavailableReason::ToolMissing) => {
                return Err(self.tool_missing());
            }
            UpdateOutcome::Unavailable(UnavailableReason::NothingToUpdate) => {
                if !self.advisory_database.required_tool_present() {
                    return Err(self.tool_missing());
                }
                self.status_reporter.report_warning("Skipping update");
                UpdateStatus::Skipped
            }
        };

        if !options.quiet {
            let size = self.advisory_database.size()?;
            self.status_reporter
                .report(&format!("advisory-db: {} advisories", size));
        }

        Ok(status)
    }

    fn tool_missing(&self) -> anyhow::Error {
        AuditError::RequiredToolMissing {
            tool: display_tool_name(self.advisory_database.required_tool()),
        }
        .into()
    }
}

/// `git` -> `Git`
fn display_tool_name(tool: &str) -> String {
    let mut chars = tool.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
