pub mod advisory;
pub mod package;
pub mod report;
pub mod severity;
pub mod update_outcome;

pub use advisory::{AffectedRange, Advisory, RangeEnd};
pub use package::{Package, PackageName, Version};
pub use report::{AuditFinding, AuditReport};
pub use severity::{CvssScore, Severity};
pub use update_outcome::{UnavailableReason, UpdateOutcome};
