use crate::audit::domain::AuditReport;
use crate::shared::Result;
use std::io::Write;

/// Options a format is constructed with
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderSettings {
    /// Include long descriptions instead of one-line titles
    pub verbose: bool,
    /// Emit ANSI colours (only ever set when the sink is a terminal)
    pub color: bool,
}

/// ReportFormat port - the contract every output format plugin satisfies
///
/// A format is registered under a stable identifier and writes a complete
/// rendering of the report into whatever sink it is handed. It must not
/// decide where the output goes nor close the sink.
pub trait ReportFormat {
    /// Identifier the format is selected by (`--format <name>`)
    fn name(&self) -> &'static str;

    /// Writes the rendered report into `sink`
    ///
    /// # Errors
    /// Returns an error if serialization or writing to the sink fails
    fn render(&self, report: &AuditReport, sink: &mut dyn Write) -> Result<()>;
}
