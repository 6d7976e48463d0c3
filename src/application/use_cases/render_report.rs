use crate::adapters::outbound::filesystem::OutputSink;
use crate::audit::domain::AuditReport;
use crate::ports::outbound::ReportFormat;
use crate::shared::Result;

/// Renders `report` into `sink` and closes the sink.
///
/// The sink is closed whether or not rendering succeeded. A render error
/// takes precedence over a close error.
pub fn render_report(
    format: &dyn ReportFormat,
    report: &AuditReport,
    mut sink: OutputSink<'_>,
) -> Result<()> {
    tracing::debug!(format = format.name(), "rendering report");
    let rendered = format.render(report, &mut sink);
    let closed = sink.close();
    rendered?;
    closed
}
