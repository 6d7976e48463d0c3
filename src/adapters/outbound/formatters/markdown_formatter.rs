use crate::audit::domain::{Advisory, AuditReport, Package};
use crate::ports::outbound::{RenderSettings, ReportFormat};
use crate::shared::Result;
use std::io::Write;

/// Markdown table header for advisory findings
const VULN_TABLE_HEADER: &str = "| Package | Version | Advisory | Criticality | Solution | Title |\n";

/// Markdown table separator line for advisory findings
const VULN_TABLE_SEPARATOR: &str =
    "|---------|---------|----------|-------------|----------|-------|\n";

/// MarkdownFormatter adapter for generating an audit report in Markdown
///
/// Renders a heading, a summary line, a table of vulnerable packages and
/// a list of insecure sources. With `verbose` the table's last column
/// carries the advisory description instead of its title.
pub struct MarkdownFormatter {
    settings: RenderSettings,
}

impl MarkdownFormatter {
    pub const NAME: &'static str = "markdown";

    pub fn new(settings: RenderSettings) -> Self {
        Self { settings }
    }

    /// Escapes pipe characters and newlines for safe Markdown table rendering
    fn escape_markdown_table_cell(text: &str) -> String {
        text.replace('|', "\\|").replace('\n', " ")
    }

    fn plural(count: usize, singular: &'static str, plural: &'static str) -> &'static str {
        if count == 1 {
            singular
        } else {
            plural
        }
    }

    /// Advisory id, linked when the advisory has a URL, followed by its aliases
    fn advisory_cell(advisory: &Advisory) -> String {
        let id = match advisory.url() {
            Some(url) => format!("[{}]({})", Self::escape_markdown_table_cell(advisory.id()), url),
            None => Self::escape_markdown_table_cell(advisory.id()),
        };
        if advisory.aliases().is_empty() {
            id
        } else {
            format!(
                "{} ({})",
                id,
                Self::escape_markdown_table_cell(&advisory.aliases().join(", "))
            )
        }
    }

    fn solution_cell(advisory: &Advisory) -> String {
        let patched = advisory.patched_versions();
        if patched.is_empty() {
            "No patch available".to_string()
        } else {
            let versions: Vec<String> = patched.iter().map(|v| format!("`>= {}`", v)).collect();
            format!("Upgrade to {}", versions.join(", "))
        }
    }
}

/// Helper methods for rendering sections
impl MarkdownFormatter {
    fn render_header(&self, output: &mut String, report: &AuditReport) {
        output.push_str("# Vulnerability Audit Report\n\n");
        output.push_str(&format!(
            "Lockfile: `{}`\n\n",
            report.lockfile().display()
        ));
    }

    fn render_summary(&self, output: &mut String, report: &AuditReport) {
        if !report.is_vulnerable() {
            output.push_str(&format!(
                "**No vulnerabilities found in {} {}.**\n",
                report.packages_scanned(),
                Self::plural(report.packages_scanned(), "package", "packages")
            ));
            return;
        }

        let advisories = report.unpatched_packages().count();
        let packages = report.vulnerable_package_count();
        let insecure = report.insecure_sources().count();
        output.push_str(&format!(
            "**Found {} {} in {} {} and {} insecure {}.**\n\n",
            advisories,
            Self::plural(advisories, "vulnerability", "vulnerabilities"),
            packages,
            Self::plural(packages, "package", "packages"),
            insecure,
            Self::plural(insecure, "source", "sources")
        ));
    }

    fn render_unpatched(&self, output: &mut String, findings: &[(&Package, &Advisory)]) {
        output.push_str("## Vulnerable Packages\n\n");
        output.push_str(VULN_TABLE_HEADER);
        output.push_str(VULN_TABLE_SEPARATOR);

        // Critical first
        let mut sorted: Vec<&(&Package, &Advisory)> = findings.iter().collect();
        sorted.sort_by(|a, b| b.1.severity().cmp(&a.1.severity()));

        for (package, advisory) in sorted {
            let text = if self.settings.verbose {
                advisory.description().or(advisory.title())
            } else {
                advisory.title()
            };
            output.push_str(&format!(
                "| {} | {} | {} | {} | {} | {} |\n",
                Self::escape_markdown_table_cell(package.name().as_str()),
                Self::escape_markdown_table_cell(package.version().as_str()),
                Self::advisory_cell(advisory),
                advisory.severity(),
                Self::solution_cell(advisory),
                Self::escape_markdown_table_cell(text.unwrap_or(""))
            ));
        }
        output.push('\n');
    }

    fn render_insecure_sources(&self, output: &mut String, uris: &[&str]) {
        output.push_str("## Insecure Sources\n\n");
        for uri in uris {
            output.push_str(&format!("- `{}`\n", uri));
        }
        output.push('\n');
    }
}

impl ReportFormat for MarkdownFormatter {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn render(&self, report: &AuditReport, sink: &mut dyn Write) -> Result<()> {
        let mut output = String::new();
        self.render_header(&mut output, report);
        self.render_summary(&mut output, report);

        let unpatched: Vec<(&Package, &Advisory)> = report.unpatched_packages().collect();
        if !unpatched.is_empty() {
            self.render_unpatched(&mut output, &unpatched);
        }

        let insecure: Vec<&str> = report.insecure_sources().collect();
        if !insecure.is_empty() {
            self.render_insecure_sources(&mut output, &insecure);
        }

        sink.write_all(output.as_bytes())?;
        Ok(())
    }
}
