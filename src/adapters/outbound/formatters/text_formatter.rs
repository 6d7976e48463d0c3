use crate::audit::domain::{Advisory, AuditFinding, AuditReport, Package, Severity};
use crate::ports::outbound::{RenderSettings, ReportFormat};
use crate::shared::Result;
use owo_colors::OwoColorize;
use std::io::Write;

/// TextFormatter adapter rendering findings as labelled plain text blocks
///
/// Colours are applied only when [`RenderSettings::color`] is set.
pub struct TextFormatter {
    settings: RenderSettings,
}

impl TextFormatter {
    pub const NAME: &'static str = "text";

    pub fn new(settings: RenderSettings) -> Self {
        Self { settings }
    }

    fn label(&self, text: &str) -> String {
        if self.settings.color {
            text.red().bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn write_insecure_source(&self, sink: &mut dyn Write, uri: &str) -> Result<()> {
        let message = format!("Insecure Source URI found: {}", uri);
        if self.settings.color {
            writeln!(sink, "{}", message.yellow())?;
        } else {
            writeln!(sink, "{}", message)?;
        }
        Ok(())
    }

    fn write_unpatched(&self, sink: &mut dyn Write, package: &Package, advisory: &Advisory) -> Result<()> {
        writeln!(sink, "{} {}", self.label("Name:"), package.name())?;
        writeln!(sink, "{} {}", self.label("Version:"), package.version())?;

        let identifiers: Vec<&str> = advisory.identifiers().collect();
        writeln!(sink, "{} {}", self.label("Advisory:"), identifiers.join(", "))?;

        let criticality = advisory.severity().to_string();
        let criticality = match (self.settings.color, advisory.severity()) {
            (true, Severity::Critical | Severity::High) => {
                criticality.red().to_string()
            }
            (true, Severity::Medium) => criticality.yellow().to_string(),
            _ => criticality,
        };
        writeln!(sink, "{} {}", self.label("Criticality:"), criticality)?;

        if let Some(url) = advisory.url() {
            writeln!(sink, "{} {}", self.label("URL:"), url)?;
        }

        if self.settings.verbose {
            if let Some(description) = advisory.description().or(advisory.title()) {
                writeln!(sink, "{}", self.label("Description:"))?;
                writeln!(sink)?;
                for line in description.lines() {
                    writeln!(sink, "  {}", line)?;
                }
                writeln!(sink)?;
            }
        } else if let Some(title) = advisory.title() {
            writeln!(sink, "{} {}", self.label("Title:"), title)?;
        }

        let patched = advisory.patched_versions();
        let solution = if patched.is_empty() {
            let text = "remove or disable this package until a patch is available!";
            if self.settings.color {
                text.red().to_string()
            } else {
                text.to_string()
            }
        } else {
            let versions: Vec<String> = patched.iter().map(|v| format!("'>= {}'", v)).collect();
            let text = format!("upgrade to {}", versions.join(", "));
            if self.settings.color {
                text.green().to_string()
            } else {
                text
            }
        };
        writeln!(sink, "{} {}", self.label("Solution:"), solution)?;
        writeln!(sink)?;
        Ok(())
    }
}

impl ReportFormat for TextFormatter {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn render(&self, report: &AuditReport, sink: &mut dyn Write) -> Result<()> {
        for finding in report.findings() {
            match finding {
                AuditFinding::InsecureSource { uri } => self.write_insecure_source(sink, uri)?,
                AuditFinding::UnpatchedPackage { package, advisory } => {
                    self.write_unpatched(sink, package, advisory)?
                }
            }
        }

        if report.is_vulnerable() {
            let text = "Vulnerabilities found!";
            if self.settings.color {
                writeln!(sink, "{}", text.red())?;
            } else {
                writeln!(sink, "{}", text)?;
            }
        } else {
            let text = "No vulnerabilities found";
            if self.settings.color {
                writeln!(sink, "{}", text.green())?;
            } else {
                writeln!(sink, "{}", text)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::domain::{AffectedRange, CvssScore, RangeEnd, Version};
    use std::path::PathBuf;

    fn v(text: &str) -> Version {
        Version::new(text.to_string()).unwrap()
    }

    fn vulnerable_report() -> AuditReport {
        let package = Package::new("requests".to_string(), "2.19.0".to_string()).unwrap();
        let advisory = Advisory::new("PYSEC-2018-28")
            .with_aliases(vec!["CVE-2018-18074".to_string()])
            .with_title(Some("Authorization header leak".to_string()))
            .with_description(Some("Sends the header\nover plain http.".to_string()))
            .with_url(Some("https://osv.dev/vulnerability/PYSEC-2018-28".to_string()))
            .with_cvss_score(CvssScore::new(7.5).unwrap())
            .with_range(AffectedRange::new(None, RangeEnd::Fixed(v("2.20.0"))));
        AuditReport::new(
            PathBuf::from("uv.lock"),
            3,
            vec![
                AuditFinding::InsecureSource {
                    uri: "http://mirror.internal/simple".to_string(),
                },
                AuditFinding::UnpatchedPackage { package, advisory },
            ],
        )
    }

    fn render(settings: RenderSettings, report: &AuditReport) -> String {
        let mut out = Vec::new();
        TextFormatter::new(settings).render(report, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_render_vulnerable_report() {
        let output = render(RenderSettings::default(), &vulnerable_report());

        assert!(output.contains("Insecure Source URI found: http://mirror.internal/simple"));
        assert!(output.contains("Name: requests\n"));
        assert!(output.contains("Version: 2.19.0\n"));
        assert!(output.contains("Advisory: PYSEC-2018-28, CVE-2018-18074\n"));
        assert!(output.contains("Criticality: High\n"));
        assert!(output.contains("URL: https://osv.dev/vulnerability/PYSEC-2018-28\n"));
        assert!(output.contains("Title: Authorization header leak\n"));
        assert!(output.contains("Solution: upgrade to '>= 2.20.0'\n"));
        assert!(output.ends_with("Vulnerabilities found!\n"));
        assert!(!output.contains('\u{1b}'));
    }

    #[test]
    fn test_render_verbose_shows_description() {
        let settings = RenderSettings {
            verbose: true,
            color: false,
        };
        let output = render(settings, &vulnerable_report());

        assert!(output.contains("Description:\n\n  Sends the header\n  over plain http.\n"));
        assert!(!output.contains("Title:"));
    }

    #[test]
    fn test_render_without_fix() {
        let package = Package::new("pyyaml".to_string(), "5.3".to_string()).unwrap();
        let advisory = Advisory::new("PYSEC-2021-1")
            .with_range(AffectedRange::new(None, RangeEnd::Unbounded));
        let report = AuditReport::new(
            PathBuf::from("uv.lock"),
            1,
            vec![AuditFinding::UnpatchedPackage { package, advisory }],
        );

        let output = render(RenderSettings::default(), &report);

        assert!(output.contains("Criticality: Unknown\n"));
        assert!(output
            .contains("Solution: remove or disable this package until a patch is available!\n"));
    }

    #[test]
    fn test_render_clean_report() {
        let report = AuditReport::new(PathBuf::from("uv.lock"), 4, vec![]);
        assert_eq!(
            render(RenderSettings::default(), &report),
            "No vulnerabilities found\n"
        );
    }

    #[test]
    fn test_render_with_color() {
        let settings = RenderSettings {
            verbose: false,
            color: true,
        };
        let output = render(settings, &vulnerable_report());
        assert!(output.contains('\u{1b}'));
    }
}
