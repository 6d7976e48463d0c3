use crate::audit::domain::{Advisory, AuditFinding, AuditReport, CvssScore, Package, Severity};
use crate::ports::outbound::ReportFormat;
use crate::shared::Result;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    version: &'static str,
    created_at: String,
    lockfile: String,
    packages_scanned: usize,
    results: Vec<JsonResult<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum JsonResult<'a> {
    UnpatchedPackage {
        package: JsonPackage<'a>,
        advisory: JsonAdvisory<'a>,
    },
    InsecureSource {
        source: &'a str,
    },
}

#[derive(Debug, Serialize)]
struct JsonPackage<'a> {
    name: &'a str,
    version: &'a str,
}

#[derive(Debug, Serialize)]
struct JsonAdvisory<'a> {
    id: &'a str,
    aliases: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<&'a str>,
    criticality: Option<Severity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cvss_score: Option<CvssScore>,
    patched_versions: Vec<String>,
}

impl<'a> JsonAdvisory<'a> {
    fn from_advisory(advisory: &'a Advisory) -> Self {
        let criticality = match advisory.severity() {
            Severity::None => None,
            severity => Some(severity),
        };
        Self {
            id: advisory.id(),
            aliases: advisory.aliases(),
            title: advisory.title(),
            description: advisory.description(),
            url: advisory.url(),
            criticality,
            cvss_score: advisory.cvss_score(),
            patched_versions: advisory
                .patched_versions()
                .into_iter()
                .map(|v| format!(">= {}", v))
                .collect(),
        }
    }
}

impl<'a> JsonPackage<'a> {
    fn from_package(package: &'a Package) -> Self {
        Self {
            name: package.name().as_str(),
            version: package.version().as_str(),
        }
    }
}

/// JsonFormatter adapter producing a machine-readable report document
pub struct JsonFormatter;

impl JsonFormatter {
    pub const NAME: &'static str = "json";

    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormat for JsonFormatter {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn render(&self, report: &AuditReport, sink: &mut dyn Write) -> Result<()> {
        let results = report
            .findings()
            .iter()
            .map(|finding| match finding {
                AuditFinding::UnpatchedPackage { package, advisory } => JsonResult::UnpatchedPackage {
                    package: JsonPackage::from_package(package),
                    advisory: JsonAdvisory::from_advisory(advisory),
                },
                AuditFinding::InsecureSource { uri } => JsonResult::InsecureSource { source: uri },
            })
            .collect();

        let document = JsonReport {
            version: env!("CARGO_PKG_VERSION"),
            created_at: chrono::Utc::now().to_rfc3339(),
            lockfile: report.lockfile().display().to_string(),
            packages_scanned: report.packages_scanned(),
            results,
        };

        serde_json::to_writer_pretty(&mut *sink, &document)?;
        writeln!(sink)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::domain::{AffectedRange, RangeEnd, Version};
    use std::path::PathBuf;

    fn render(report: &AuditReport) -> serde_json::Value {
        let mut out = Vec::new();
        JsonFormatter::new().render(report, &mut out).unwrap();
        serde_json::from_slice(&out).unwrap()
    }

    #[test]
    fn test_render_clean_report() {
        let report = AuditReport::new(PathBuf::from("project/uv.lock"), 7, vec![]);

        let json = render(&report);

        assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
        assert_eq!(json["lockfile"], "project/uv.lock");
        assert_eq!(json["packages_scanned"], 7);
        assert!(json["created_at"].is_string());
        assert_eq!(json["results"], serde_json::json!([]));
    }

    #[test]
    fn test_render_tagged_results() {
        let package = Package::new("Jinja2".to_string(), "2.10".to_string()).unwrap();
        let advisory = Advisory::new("GHSA-462w-v97r-4m45")
            .with_aliases(vec!["CVE-2019-10906".to_string()])
            .with_severity(Severity::High)
            .with_range(AffectedRange::new(
                None,
                RangeEnd::Fixed(Version::new("2.10.1".to_string()).unwrap()),
            ));
        let report = AuditReport::new(
            PathBuf::from("uv.lock"),
            2,
            vec![
                AuditFinding::InsecureSource {
                    uri: "http://pypi.internal/simple".to_string(),
                },
                AuditFinding::UnpatchedPackage { package, advisory },
            ],
        );

        let json = render(&report);
        let results = json["results"].as_array().unwrap();

        assert_eq!(results[0]["type"], "insecure_source");
        assert_eq!(results[0]["source"], "http://pypi.internal/simple");
        assert_eq!(results[1]["type"], "unpatched_package");
        assert_eq!(results[1]["package"]["name"], "Jinja2");
        assert_eq!(results[1]["package"]["version"], "2.10");
        assert_eq!(results[1]["advisory"]["id"], "GHSA-462w-v97r-4m45");
        assert_eq!(results[1]["advisory"]["criticality"], "high");
        assert_eq!(
            results[1]["advisory"]["patched_versions"],
            serde_json::json!([">= 2.10.1"])
        );
        assert!(results[1]["advisory"].get("cvss_score").is_none());
    }
}
