use crate::audit::domain::{AffectedRange, Advisory, CvssScore, RangeEnd, Severity, Version};
use crate::audit::domain::package::normalize_name;
use crate::shared::error::AuditError;
use crate::shared::Result;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// One advisory file in OSV format, as published by the PyPA advisory database
#[derive(Debug, Deserialize)]
struct OsvRecord {
    id: String,
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    details: Option<String>,
    #[serde(default)]
    aliases: Vec<String>,
    #[serde(default)]
    withdrawn: Option<String>,
    #[serde(default)]
    references: Vec<OsvReference>,
    #[serde(default)]
    severity: Vec<OsvSeverity>,
    #[serde(default)]
    database_specific: Option<DatabaseSpecific>,
    #[serde(default)]
    affected: Vec<OsvAffected>,
}

#[derive(Debug, Deserialize)]
struct OsvReference {
    #[serde(rename = "type", default)]
    reference_type: Option<String>,
    url: String,
}

#[derive(Debug, Deserialize)]
struct OsvSeverity {
    #[serde(rename = "type")]
    severity_type: String, // "CVSS_V3"
    score: String, // e.g., "CVSS:3.1/AV:N/AC:L/..."
}

#[derive(Debug, Deserialize)]
struct DatabaseSpecific {
    #[serde(default)]
    severity: Option<String>, // "CRITICAL", "HIGH", "MODERATE", "MEDIUM", "LOW"
}

#[derive(Debug, Deserialize)]
struct OsvAffected {
    #[serde(default)]
    package: Option<OsvPackage>,
    #[serde(default)]
    ranges: Vec<OsvRange>,
    #[serde(default)]
    versions: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct OsvPackage {
    name: String,
}

#[derive(Debug, Deserialize)]
struct OsvRange {
    #[serde(rename = "type")]
    range_type: String,
    #[serde(default)]
    events: Vec<OsvEvent>,
}

#[derive(Debug, Deserialize)]
struct OsvEvent {
    #[serde(default)]
    introduced: Option<String>,
    #[serde(default)]
    fixed: Option<String>,
    #[serde(default)]
    last_affected: Option<String>,
}

/// Parses one advisory file and keeps the parts that apply to `package`.
///
/// Returns `Ok(None)` for withdrawn advisories. `.json` files are read as
/// JSON, everything else as YAML.
pub(super) fn parse_advisory_file(path: &Path, content: &str, package: &str) -> Result<Option<Advisory>> {
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let record: OsvRecord = if is_json {
        serde_json::from_str(content).map_err(|e| parse_error(path, e.to_string()))?
    } else {
        serde_yaml_ng::from_str(content).map_err(|e| parse_error(path, e.to_string()))?
    };

    if record.withdrawn.is_some() {
        tracing::debug!(id = record.id.as_str(), "skipping withdrawn advisory");
        return Ok(None);
    }

    Ok(Some(record.into_advisory(package)))
}

fn parse_error(path: &Path, details: String) -> anyhow::Error {
    AuditError::AdvisoryParseError {
        path: path.to_path_buf(),
        details,
    }
    .into()
}

impl OsvRecord {
    fn into_advisory(self, package: &str) -> Advisory {
        let url = self
            .references
            .iter()
            .find(|r| r.reference_type.as_deref() == Some("ADVISORY"))
            .or_else(|| self.references.first())
            .map(|r| r.url.clone());

        // CVSS v3 vector first, then the database label
        let cvss_score = self
            .severity
            .iter()
            .find(|s| s.severity_type == "CVSS_V3")
            .and_then(|s| parse_cvss_score(&s.score));
        let label = self
            .database_specific
            .as_ref()
            .and_then(|d| d.severity.as_deref())
            .map(Severity::from_label);

        let mut advisory = Advisory::new(self.id.clone())
            .with_aliases(self.aliases)
            .with_title(self.summary)
            .with_description(self.details)
            .with_url(url);
        advisory = match (cvss_score, label) {
            (Some(score), _) => advisory.with_cvss_score(score),
            (None, Some(severity)) => advisory.with_severity(severity),
            (None, None) => advisory,
        };

        let normalized = normalize_name(package);
        for affected in self.affected {
            let applies = affected
                .package
                .as_ref()
                .map_or(true, |p| normalize_name(&p.name) == normalized);
            if !applies {
                continue;
            }

            let versions = affected
                .versions
                .iter()
                .filter_map(|v| parse_version(&self.id, v))
                .collect();
            advisory = advisory.with_versions(versions);

            for range in affected.ranges {
                // GIT ranges are expressed in commit hashes
                if range.range_type != "ECOSYSTEM" && range.range_type != "SEMVER" {
                    continue;
                }
                for affected_range in ranges_from_events(&self.id, &range.events) {
                    advisory = advisory.with_range(affected_range);
                }
            }
        }

        advisory
    }
}

/// Pairs each `introduced` event with the following `fixed` or
/// `last_affected` event. An `introduced` left open affects every later
/// version. A range whose `introduced` version cannot be parsed is dropped
/// together with its end event.
fn ranges_from_events(id: &str, events: &[OsvEvent]) -> Vec<AffectedRange> {
    let mut ranges = Vec::new();
    let mut open: Option<Option<Version>> = None;
    let mut unparseable_start = false;

    for event in events {
        if let Some(introduced) = &event.introduced {
            open = None;
            unparseable_start = false;
            if introduced == "0" {
                open = Some(None);
            } else {
                match parse_version(id, introduced) {
                    Some(version) => open = Some(Some(version)),
                    None => unparseable_start = true,
                }
            }
            continue;
        }

        let end = if let Some(fixed) = &event.fixed {
            parse_version(id, fixed).map(RangeEnd::Fixed)
        } else if let Some(last) = &event.last_affected {
            parse_version(id, last).map(RangeEnd::LastAffected)
        } else {
            continue;
        };

        if std::mem::take(&mut unparseable_start) {
            open = None;
            continue;
        }
        if let Some(end) = end {
            ranges.push(AffectedRange::new(open.take().flatten(), end));
        }
    }

    if let Some(start) = open {
        ranges.push(AffectedRange::new(start, RangeEnd::Unbounded));
    }
    ranges
}

fn parse_version(id: &str, text: &str) -> Option<Version> {
    match Version::new(text.to_string()) {
        Ok(version) => Some(version),
        Err(e) => {
            tracing::debug!(advisory = id, version = text, error = %e, "ignoring unparseable version");
            None
        }
    }
}

/// Extracts numeric CVSS score from CVSS vector string
///
/// Example: "CVSS:3.1/AV:N/AC:L/PR:N/UI:N/S:U/C:H/I:H/A:H" -> Some(9.8)
fn parse_cvss_score(cvss_vector: &str) -> Option<CvssScore> {
    let metrics: HashMap<&str, &str> = cvss_vector
        .split('/')
        .skip(1) // "CVSS:3.1" or "CVSS:3.0"
        .filter_map(|part| part.split_once(':'))
        .collect();

    let scope_changed = match *metrics.get("S")? {
        "U" => false,
        "C" => true,
        _ => return None,
    };

    let av = match *metrics.get("AV")? {
        "N" => 0.85,
        "A" => 0.62,
        "L" => 0.55,
        "P" => 0.2,
        _ => return None,
    };
    let ac = match *metrics.get("AC")? {
        "L" => 0.77,
        "H" => 0.44,
        _ => return None,
    };
    let pr = match (*metrics.get("PR")?, scope_changed) {
        ("N", _) => 0.85,
        ("L", false) => 0.62,
        ("L", true) => 0.68,
        ("H", false) => 0.27,
        ("H", true) => 0.5,
        _ => return None,
    };
    let ui = match *metrics.get("UI")? {
        "N" => 0.85,
        "R" => 0.62,
        _ => return None,
    };
    let impact_metric = |key: &str| -> Option<f64> {
        match *metrics.get(key)? {
            "N" => Some(0.0),
            "L" => Some(0.22),
            "H" => Some(0.56),
            _ => None,
        }
    };
    let c = impact_metric("C")?;
    let i = impact_metric("I")?;
    let a = impact_metric("A")?;

    let iss = 1.0_f64 - ((1.0 - c) * (1.0 - i) * (1.0 - a));
    let impact = if scope_changed {
        7.52 * (iss - 0.029) - 3.25 * (iss - 0.02_f64).powi(15)
    } else {
        6.42 * iss
    };
    let exploitability = 8.22 * av * ac * pr * ui;

    let base_score = if impact <= 0.0 {
        0.0
    } else if scope_changed {
        f64::min(1.08 * (impact + exploitability), 10.0)
    } else {
        f64::min(impact + exploitability, 10.0)
    };

    // Round up to one decimal place
    let rounded_score = (base_score * 10.0).ceil() / 10.0;
    CvssScore::new(rounded_score as f32).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(text: &str) -> Version {
        Version::new(text.to_string()).unwrap()
    }

    const REQUESTS_ADVISORY: &str = r#"
id: PYSEC-2018-28
summary: Requests sends Authorization header on redirect
details: The Requests package before 2.20.0 sends an HTTP Authorization header to an http URI.
aliases:
- CVE-2018-18074
- GHSA-x84v-xcm2-53pg
modified: '2021-06-10T06:51:35.167633Z'
published: '2018-10-09T00:29:00Z'
references:
- type: WEB
  url: https://github.com/psf/requests/issues/4716
- type: ADVISORY
  url: https://github.com/advisories/GHSA-x84v-xcm2-53pg
affected:
- package:
    name: requests
    ecosystem: PyPI
  ranges:
  - type: GIT
    repo: https://github.com/psf/requests
    events:
    - introduced: '0'
    - fixed: c45d7c49ea75133e52ab22a8e9e13173938e36ff
  - type: ECOSYSTEM
    events:
    - introduced: '0'
    - fixed: 2.20.0
  versions:
  - 2.19.1
severity:
- type: CVSS_V3
  score: CVSS:3.1/AV:N/AC:L/PR:N/UI:N/S:U/C:H/I:N/A:N
"#;

    #[test]
    fn test_parse_yaml_advisory() {
        let advisory = parse_advisory_file(Path::new("PYSEC-2018-28.yaml"), REQUESTS_ADVISORY, "requests")
            .unwrap()
            .unwrap();

        assert_eq!(advisory.id(), "PYSEC-2018-28");
        assert_eq!(advisory.aliases().len(), 2);
        assert_eq!(
            advisory.url(),
            Some("https://github.com/advisories/GHSA-x84v-xcm2-53pg")
        );
        assert_eq!(advisory.severity(), Severity::High);
        assert!(advisory.affects(&v("2.19.0")));
        assert!(advisory.affects(&v("1.0")));
        assert!(!advisory.affects(&v("2.20.0")));
        assert_eq!(advisory.patched_versions(), vec![&v("2.20.0")]);
    }

    #[test]
    fn test_parse_json_advisory_with_label_severity() {
        let content = r#"{
            "id": "GHSA-aaaa-bbbb-cccc",
            "summary": "Template injection",
            "database_specific": {"severity": "MODERATE"},
            "affected": [{
                "package": {"name": "Jinja2", "ecosystem": "PyPI"},
                "ranges": [{"type": "ECOSYSTEM", "events": [
                    {"introduced": "2.0"}, {"last_affected": "2.10.0"}
                ]}]
            }]
        }"#;

        let advisory = parse_advisory_file(Path::new("GHSA.json"), content, "jinja2")
            .unwrap()
            .unwrap();

        assert_eq!(advisory.severity(), Severity::Medium);
        assert!(advisory.affects(&v("2.10.0")));
        assert!(!advisory.affects(&v("1.9")));
        assert!(!advisory.affects(&v("2.10.1")));
        assert!(advisory.patched_versions().is_empty());
    }

    #[test]
    fn test_affected_entries_for_other_packages_are_ignored() {
        let content = r#"
id: PYSEC-2099-1
affected:
- package:
    name: other-package
  ranges:
  - type: ECOSYSTEM
    events:
    - introduced: '0'
"#;
        let advisory = parse_advisory_file(Path::new("a.yaml"), content, "requests")
            .unwrap()
            .unwrap();

        assert!(!advisory.affects(&v("1.0")));
    }

    #[test]
    fn test_withdrawn_advisory_is_skipped() {
        let content = "id: PYSEC-2020-1\nwithdrawn: '2021-01-01T00:00:00Z'\n";
        let advisory = parse_advisory_file(Path::new("a.yaml"), content, "requests").unwrap();
        assert!(advisory.is_none());
    }

    #[test]
    fn test_malformed_file_is_an_advisory_parse_error() {
        let err = parse_advisory_file(Path::new("broken.yaml"), "id: [unterminated", "requests")
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<AuditError>(),
            Some(AuditError::AdvisoryParseError { .. })
        ));
    }

    #[test]
    fn test_versions_from_every_affected_entry_are_kept() {
        let content = r#"
id: PYSEC-2099-2
affected:
- package:
    name: foo
  versions:
  - '1.0'
- package:
    name: foo
  versions:
  - '2.0'
"#;
        let advisory = parse_advisory_file(Path::new("a.yaml"), content, "foo")
            .unwrap()
            .unwrap();

        assert!(advisory.affects(&v("1.0")));
        assert!(advisory.affects(&v("2.0")));
        assert!(!advisory.affects(&v("1.5")));
    }

    #[test]
    fn test_unparseable_introduced_drops_its_range() {
        let events = vec![
            OsvEvent {
                introduced: Some("not a version".to_string()),
                fixed: None,
                last_affected: None,
            },
            OsvEvent {
                introduced: None,
                fixed: Some("1.5".to_string()),
                last_affected: None,
            },
            OsvEvent {
                introduced: Some("2.0".to_string()),
                fixed: None,
                last_affected: None,
            },
            OsvEvent {
                introduced: None,
                fixed: None,
                last_affected: Some("2.3".to_string()),
            },
        ];

        let ranges = ranges_from_events("TEST-2", &events);

        assert_eq!(ranges.len(), 1);
        assert!(!ranges[0].contains(&v("1.0")));
        assert!(ranges[0].contains(&v("2.3")));
        assert!(!ranges[0].contains(&v("2.4")));
    }

    #[test]
    fn test_open_introduced_is_unbounded() {
        let events = vec![
            OsvEvent {
                introduced: Some("1.0".to_string()),
                fixed: None,
                last_affected: None,
            },
            OsvEvent {
                introduced: None,
                fixed: Some("1.5".to_string()),
                last_affected: None,
            },
            OsvEvent {
                introduced: Some("2.0".to_string()),
                fixed: None,
                last_affected: None,
            },
        ];

        let ranges = ranges_from_events("TEST-1", &events);

        assert_eq!(ranges.len(), 2);
        assert!(ranges[0].contains(&v("1.2")));
        assert!(!ranges[0].contains(&v("1.5")));
        assert!(ranges[1].contains(&v("99.0")));
        assert!(!ranges[1].contains(&v("1.9")));
    }

    #[test]
    fn test_parse_cvss_score_critical() {
        let score = parse_cvss_score("CVSS:3.1/AV:N/AC:L/PR:N/UI:N/S:U/C:H/I:H/A:H").unwrap();
        assert_eq!(score.value(), 9.8);
    }

    #[test]
    fn test_parse_cvss_score_scope_changed() {
        let score = parse_cvss_score("CVSS:3.1/AV:N/AC:L/PR:N/UI:R/S:C/C:L/I:L/A:N").unwrap();
        assert_eq!(score.value(), 6.1);
    }

    #[test]
    fn test_parse_cvss_score_rejects_incomplete_vector() {
        assert!(parse_cvss_score("CVSS:3.1/AV:N/AC:L").is_none());
        assert!(parse_cvss_score("not a vector").is_none());
    }
}
