use crate::shared::Result;
use serde::Serialize;
use std::fmt;

/// CVSS base score, validated to the 0.0..=10.0 range
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct CvssScore(f32);

impl CvssScore {
    pub fn new(score: f32) -> Result<Self> {
        if !(0.0..=10.0).contains(&score) {
            anyhow::bail!("CVSS score must be between 0.0 and 10.0, got {}", score);
        }
        Ok(Self(score))
    }

    pub fn value(&self) -> f32 {
        self.0
    }
}

impl fmt::Display for CvssScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.0)
    }
}

/// Criticality of an advisory, derived from its CVSS score when one exists
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    None,
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// CVSS v3 qualitative rating scale
    pub fn from_cvss_score(score: CvssScore) -> Self {
        match score.value() {
            s if s >= 9.0 => Severity::Critical,
            s if s >= 7.0 => Severity::High,
            s if s >= 4.0 => Severity::Medium,
            s if s > 0.0 => Severity::Low,
            _ => Severity::None,
        }
    }

    /// Maps database severity labels; GitHub's "MODERATE" counts as medium
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_uppercase().as_str() {
            "CRITICAL" => Severity::Critical,
            "HIGH" => Severity::High,
            "MODERATE" | "MEDIUM" => Severity::Medium,
            "LOW" => Severity::Low,
            _ => Severity::None,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Severity::None => "Unknown",
            Severity::Low => "Low",
            Severity::Medium => "Medium",
            Severity::High => "High",
            Severity::Critical => "Critical",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cvss_score_bounds() {
        assert!(CvssScore::new(0.0).is_ok());
        assert!(CvssScore::new(10.0).is_ok());
        assert!(CvssScore::new(10.1).is_err());
        assert!(CvssScore::new(-1.0).is_err());
    }

    #[test]
    fn test_severity_from_cvss_score() {
        let severity = |s| Severity::from_cvss_score(CvssScore::new(s).unwrap());
        assert_eq!(severity(9.8), Severity::Critical);
        assert_eq!(severity(7.5), Severity::High);
        assert_eq!(severity(5.3), Severity::Medium);
        assert_eq!(severity(2.0), Severity::Low);
        assert_eq!(severity(0.0), Severity::None);
    }

    #[test]
    fn test_severity_from_label() {
        assert_eq!(Severity::from_label("moderate"), Severity::Medium);
        assert_eq!(Severity::from_label("HIGH"), Severity::High);
        assert_eq!(Severity::from_label("whatever"), Severity::None);
    }

    #[test]
    fn test_severity_display() {
        assert_eq!(Severity::Critical.to_string(), "Critical");
        assert_eq!(Severity::None.to_string(), "Unknown");
    }
}
