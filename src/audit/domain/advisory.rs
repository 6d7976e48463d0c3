use super::package::Version;
use super::severity::{CvssScore, Severity};

/// Upper end of an affected version range
#[derive(Debug, Clone, PartialEq)]
pub enum RangeEnd {
    /// Versions from this one on are patched
    Fixed(Version),
    /// This version is the last affected one
    LastAffected(Version),
    /// No fix is known
    Unbounded,
}

/// A contiguous span of affected versions.
///
/// `introduced == None` means every version up to the end is affected.
#[derive(Debug, Clone, PartialEq)]
pub struct AffectedRange {
    introduced: Option<Version>,
    end: RangeEnd,
}

impl AffectedRange {
    pub fn new(introduced: Option<Version>, end: RangeEnd) -> Self {
        Self { introduced, end }
    }

    pub fn contains(&self, version: &Version) -> bool {
        let above_start = self
            .introduced
            .as_ref()
            .map_or(true, |introduced| version >= introduced);
        let below_end = match &self.end {
            RangeEnd::Fixed(fixed) => version < fixed,
            RangeEnd::LastAffected(last) => version <= last,
            RangeEnd::Unbounded => true,
        };
        above_start && below_end
    }

    pub fn fixed(&self) -> Option<&Version> {
        match &self.end {
            RangeEnd::Fixed(fixed) => Some(fixed),
            _ => None,
        }
    }
}

/// A known vulnerability affecting one package
#[derive(Debug, Clone, PartialEq)]
pub struct Advisory {
    id: String,
    aliases: Vec<String>,
    title: Option<String>,
    description: Option<String>,
    url: Option<String>,
    cvss_score: Option<CvssScore>,
    severity: Severity,
    ranges: Vec<AffectedRange>,
    versions: Vec<Version>,
}

impl Advisory {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            aliases: Vec::new(),
            title: None,
            description: None,
            url: None,
            cvss_score: None,
            severity: Severity::None,
            ranges: Vec::new(),
            versions: Vec::new(),
        }
    }

    pub fn with_aliases(mut self, aliases: Vec<String>) -> Self {
        self.aliases = aliases;
        self
    }

    pub fn with_title(mut self, title: Option<String>) -> Self {
        self.title = title;
        self
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    pub fn with_url(mut self, url: Option<String>) -> Self {
        self.url = url;
        self
    }

    /// Sets the score and derives the severity from it
    pub fn with_cvss_score(mut self, score: CvssScore) -> Self {
        self.cvss_score = Some(score);
        self.severity = Severity::from_cvss_score(score);
        self
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn with_range(mut self, range: AffectedRange) -> Self {
        self.ranges.push(range);
        self
    }

    /// Adds explicitly listed affected versions to those already known
    pub fn with_versions(mut self, versions: Vec<Version>) -> Self {
        self.versions.extend(versions);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn cvss_score(&self) -> Option<CvssScore> {
        self.cvss_score
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// The primary id followed by every alias (CVE, GHSA, ...)
    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.id.as_str()).chain(self.aliases.iter().map(String::as_str))
    }

    /// Whether the ignore list names this advisory by id or alias
    pub fn is_ignored_by(&self, ignore: &[String]) -> bool {
        self.identifiers()
            .any(|identifier| ignore.iter().any(|ignored| ignored == identifier))
    }

    pub fn affects(&self, version: &Version) -> bool {
        self.versions.iter().any(|listed| listed == version)
            || self.ranges.iter().any(|range| range.contains(version))
    }

    /// Versions that fix this advisory, lowest first, without duplicates
    pub fn patched_versions(&self) -> Vec<&Version> {
        let mut fixed: Vec<&Version> = self.ranges.iter().filter_map(AffectedRange::fixed).collect();
        fixed.sort();
        fixed.dedup();
        fixed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(text: &str) -> Version {
        Version::new(text.to_string()).unwrap()
    }

    fn requests_advisory() -> Advisory {
        Advisory::new("PYSEC-2018-28")
            .with_aliases(vec![
                "CVE-2018-18074".to_string(),
                "GHSA-x84v-xcm2-53pg".to_string(),
            ])
            .with_range(AffectedRange::new(None, RangeEnd::Fixed(v("2.20.0"))))
    }

    #[test]
    fn test_range_fixed_is_exclusive() {
        let range = AffectedRange::new(Some(v("1.0")), RangeEnd::Fixed(v("2.0")));
        assert!(!range.contains(&v("0.9")));
        assert!(range.contains(&v("1.0")));
        assert!(range.contains(&v("1.9.9")));
        assert!(!range.contains(&v("2.0")));
    }

    #[test]
    fn test_range_last_affected_is_inclusive() {
        let range = AffectedRange::new(Some(v("1.0")), RangeEnd::LastAffected(v("1.4")));
        assert!(range.contains(&v("1.4")));
        assert!(!range.contains(&v("1.4.1")));
    }

    #[test]
    fn test_range_unbounded() {
        let range = AffectedRange::new(Some(v("3.0")), RangeEnd::Unbounded);
        assert!(range.contains(&v("99.0")));
        assert!(!range.contains(&v("2.9")));
    }

    #[test]
    fn test_affects_by_range_and_explicit_versions() {
        let advisory = requests_advisory().with_versions(vec![v("3.1.0")]);
        assert!(advisory.affects(&v("2.19.1")));
        assert!(!advisory.affects(&v("2.20.0")));
        assert!(advisory.affects(&v("3.1.0")));
    }

    #[test]
    fn test_is_ignored_by_alias() {
        let advisory = requests_advisory();
        assert!(advisory.is_ignored_by(&["CVE-2018-18074".to_string()]));
        assert!(advisory.is_ignored_by(&["PYSEC-2018-28".to_string()]));
        assert!(!advisory.is_ignored_by(&["CVE-2018-0000".to_string()]));
        assert!(!advisory.is_ignored_by(&[]));
    }

    #[test]
    fn test_patched_versions_sorted_and_unique() {
        let advisory = Advisory::new("X")
            .with_range(AffectedRange::new(Some(v("2.0")), RangeEnd::Fixed(v("2.3"))))
            .with_range(AffectedRange::new(None, RangeEnd::Fixed(v("1.9"))))
            .with_range(AffectedRange::new(Some(v("2.1")), RangeEnd::Fixed(v("2.3.0"))))
            .with_range(AffectedRange::new(Some(v("3.0")), RangeEnd::Unbounded));
        let patched: Vec<String> = advisory
            .patched_versions()
            .iter()
            .map(|version| version.to_string())
            .collect();
        assert_eq!(patched, vec!["1.9", "2.3"]);
    }

    #[test]
    fn test_cvss_score_sets_severity() {
        let advisory = Advisory::new("X").with_cvss_score(CvssScore::new(9.8).unwrap());
        assert_eq!(advisory.severity(), Severity::Critical);
    }
}
