/// Schemes that transfer packages without transport security
const INSECURE_SCHEMES: &[&str] = &["http://", "git://"];

/// SourcePolicy flags package sources fetched over plaintext protocols
pub struct SourcePolicy;

impl SourcePolicy {
    pub fn is_insecure(uri: &str) -> bool {
        let lowered = uri.trim().to_ascii_lowercase();
        // git+http://host/repo is as insecure as http://host/repo
        let without_vcs = lowered.strip_prefix("git+").unwrap_or(&lowered);
        INSECURE_SCHEMES
            .iter()
            .any(|scheme| without_vcs.starts_with(scheme))
    }

    /// Insecure URIs from `uris`, sorted and without duplicates
    pub fn insecure_uris<'a>(uris: impl IntoIterator<Item = &'a str>) -> Vec<String> {
        let mut insecure: Vec<String> = uris
            .into_iter()
            .filter(|uri| Self::is_insecure(uri))
            .map(str::to_string)
            .collect();
        insecure.sort();
        insecure.dedup();
        insecure
    }
}
