use crate::audit::domain::Package;
use crate::shared::error::AuditError;
use crate::shared::Result;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct UvLock {
    #[serde(default)]
    package: Vec<UvPackage>,
}

#[derive(Debug, Deserialize)]
struct UvPackage {
    name: String,
    #[serde(default)]
    version: Option<String>,
    #[serde(default)]
    source: Option<UvSource>,
    #[serde(default)]
    sdist: Option<UvArtifact>,
    #[serde(default)]
    wheels: Vec<UvArtifact>,
}

#[derive(Debug, Default, Deserialize)]
struct UvSource {
    #[serde(default)]
    registry: Option<String>,
    #[serde(default)]
    git: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    path: Option<String>,
    #[serde(default)]
    directory: Option<String>,
    #[serde(default)]
    editable: Option<String>,
    #[serde(default, rename = "virtual")]
    virtual_path: Option<String>,
}

impl UvSource {
    /// Project-local sources are never published, so advisories cannot target them
    fn is_local(&self) -> bool {
        self.path.is_some()
            || self.directory.is_some()
            || self.editable.is_some()
            || self.virtual_path.is_some()
    }
}

#[derive(Debug, Deserialize)]
struct UvArtifact {
    #[serde(default)]
    url: Option<String>,
}

/// One `[[package]]` entry of a uv.lock that can be audited
#[derive(Debug, Clone, PartialEq)]
pub struct LockedPackage {
    pub package: Package,
    /// Index, repository and artifact URLs the package is fetched from
    pub source_uris: Vec<String>,
}

/// Parses uv.lock content into auditable packages.
///
/// Local packages (virtual, editable, path and directory sources) and
/// entries without a version are skipped.
pub fn parse_uv_lock(path: &Path, content: &str) -> Result<Vec<LockedPackage>> {
    let lock: UvLock = toml::from_str(content).map_err(|e| AuditError::LockfileParseError {
        path: path.to_path_buf(),
        details: e.to_string(),
    })?;

    let mut packages = Vec::with_capacity(lock.package.len());
    for entry in lock.package {
        let source = entry.source.unwrap_or_default();
        if source.is_local() {
            tracing::debug!(package = entry.name.as_str(), "skipping local package");
            continue;
        }
        let Some(version) = entry.version else {
            tracing::debug!(package = entry.name.as_str(), "skipping package without version");
            continue;
        };

        let package = Package::new(entry.name, version).map_err(|e| {
            AuditError::LockfileParseError {
                path: path.to_path_buf(),
                details: e.to_string(),
            }
        })?;

        let source_uris = [source.registry, source.git, source.url]
            .into_iter()
            .flatten()
            .chain(entry.sdist.and_then(|sdist| sdist.url))
            .chain(entry.wheels.into_iter().filter_map(|wheel| wheel.url))
            .collect();

        packages.push(LockedPackage {
            package,
            source_uris,
        });
    }

    Ok(packages)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOCKFILE: &str = r#"
version = 1
requires-python = ">=3.8"

[[package]]
name = "myproject"
version = "1.0.0"
source = { virtual = "." }
dependencies = [
    { name = "requests" },
]

[[package]]
name = "requests"
version = "2.19.0"
source = { registry = "https://pypi.org/simple" }
sdist = { url = "https://files.pythonhosted.org/packages/requests-2.19.0.tar.gz", hash = "sha256:abc", size = 10 }
wheels = [
    { url = "https://files.pythonhosted.org/packages/requests-2.19.0-py3-none-any.whl", hash = "sha256:def", size = 11 },
]

[[package]]
name = "internal-lib"
version = "0.3.0"
source = { registry = "http://pypi.internal/simple" }

[[package]]
name = "vendored"
version = "0.1.0"
source = { git = "git://example.com/vendored?rev=main#0123abcd" }
"#;

    #[test]
    fn test_parse_skips_local_packages() {
        let packages = parse_uv_lock(Path::new("uv.lock"), LOCKFILE).unwrap();
        let names: Vec<&str> = packages
            .iter()
            .map(|locked| locked.package.name().as_str())
            .collect();
        assert_eq!(names, vec!["requests", "internal-lib", "vendored"]);
    }

    #[test]
    fn test_parse_collects_source_uris() {
        let packages = parse_uv_lock(Path::new("uv.lock"), LOCKFILE).unwrap();
        assert_eq!(
            packages[0].source_uris,
            vec![
                "https://pypi.org/simple".to_string(),
                "https://files.pythonhosted.org/packages/requests-2.19.0.tar.gz".to_string(),
                "https://files.pythonhosted.org/packages/requests-2.19.0-py3-none-any.whl"
                    .to_string(),
            ]
        );
        assert_eq!(
            packages[2].source_uris,
            vec!["git://example.com/vendored?rev=main#0123abcd".to_string()]
        );
    }

    #[test]
    fn test_parse_empty_lockfile() {
        let packages = parse_uv_lock(Path::new("uv.lock"), "version = 1\n").unwrap();
        assert!(packages.is_empty());
    }

    #[test]
    fn test_parse_invalid_toml() {
        let err = parse_uv_lock(Path::new("uv.lock"), "[[package]\nname =").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<AuditError>(),
            Some(AuditError::LockfileParseError { .. })
        ));
    }

    #[test]
    fn test_parse_invalid_version() {
        let content = r#"
[[package]]
name = "broken"
version = "not a version"
source = { registry = "https://pypi.org/simple" }
"#;
        let err = parse_uv_lock(Path::new("uv.lock"), content).unwrap_err();
        assert!(err.to_string().contains("Failed to parse uv.lock file"));
    }
}
