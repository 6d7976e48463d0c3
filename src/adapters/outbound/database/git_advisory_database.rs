use super::osv_record::parse_advisory_file;
use crate::audit::domain::package::normalize_name;
use crate::audit::domain::{Advisory, PackageName, UnavailableReason, UpdateOutcome};
use crate::ports::outbound::AdvisoryDatabase;
use crate::shared::error::AuditError;
use crate::shared::security::read_checked;
use crate::shared::Result;
use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::OnceLock;
use walkdir::WalkDir;

/// Upstream repository cloned when no database exists yet
pub const DEFAULT_URL: &str = "https://github.com/pypa/advisory-database.git";

/// Overrides the database location when `--database` is not given
pub const DB_PATH_ENV: &str = "UV_AUDIT_DB";

/// Overrides the repository cloned by `update`
pub const DB_URL_ENV: &str = "UV_AUDIT_DB_URL";

const ADVISORY_EXTENSIONS: [&str; 3] = ["yaml", "yml", "json"];

/// GitAdvisoryDatabase adapter implementing the AdvisoryDatabase port
///
/// A local git checkout of an OSV advisory database laid out as
/// `vulns/<package>/<ID>.yaml`. Updating shells out to `git`.
#[derive(Debug, Clone)]
pub struct GitAdvisoryDatabase {
    path: PathBuf,
    url: String,
    git_program: PathBuf,
    index: OnceLock<HashMap<String, PathBuf>>,
}

impl GitAdvisoryDatabase {
    pub fn new(path: PathBuf, url: String) -> Self {
        Self {
            path,
            url,
            git_program: PathBuf::from("git"),
            index: OnceLock::new(),
        }
    }

    /// Opens the database at `explicit`, or at the environment/default
    /// location, cloning from the environment/default URL
    pub fn locate(explicit: Option<PathBuf>) -> Self {
        let path = explicit.unwrap_or_else(Self::default_path);
        let url = env::var(DB_URL_ENV)
            .ok()
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_URL.to_string());
        tracing::debug!(path = %path.display(), url = url.as_str(), "using advisory database");
        Self::new(path, url)
    }

    /// `$UV_AUDIT_DB`, else `$XDG_DATA_HOME/uv-audit/advisory-db`, else
    /// `$HOME/.local/share/uv-audit/advisory-db`
    pub fn default_path() -> PathBuf {
        if let Some(path) = env::var_os(DB_PATH_ENV).filter(|p| !p.is_empty()) {
            return PathBuf::from(path);
        }
        let data_home = env::var_os("XDG_DATA_HOME")
            .filter(|p| !p.is_empty())
            .map(PathBuf::from)
            .or_else(|| env::var_os("HOME").map(|home| PathBuf::from(home).join(".local").join("share")))
            .unwrap_or_else(env::temp_dir);
        data_home.join("uv-audit").join("advisory-db")
    }

    /// Uses another git executable, e.g. one that does not exist
    pub fn with_git_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.git_program = program.into();
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn vulns_dir(&self) -> PathBuf {
        self.path.join("vulns")
    }

    fn git(&self) -> Command {
        let mut command = Command::new(&self.git_program);
        command.stdin(Stdio::null());
        command
    }

    /// Package directories keyed by normalized name, built on first lookup
    fn index(&self) -> &HashMap<String, PathBuf> {
        if let Some(index) = self.index.get() {
            return index;
        }
        let mut index = HashMap::new();
        if let Ok(entries) = std::fs::read_dir(self.vulns_dir()) {
            for entry in entries.flatten() {
                let path = entry.path();
                if !path.is_dir() {
                    continue;
                }
                if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                    index.insert(normalize_name(name), path.clone());
                }
            }
        }
        tracing::debug!(packages = index.len(), "indexed advisory database");
        self.index.get_or_init(|| index)
    }
}

fn is_advisory_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ADVISORY_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
}

impl AdvisoryDatabase for GitAdvisoryDatabase {
    fn update(&self, quiet: bool) -> UpdateOutcome {
        if !self.required_tool_present() {
            return UpdateOutcome::Unavailable(UnavailableReason::ToolMissing);
        }

        let mut command = self.git();
        if self.path.join(".git").is_dir() {
            command.arg("-C").arg(&self.path).args(["pull", "--ff-only"]);
        } else if self.path.exists() {
            tracing::debug!(path = %self.path.display(), "advisory database is not a git checkout");
            return UpdateOutcome::Unavailable(UnavailableReason::NothingToUpdate);
        } else {
            command.args(["clone", "--depth", "1"]);
        }
        if quiet {
            command.arg("--quiet");
        }
        if !self.path.exists() {
            command.arg(&self.url).arg(&self.path);
        }

        match command.status() {
            Ok(status) if status.success() => UpdateOutcome::Updated,
            Ok(status) => {
                tracing::warn!(status = %status, "git exited unsuccessfully");
                UpdateOutcome::Failed
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                UpdateOutcome::Unavailable(UnavailableReason::ToolMissing)
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to run git");
                UpdateOutcome::Failed
            }
        }
    }

    fn location(&self) -> PathBuf {
        self.path.clone()
    }

    fn size(&self) -> Result<usize> {
        let vulns = self.vulns_dir();
        if !vulns.is_dir() {
            return Ok(0);
        }
        let count = WalkDir::new(vulns)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file() && is_advisory_file(entry.path()))
            .count();
        Ok(count)
    }

    fn required_tool(&self) -> &str {
        "git"
    }

    fn required_tool_present(&self) -> bool {
        self.git()
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|status| status.success())
            .unwrap_or(false)
    }

    fn advisories_for(&self, package: &PackageName) -> Result<Vec<Advisory>> {
        let Some(dir) = self.index().get(&package.normalized()) else {
            return Ok(Vec::new());
        };

        let mut files: Vec<PathBuf> = WalkDir::new(dir)
            .max_depth(1)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file() && is_advisory_file(entry.path()))
            .map(|entry| entry.into_path())
            .collect();
        files.sort();

        let mut advisories = Vec::with_capacity(files.len());
        for file in files {
            let content = read_checked(&file, "advisory").map_err(|e| AuditError::FileReadError {
                path: file.clone(),
                details: e.to_string(),
            })?;
            if let Some(advisory) = parse_advisory_file(&file, &content, package.as_str())? {
                advisories.push(advisory);
            }
        }
        Ok(advisories)
    }
}
