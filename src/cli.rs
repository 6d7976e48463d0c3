use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::application::dto::{CheckOptions, UpdateOptions, DEFAULT_FORMAT};
use crate::config::ConfigFile;

/// Audit uv.lock files for vulnerable packages and insecure sources
#[derive(Parser, Debug)]
#[command(name = "uv-audit")]
#[command(about = "Audit uv.lock files for vulnerable packages and insecure sources", long_about = None)]
#[command(disable_version_flag = true, args_conflicts_with_subcommands = true)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Print the version and the number of known advisories
    #[arg(short = 'V', long = "version")]
    pub version: bool,

    /// Options for `check`, accepted without naming the command
    #[command(flatten)]
    pub check: CheckArgs,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check the lockfile against the advisory database (default)
    Check(CheckArgs),
    /// Download or update the advisory database
    Update(UpdateArgs),
    /// Print the version and the number of known advisories
    Version,
}

#[derive(clap::Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckArgs {
    /// Only print the report
    #[arg(short, long)]
    pub quiet: bool,

    /// Show advisory descriptions and debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Advisory ids (or aliases such as CVE ids) to ignore
    #[arg(short, long, value_name = "ID", num_args = 1..)]
    pub ignore: Vec<String>,

    /// Update the advisory database before checking
    #[arg(short, long)]
    pub update: bool,

    /// Report format: text, json, markdown (default: text)
    #[arg(short = 'F', long, value_name = "FORMAT")]
    pub format: Option<String>,

    /// Write the report to a file instead of stdout
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Lockfile to check (defaults to uv.lock in the current directory)
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Config file (defaults to uv-audit.config.yml in the current directory)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Advisory database directory
    #[arg(long, value_name = "DIR")]
    pub database: Option<PathBuf>,
}

#[derive(clap::Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateArgs {
    /// Suppress progress and summary lines
    #[arg(short, long)]
    pub quiet: bool,

    /// Advisory database directory
    #[arg(long, value_name = "DIR")]
    pub database: Option<PathBuf>,

    /// Config file (defaults to uv-audit.config.yml in the current directory)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// The one command a parsed command line asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    Check(CheckArgs),
    Update(UpdateArgs),
    Version,
}

impl Invocation {
    pub fn verbose(&self) -> bool {
        matches!(self, Invocation::Check(args) if args.verbose)
    }

    pub fn config_path(&self) -> Option<&std::path::Path> {
        match self {
            Invocation::Check(args) => args.config.as_deref(),
            Invocation::Update(args) => args.config.as_deref(),
            Invocation::Version => None,
        }
    }

    pub fn database_path(&self) -> Option<&std::path::Path> {
        match self {
            Invocation::Check(args) => args.database.as_deref(),
            Invocation::Update(args) => args.database.as_deref(),
            Invocation::Version => None,
        }
    }
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// `--version` wins; no command means `check` with the top-level options
    pub fn into_invocation(self) -> Invocation {
        if self.version {
            return Invocation::Version;
        }
        match self.command {
            Some(Command::Check(args)) => Invocation::Check(args),
            Some(Command::Update(args)) => Invocation::Update(args),
            Some(Command::Version) => Invocation::Version,
            None => Invocation::Check(self.check),
        }
    }
}

/// Merges command-line flags with the config file.
///
/// `--format` overrides the file's `format`. Ignore lists are concatenated,
/// command line first, without removing duplicates.
pub fn build_check_options(
    args: &CheckArgs,
    config: Option<&ConfigFile>,
    working_dir: PathBuf,
) -> CheckOptions {
    let format = args
        .format
        .clone()
        .or_else(|| config.and_then(|c| c.format.clone()))
        .unwrap_or_else(|| DEFAULT_FORMAT.to_string());

    let mut ignore = args.ignore.clone();
    if let Some(config) = config {
        ignore.extend(config.ignore_ids());
    }

    CheckOptions {
        quiet: args.quiet,
        verbose: args.verbose,
        ignore,
        update: args.update,
        format,
        output: args.output.clone(),
        file: args.file.clone(),
        working_dir,
    }
}

pub fn build_update_options(args: &UpdateArgs) -> UpdateOptions {
    UpdateOptions { quiet: args.quiet }
}

/// `--database`, else the config file's `database`. `None` leaves the
/// choice to the environment and the platform default.
pub fn resolve_database(cli: Option<&std::path::Path>, config: Option<&ConfigFile>) -> Option<PathBuf> {
    cli.map(PathBuf::from)
        .or_else(|| config.and_then(|c| c.database.clone()))
}
