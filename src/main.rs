use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use uv_audit::adapters::outbound::console::ConsoleStatusReporter;
use uv_audit::adapters::outbound::database::GitAdvisoryDatabase;
use uv_audit::adapters::outbound::filesystem::FileSystemReader;
use uv_audit::adapters::outbound::scanner::LockfileScanner;
use uv_audit::application::dispatcher::AuditDispatcher;
use uv_audit::cli::{
    build_check_options, build_update_options, resolve_database, Args, Invocation,
};
use uv_audit::config::load_config;
use uv_audit::ports::inbound::AuditCommandPort;
use uv_audit::shared::error::{exit_code_for, ExitCode};
use uv_audit::shared::Result;

type Dispatcher = AuditDispatcher<
    LockfileScanner<FileSystemReader, GitAdvisoryDatabase>,
    GitAdvisoryDatabase,
    ConsoleStatusReporter,
    io::Stdout,
>;

fn main() {
    let invocation = Args::parse_args().into_invocation();
    init_tracing(invocation.verbose());

    match run(invocation) {
        Ok(code) => process::exit(code.as_i32()),
        Err(e) => {
            eprintln!("❌ {}", e);

            // Display error chain
            for cause in e.chain().skip(1) {
                eprintln!("\nCaused by: {}", cause);
            }

            process::exit(exit_code_for(&e).as_i32());
        }
    }
}

/// Diagnostics go to stderr: `warn` by default, `debug` for this crate with
/// `--verbose`, and `RUST_LOG` overrides both.
fn init_tracing(verbose: bool) {
    let default_directive = if verbose { "warn,uv_audit=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(io::stderr)
                .with_ansi(io::stderr().is_terminal())
                .with_target(false)
                .without_time(),
        )
        .with(filter)
        .init();
}

fn run(invocation: Invocation) -> Result<ExitCode> {
    // `version` reads no config, so a broken config file cannot fail it
    if invocation == Invocation::Version {
        return build_dispatcher(GitAdvisoryDatabase::locate(None)).version();
    }

    let working_dir = PathBuf::from(".");
    let config = load_config(invocation.config_path(), &working_dir)?;
    let database = GitAdvisoryDatabase::locate(resolve_database(
        invocation.database_path(),
        config.as_ref(),
    ));
    let mut dispatcher = build_dispatcher(database);

    match invocation {
        Invocation::Check(args) => {
            let options = build_check_options(&args, config.as_ref(), working_dir);
            dispatcher.check(&options)
        }
        Invocation::Update(args) => dispatcher.update(&build_update_options(&args)),
        Invocation::Version => dispatcher.version(),
    }
}

fn build_dispatcher(database: GitAdvisoryDatabase) -> Dispatcher {
    let scanner = LockfileScanner::new(FileSystemReader::new(), database.clone());
    AuditDispatcher::new(
        scanner,
        database,
        ConsoleStatusReporter::new(),
        io::stdout(),
    )
    .with_color(io::stdout().is_terminal())
}
