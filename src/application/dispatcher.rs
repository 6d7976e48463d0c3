use crate::application::dto::{CheckOptions, UpdateOptions};
use crate::application::factories::{FormatRegistry, SinkFactory, SinkTarget};
use crate::application::use_cases::{render_report, ScanLockfileUseCase, UpdateDatabaseUseCase};
use crate::ports::inbound::AuditCommandPort;
use crate::ports::outbound::{AdvisoryDatabase, DependencyScanner, RenderSettings, StatusReporter};
use crate::shared::error::ExitCode;
use crate::shared::Result;
use std::io::Write;

/// AuditDispatcher - runs the `check`, `update` and `version` commands
///
/// Owns every collaborator it needs. The console writer is injected so the
/// report and the version line can be captured; status lines go through the
/// [`StatusReporter`].
///
/// # Type Parameters
/// * `S` - DependencyScanner implementation
/// * `D` - AdvisoryDatabase implementation
/// * `R` - StatusReporter implementation
/// * `W` - Console writer (stdout in the binary)
pub struct AuditDispatcher<S, D, R, W> {
    scanner: S,
    advisory_database: D,
    status_reporter: R,
    console: W,
    registry: FormatRegistry,
    color: bool,
    program_name: &'static str,
}

impl<S, D, R, W> AuditDispatcher<S, D, R, W>
where
    S: DependencyScanner,
    D: AdvisoryDatabase,
    R: StatusReporter,
    W: Write,
{
    /// Creates a dispatcher with the built-in formats and colours disabled
    pub fn new(scanner: S, advisory_database: D, status_reporter: R, console: W) -> Self {
        Self {
            scanner,
            advisory_database,
            status_reporter,
            console,
            registry: FormatRegistry::with_builtin_formats(),
            color: false,
            program_name: env!("CARGO_PKG_NAME"),
        }
    }

    pub fn with_registry(mut self, registry: FormatRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Allows coloured reports when they go to the console
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn console(&self) -> &W {
        &self.console
    }

    pub fn advisory_database(&self) -> &D {
        &self.advisory_database
    }

    pub fn status_reporter(&self) -> &R {
        &self.status_reporter
    }
}

impl<S, D, R, W> AuditCommandPort for AuditDispatcher<S, D, R, W>
where
    S: DependencyScanner,
    D: AdvisoryDatabase,
    R: StatusReporter,
    W: Write,
{
    fn check(&mut self, options: &CheckOptions) -> Result<ExitCode> {
        let target = SinkTarget::from_output(options.output.clone());
        let settings = RenderSettings {
            verbose: options.verbose,
            color: self.color && target.is_console(),
        };

        // Resolved before anything else so a bad name costs no update or scan
        let format = self.registry.resolve(&options.format, settings)?;

        if options.update {
            UpdateDatabaseUseCase::new(&self.advisory_database, &self.status_reporter)
                .execute(options.update_options())?;
        }

        let report = ScanLockfileUseCase::new(&self.scanner).execute(options)?;

        let sink = SinkFactory::open(&target, &mut self.console)?;
        render_report(format.as_ref(), &report, sink)?;

        if report.is_vulnerable() {
            Ok(ExitCode::VulnerabilitiesDetected)
        } else {
            Ok(ExitCode::Success)
        }
    }

    fn update(&mut self, options: &UpdateOptions) -> Result<ExitCode> {
        UpdateDatabaseUseCase::new(&self.advisory_database, &self.status_reporter)
            .execute(*options)?;
        Ok(ExitCode::Success)
    }

    fn version(&mut self) -> Result<ExitCode> {
        let size = self.advisory_database.size()?;
        writeln!(
            self.console,
            "{} {} (advisories: {})",
            self.program_name,
            env!("CARGO_PKG_VERSION"),
            size
        )?;
        self.console.flush()?;
        Ok(ExitCode::Success)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::domain::{Advisory, AuditReport, PackageName, UpdateOutcome};
    use crate::ports::outbound::ScanRequest;
    use crate::shared::error::AuditError;
    use std::cell::Cell;
    use std::path::PathBuf;

    struct CountingScanner {
        calls: Cell<usize>,
    }

    impl DependencyScanner for CountingScanner {
        fn scan(&self, _request: &ScanRequest) -> Result<AuditReport> {
            self.calls.set(self.calls.get() + 1);
            Ok(AuditReport::new(PathBuf::from("uv.lock"), 3, vec![]))
        }
    }

    struct CountingDatabase {
        update_calls: Cell<usize>,
    }

    impl AdvisoryDatabase for CountingDatabase {
        fn update(&self, _quiet: bool) -> UpdateOutcome {
            self.update_calls.set(self.update_calls.get() + 1);
            UpdateOutcome::Updated
        }

        fn location(&self) -> PathBuf {
            PathBuf::from("/db")
        }

        fn size(&self) -> Result<usize> {
            Ok(1234)
        }

        fn required_tool(&self) -> &str {
            "git"
        }

        fn required_tool_present(&self) -> bool {
            true
        }

        fn advisories_for(&self, _package: &PackageName) -> Result<Vec<Advisory>> {
            Ok(Vec::new())
        }
    }

    struct SilentReporter;

    impl StatusReporter for SilentReporter {
        fn report(&self, _message: &str) {}
        fn report_success(&self, _message: &str) {}
        fn report_warning(&self, _message: &str) {}
    }

    fn dispatcher() -> AuditDispatcher<CountingScanner, CountingDatabase, SilentReporter, Vec<u8>> {
        AuditDispatcher::new(
            CountingScanner {
                calls: Cell::new(0),
            },
            CountingDatabase {
                update_calls: Cell::new(0),
            },
            SilentReporter,
            Vec::new(),
        )
    }

    #[test]
    fn test_unknown_format_stops_before_update_and_scan() {
        let mut dispatcher = dispatcher();
        let options = CheckOptions {
            format: "doesnotexist".to_string(),
            update: true,
            ..CheckOptions::default()
        };

        let err = dispatcher.check(&options).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<AuditError>(),
            Some(AuditError::UnknownFormat { .. })
        ));
        assert!(err.to_string().starts_with("Unknown format: doesnotexist"));
        assert_eq!(dispatcher.advisory_database().update_calls.get(), 0);
        assert_eq!(dispatcher.scanner.calls.get(), 0);
        assert!(dispatcher.console().is_empty());
    }

    #[test]
    fn test_clean_check_renders_to_console() {
        let mut dispatcher = dispatcher();

        let code = dispatcher.check(&CheckOptions::default()).unwrap();

        assert_eq!(code, ExitCode::Success);
        assert_eq!(
            String::from_utf8(dispatcher.console().clone()).unwrap(),
            "No vulnerabilities found\n"
        );
        assert_eq!(dispatcher.advisory_database().update_calls.get(), 0);
    }

    #[test]
    fn test_version_prints_program_and_count() {
        let mut dispatcher = dispatcher();

        dispatcher.version().unwrap();

        assert_eq!(
            String::from_utf8(dispatcher.console().clone()).unwrap(),
            format!("uv-audit {} (advisories: 1234)\n", env!("CARGO_PKG_VERSION"))
        );
    }
}
