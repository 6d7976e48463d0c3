/// StatusReporter port for user-facing status lines
///
/// Errors are not reported here: they travel back to the entry point as
/// `Err` values and are printed once, there.
pub trait StatusReporter {
    /// Reports a neutral informational line
    fn report(&self, message: &str);

    /// Reports a line announcing that something succeeded
    fn report_success(&self, message: &str);

    /// Reports a non-fatal warning
    fn report_warning(&self, message: &str);
}
