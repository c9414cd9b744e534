use std::io::Write;

/// Sink for fatal, user-facing setup errors such as a missing font.
pub trait ErrorReporter {
    fn report_error(&mut self, message: &str);
}

/// Logs through `tracing` and also writes the bare message to stderr, so it is visible even
/// without a subscriber installed.
#[derive(Clone, Copy, Debug, Default)]
pub struct StderrReporter;

impl ErrorReporter for StderrReporter {
    fn report_error(&mut self, message: &str) {
        tracing::error!(%message, "fatal");
        let _ = writeln!(std::io::stderr().lock(), "{message}");
    }
}

impl<E: ErrorReporter + ?Sized> ErrorReporter for &mut E {
    fn report_error(&mut self, message: &str) {
        (**self).report_error(message);
    }
}
