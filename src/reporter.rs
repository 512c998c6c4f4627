use log::{error, warn};

/// Sink for the failures the analyzer contains instead of propagating.
///
/// The core never prints by itself: HTTP errors, transport exceptions and
/// invalid identifiers all end up here, and the front end decides how to
/// show them.
pub trait ErrorReporter {
    fn report(&self, message: &str);

    /// Non-fatal notices such as a skipped course ID.
    fn warn(&self, message: &str) {
        self.report(message);
    }
}

/// Reporter that forwards everything to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogReporter;

impl ErrorReporter for LogReporter {
    fn report(&self, message: &str) {
        error!("{}", message);
    }

    fn warn(&self, message: &str) {
        warn!("{}", message);
    }
}
