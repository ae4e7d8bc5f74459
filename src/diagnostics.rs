//! Diagnostic sink for recoverable plotting problems.
//!
//! The engine never aborts on malformed input. Instead every problem is
//! recorded here, emitted as a `tracing` event, and handled locally: the
//! element is skipped, the previous value is kept, or the layout is marked
//! broken.

use std::fmt;

use colored::{ColoredString, Colorize};

/// How serious a diagnostic is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// Informational trace, e.g. an unrecognized plottable kind.
    Info,
    /// A request was rejected and the previous value kept.
    Warning,
    /// A single element or option could not be used.
    Error,
    /// A precondition failed; the layout will not be drawn.
    Fatal,
}

impl Severity {
    fn label(self) -> ColoredString {
        match self {
            Severity::Info => "INFO:".bold().blue(),
            Severity::Warning => "WARNING:".bold().magenta(),
            Severity::Error => "ERROR:".bold().red(),
            Severity::Fatal => "FATAL ERROR:".bold().yellow(),
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
            Severity::Fatal => "fatal",
        };
        f.write_str(s)
    }
}

/// A single recorded diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Severity of the problem.
    pub severity: Severity,
    /// Human readable message.
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.severity, self.message)
    }
}

/// Ordered collection of diagnostics produced by one layout.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a diagnostic and emit it as a tracing event.
    pub fn push(&mut self, severity: Severity, message: impl Into<String>) {
        let message = message.into();
        match severity {
            Severity::Fatal | Severity::Error => tracing::error!(%severity, "{message}"),
            Severity::Warning => tracing::warn!("{message}"),
            Severity::Info => tracing::info!("{message}"),
        }
        self.entries.push(Diagnostic { severity, message });
    }

    /// Shorthand for [`Severity::Fatal`].
    pub fn fatal(&mut self, message: impl Into<String>) {
        self.push(Severity::Fatal, message);
    }

    /// Shorthand for [`Severity::Error`].
    pub fn error(&mut self, message: impl Into<String>) {
        self.push(Severity::Error, message);
    }

    /// Shorthand for [`Severity::Warning`].
    pub fn warn(&mut self, message: impl Into<String>) {
        self.push(Severity::Warning, message);
    }

    /// Shorthand for [`Severity::Info`].
    pub fn info(&mut self, message: impl Into<String>) {
        self.push(Severity::Info, message);
    }

    /// All recorded diagnostics in order.
    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    /// Number of recorded diagnostics.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of diagnostics with the given severity.
    pub fn count(&self, severity: Severity) -> usize {
        self.entries
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }

    /// Whether any recorded message contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.entries.iter().any(|d| d.message.contains(needle))
    }

    /// Console summary with colored severity labels, one line per diagnostic.
    pub fn summary(&self) -> String {
        self.entries
            .iter()
            .map(|d| format!("{} {}", d.severity.label(), d.message))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
