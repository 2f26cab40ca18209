//! Diagnostics reported while binding.
//!
//! The binder classifies recoverable problems and hands them to a
//! [`DiagnosticSink`]. Where they end up (the log, an editor panel, a test
//! assertion) is up to the caller.

use std::fmt;

use bevy::prelude::*;

/// How urgently a content author has to react.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// Optional capability missing on a shape.
    Warning,
    /// Binding is incomplete; the record is still produced.
    Error,
}

/// One reported problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
}

impl Diagnostic {
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.severity {
            Severity::Warning => write!(f, "Warning: {}", self.message),
            Severity::Error => write!(f, "Error: {}", self.message),
        }
    }
}

/// Receiver of binder diagnostics.
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: Diagnostic);
}

/// Discards everything.
impl DiagnosticSink for () {
    fn report(&mut self, _diagnostic: Diagnostic) {}
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &mut S {
    fn report(&mut self, diagnostic: Diagnostic) {
        (**self).report(diagnostic);
    }
}

/// Forwards diagnostics to the Bevy log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogDiagnostics;

impl DiagnosticSink for LogDiagnostics {
    fn report(&mut self, diagnostic: Diagnostic) {
        match diagnostic.severity {
            Severity::Warning => warn!("{}", diagnostic.message),
            Severity::Error => error!("{}", diagnostic.message),
        }
    }
}

/// Collects diagnostics for later inspection.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.entries
            .iter()
            .filter(|diagnostic| diagnostic.severity == severity)
            .count()
    }

    pub fn has_errors(&self) -> bool {
        self.count(Severity::Error) > 0
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Send every collected entry to another sink, e.g. [`LogDiagnostics`].
    pub fn drain_into(&mut self, sink: &mut dyn DiagnosticSink) {
        for diagnostic in self.entries.drain(..) {
            sink.report(diagnostic);
        }
    }
}

impl DiagnosticSink for Diagnostics {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.entries.push(diagnostic);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_by_severity() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.report(Diagnostic::warning("no texture"));
        diagnostics.report(Diagnostic::error("no position"));
        diagnostics.report(Diagnostic::error("no pivot"));

        assert_eq!(diagnostics.count(Severity::Warning), 1);
        assert_eq!(diagnostics.count(Severity::Error), 2);
        assert!(diagnostics.has_errors());
    }

    #[test]
    fn test_drain_into_other_sink() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.report(Diagnostic::warning("no frame size"));

        let mut collected: Vec<Diagnostic> = Vec::new();
        diagnostics.drain_into(&mut collected);

        assert!(diagnostics.is_empty());
        assert_eq!(collected, vec![Diagnostic::warning("no frame size")]);
    }

    #[test]
    fn test_display_prefixes_severity() {
        assert_eq!(Diagnostic::error("x").to_string(), "Error: x");
        assert_eq!(Diagnostic::warning("y").to_string(), "Warning: y");
    }
}
