//! Structured diagnostics collected across the pipeline.
//!
//! No stage aborts the whole run: each one drops the smallest affected unit
//! and appends a [`Diagnostic`] here. The invoking build tool owns
//! presentation and decides which severities fail the build.

use proc_macro2::Span;

/// Diagnostic severity, ordered from most to least severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
    Info,
}

/// Machine-readable diagnostic classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticCode {
    /// A `#[config_group]` attribute on anything but a trait.
    GroupMustBeTrait,
    /// Group key fails identifier validation.
    InvalidGroupKey,
    /// A later group reuses an earlier group's key.
    DuplicateGroupKey,
    /// Two distinct group keys map to the same generated type name.
    GroupTypeNameCollision,
    /// Two properties in the same group share a storage key.
    DuplicateKeyInGroup,
    /// A non-option marker without a `default` argument.
    MissingDefaultValue,
    /// An `option_prop` return type that is not a schema enum.
    OptionTypeNotEnum,
    /// The option enum lacks the `#[config_options]` marker.
    MissingOptionsMarker,
    /// No variant of the option enum carries `#[choice]`.
    NoChoices,
    /// No choice carries the `default` flag.
    NoDefaultChoice,
    /// More than one choice carries the `default` flag.
    MultipleDefaultChoices,
    /// Two choices share an id within one hierarchy.
    DuplicateChoiceIds,
    /// Marker arguments failed to parse.
    MalformedAttribute,
    /// A marker name the dispatcher does not handle; a processor defect.
    UnknownPropertyMarker,
    /// A group that parsed to zero properties.
    EmptyGroup,
    /// Emission of one group's artifacts panicked.
    EmissionFailed,
}

/// A line/column anchor into the schema source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    /// Resolves a span to its start position.
    #[must_use]
    pub fn from_span(span: Span) -> Self {
        let start = span.start();
        Self {
            line: start.line,
            column: start.column,
        }
    }
}

/// One structured diagnostic message.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub severity: Severity,
    pub code: DiagnosticCode,
    pub message: String,
    pub location: Option<SourceLocation>,
}

/// Append-only diagnostic sink threaded through every pipeline stage.
#[derive(Debug, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error(&mut self, code: DiagnosticCode, message: impl Into<String>, span: Option<Span>) {
        self.push(Severity::Error, code, message, span);
    }

    pub fn warning(&mut self, code: DiagnosticCode, message: impl Into<String>, span: Option<Span>) {
        self.push(Severity::Warning, code, message, span);
    }

    pub fn info(&mut self, code: DiagnosticCode, message: impl Into<String>, span: Option<Span>) {
        self.push(Severity::Info, code, message, span);
    }

    /// Records an error anchored to an already-resolved location.
    pub fn error_at(
        &mut self,
        code: DiagnosticCode,
        message: impl Into<String>,
        location: Option<SourceLocation>,
    ) {
        self.entries.push(Diagnostic {
            severity: Severity::Error,
            code,
            message: message.into(),
            location,
        });
    }

    fn push(
        &mut self,
        severity: Severity,
        code: DiagnosticCode,
        message: impl Into<String>,
        span: Option<Span>,
    ) {
        self.entries.push(Diagnostic {
            severity,
            code,
            message: message.into(),
            location: span.map(SourceLocation::from_span),
        });
    }

    /// True when any entry is an error.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.entries.iter().any(|d| d.severity == Severity::Error)
    }

    #[must_use]
    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    /// Consumes the sink, yielding the collected entries.
    #[must_use]
    pub fn into_entries(self) -> Vec<Diagnostic> {
        self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_are_detected_among_warnings() {
        let mut sink = Diagnostics::new();
        sink.warning(DiagnosticCode::EmptyGroup, "group 'a' has no properties", None);
        assert!(!sink.has_errors());
        sink.error(DiagnosticCode::InvalidGroupKey, "bad key", None);
        assert!(sink.has_errors());
        assert_eq!(sink.entries().len(), 2);
    }

    #[test]
    fn span_resolves_to_line_and_column() {
        let file: syn::File = syn::parse_str("\n\nfn anchor() {}\n").expect("parse");
        let span = syn::spanned::Spanned::span(&file.items[0]);
        let loc = SourceLocation::from_span(span);
        assert_eq!(loc.line, 3);
    }
}
