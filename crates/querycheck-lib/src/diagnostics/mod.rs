//! Findings against a query text or its enclosing source.
//!
//! Every stage reports into a `Diagnostics` collection against the text it
//! saw. The checking facade then moves each collection into enclosing-source
//! coordinates with [`Diagnostics::remapped`] before merging.

mod message;
mod printer;

#[cfg(test)]
mod tests;

use rowan::TextRange;

pub use message::{DiagnosticKind, DiagnosticMessage, Severity};
pub use printer::DiagnosticsPrinter;

use crate::remap::LiteralOrigin;

#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    entries: Vec<DiagnosticMessage>,
}

#[must_use = "diagnostic not emitted, call .emit()"]
pub struct DiagnosticBuilder<'a> {
    target: &'a mut Diagnostics,
    entry: DiagnosticMessage,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a diagnostic of `kind` at `range`, with the kind's fallback message.
    pub fn report(&mut self, kind: DiagnosticKind, range: TextRange) -> DiagnosticBuilder<'_> {
        DiagnosticBuilder {
            target: self,
            entry: DiagnosticMessage::with_default_message(kind, range),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Number of entries at `severity`.
    pub fn count(&self, severity: Severity) -> usize {
        self.entries
            .iter()
            .filter(|d| d.severity() == severity)
            .count()
    }

    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    pub fn has_warnings(&self) -> bool {
        self.warning_count() > 0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DiagnosticMessage> {
        self.entries.iter()
    }

    pub fn as_slice(&self) -> &[DiagnosticMessage] {
        &self.entries
    }

    /// Move every range from analyzed-text into enclosing-source coordinates.
    pub fn remapped(mut self, origin: LiteralOrigin) -> Self {
        for entry in &mut self.entries {
            entry.range = origin.remap(entry.range);
        }
        self
    }
}

impl Extend<DiagnosticMessage> for Diagnostics {
    fn extend<I: IntoIterator<Item = DiagnosticMessage>>(&mut self, iter: I) {
        self.entries.extend(iter);
    }
}

impl IntoIterator for Diagnostics {
    type Item = DiagnosticMessage;
    type IntoIter = std::vec::IntoIter<DiagnosticMessage>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a DiagnosticMessage;
    type IntoIter = std::slice::Iter<'a, DiagnosticMessage>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl DiagnosticBuilder<'_> {
    /// Detail filled into the kind's message template.
    pub fn message(mut self, detail: impl AsRef<str>) -> Self {
        self.entry.message = self.entry.kind.message(Some(detail.as_ref()));
        self
    }

    pub fn severity(mut self, severity: Severity) -> Self {
        self.entry.severity = severity;
        self
    }

    pub fn hint(mut self, hint: impl Into<String>) -> Self {
        self.entry.hints.push(hint.into());
        self
    }

    pub fn emit(self) {
        self.target.entries.push(self.entry);
    }
}
