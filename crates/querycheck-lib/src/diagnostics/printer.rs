//! Rendering diagnostics, either as plain lines or as annotated snippets of
//! the enclosing source.

use std::fmt::Write;
use std::ops::Range;

use annotate_snippets::{AnnotationKind, Group, Level, Renderer, Snippet};
use rowan::TextRange;

use super::Diagnostics;
use super::message::{DiagnosticMessage, Severity};

pub struct DiagnosticsPrinter<'d, 's> {
    diagnostics: &'d Diagnostics,
    source: Option<&'s str>,
    path: Option<&'s str>,
    colored: bool,
}

impl<'d, 's> DiagnosticsPrinter<'d, 's> {
    pub fn new(diagnostics: &'d Diagnostics) -> Self {
        Self {
            diagnostics,
            source: None,
            path: None,
            colored: false,
        }
    }

    /// Enclosing source the (remapped) ranges point into.
    ///
    /// Without a source every diagnostic renders as one plain line.
    pub fn source(mut self, source: &'s str) -> Self {
        self.source = Some(source);
        self
    }

    pub fn path(mut self, path: &'s str) -> Self {
        self.path = Some(path);
        self
    }

    pub fn colored(mut self, value: bool) -> Self {
        self.colored = value;
        self
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    pub fn format(&self, w: &mut impl Write) -> std::fmt::Result {
        let renderer = match self.colored {
            true => Renderer::styled(),
            false => Renderer::plain(),
        };

        for (i, diag) in self.diagnostics.iter().enumerate() {
            if i > 0 {
                w.write_char('\n')?;
            }
            match self.source {
                Some(source) => {
                    let group = self.group(source, diag);
                    write!(w, "{}", renderer.render(&[group]))?;
                }
                None => write!(w, "{diag}")?,
            }
        }
        Ok(())
    }

    fn group<'a>(&self, source: &'a str, diag: &'a DiagnosticMessage) -> Group<'a>
    where
        's: 'a,
    {
        let mut snippet = Snippet::source(source).line_start(1).annotation(
            AnnotationKind::Primary
                .span(underline(diag.range(), source.len()))
                .label(diag.message()),
        );
        if let Some(path) = self.path {
            snippet = snippet.path(path);
        }

        let group = level(diag.severity())
            .primary_title(diag.message())
            .element(snippet);
        diag.hints().iter().fold(group, |group, hint| {
            group.element(Level::HELP.message(hint.as_str()))
        })
    }
}

fn level(severity: Severity) -> Level<'static> {
    match severity {
        Severity::Error => Level::ERROR,
        Severity::Warning => Level::WARNING,
    }
}

/// Byte range to underline, clamped to the source.
///
/// Empty ranges (clamped prefix positions) still underline one character.
fn underline(range: TextRange, len: usize) -> Range<usize> {
    let start = usize::from(range.start()).min(len);
    let end = usize::from(range.end()).min(len);
    if start < end {
        start..end
    } else {
        start..(start + 1).min(len)
    }
}

impl Diagnostics {
    pub fn printer(&self) -> DiagnosticsPrinter<'_, '_> {
        DiagnosticsPrinter::new(self)
    }
}
