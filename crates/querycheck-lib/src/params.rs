//! Parameter binding consistency.
//!
//! Cross-references the parameters a call site binds with the placeholders
//! the final query text references: `:name` and `?N`.

use std::fmt;

use indexmap::IndexSet;
use rowan::{TextRange, TextSize};

use crate::diagnostics::{DiagnosticKind, Diagnostics};

/// Parameters bound at a call site.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(default)]
pub struct ParameterBindings {
    /// Bound through a named-parameter builder chain.
    pub named: IndexSet<String>,
    /// Positional labels, usually `1..=n` for `n` varargs.
    pub positional: IndexSet<u32>,
}

impl ParameterBindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// `count` positional varargs, labelled `1..=count`.
    pub fn positional(count: u32) -> Self {
        Self {
            named: IndexSet::new(),
            positional: (1..=count).collect(),
        }
    }

    pub fn named<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            named: names.into_iter().map(Into::into).collect(),
            positional: IndexSet::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.named.len() + self.positional.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, placeholder: &Placeholder<'_>) -> bool {
        match placeholder {
            Placeholder::Named(name) => self.named.contains(*name),
            Placeholder::Positional(label) => self.positional.contains(label),
        }
    }

    pub fn clear(&mut self) {
        self.named.clear();
        self.positional.clear();
    }

    /// The only binding, when exactly one is declared.
    pub fn single(&self) -> Option<Placeholder<'_>> {
        if self.len() != 1 {
            return None;
        }
        self.named
            .first()
            .map(|name| Placeholder::Named(name))
            .or_else(|| self.positional.first().map(|&l| Placeholder::Positional(l)))
    }

    /// Named first, then positional, each in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = Placeholder<'_>> {
        self.named
            .iter()
            .map(|name| Placeholder::Named(name))
            .chain(self.positional.iter().map(|&l| Placeholder::Positional(l)))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Placeholder<'q> {
    Named(&'q str),
    Positional(u32),
}

impl fmt::Display for Placeholder<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Placeholder::Named(name) => write!(f, ":{name}"),
            Placeholder::Positional(label) => write!(f, "?{label}"),
        }
    }
}

/// Every placeholder in `query`, in order of occurrence.
///
/// String literals are skipped, as are `::` casts and bare `?`. Positional
/// labels too large for `u32` saturate to `u32::MAX`.
pub fn scan_placeholders(query: &str) -> Vec<(Placeholder<'_>, TextRange)> {
    let bytes = query.as_bytes();
    let mut found = Vec::new();
    let mut in_string = false;
    let mut pos = 0;

    while pos < bytes.len() {
        let byte = bytes[pos];
        if in_string {
            in_string = byte != b'\'';
            pos += 1;
            continue;
        }
        match byte {
            b'\'' => {
                in_string = true;
                pos += 1;
            }
            b':' if bytes.get(pos + 1) == Some(&b':') => pos += 2,
            b':' => {
                let end = scan_while(bytes, pos + 1, |b| b.is_ascii_alphanumeric() || b == b'_');
                let starts_ident = bytes
                    .get(pos + 1)
                    .is_some_and(|b| b.is_ascii_alphabetic() || *b == b'_');
                if starts_ident {
                    found.push((Placeholder::Named(&query[pos + 1..end]), range(pos, end)));
                }
                pos = end.max(pos + 1);
            }
            b'?' => {
                let end = scan_while(bytes, pos + 1, |b| b.is_ascii_digit());
                if end > pos + 1 {
                    // Labels past u32::MAX saturate so they still count as unbound
                    let label = query[pos + 1..end].parse::<u32>().unwrap_or(u32::MAX);
                    found.push((Placeholder::Positional(label), range(pos, end)));
                }
                pos = end.max(pos + 1);
            }
            _ => pos += 1,
        }
    }
    found
}

fn scan_while(bytes: &[u8], start: usize, pred: impl Fn(u8) -> bool) -> usize {
    let mut end = start;
    while end < bytes.len() && pred(bytes[end]) {
        end += 1;
    }
    end
}

fn range(start: usize, end: usize) -> TextRange {
    TextRange::new(size(start), size(end))
}

fn size(pos: usize) -> TextSize {
    TextSize::from(u32::try_from(pos).unwrap_or(u32::MAX))
}

/// Check `query` against the declared bindings, then clear them.
///
/// Reports at most two warnings: one listing unbound placeholders (at the
/// first of them), one listing bindings the query never references (over
/// the whole text).
pub fn check_bindings(query: &str, bindings: &mut ParameterBindings, diagnostics: &mut Diagnostics) {
    let placeholders = scan_placeholders(query);

    let mut unbound: IndexSet<Placeholder<'_>> = IndexSet::new();
    let mut first_unbound = None;
    for (placeholder, range) in &placeholders {
        if !bindings.contains(placeholder) && unbound.insert(*placeholder) {
            first_unbound.get_or_insert(*range);
        }
    }
    if let Some(range) = first_unbound {
        let listed = join(unbound.iter());
        let message = if unbound.len() == 1 {
            format!("Missing value for parameter {listed}")
        } else {
            format!("Missing values for parameters {listed}")
        };
        diagnostics
            .report(DiagnosticKind::UnboundParameters, range)
            .message(message)
            .emit();
    }

    let referenced: IndexSet<Placeholder<'_>> = placeholders.iter().map(|(p, _)| *p).collect();
    let unused: Vec<Placeholder<'_>> = bindings
        .iter()
        .filter(|declared| !referenced.contains(declared))
        .collect();
    if !unused.is_empty() {
        let listed = join(unused.iter());
        let message = if unused.len() == 1 {
            format!("Parameter {listed} does not occur in the query")
        } else {
            format!("Parameters {listed} do not occur in the query")
        };
        diagnostics
            .report(DiagnosticKind::UnusedParameters, range(0, query.len()))
            .message(message)
            .emit();
    }

    tracing::trace!(
        placeholders = placeholders.len(),
        unbound = unbound.len(),
        unused = unused.len(),
        "checked bindings"
    );
    bindings.clear();
}

fn join<'a, 'q: 'a>(items: impl Iterator<Item = &'a Placeholder<'q>>) -> String {
    items.map(ToString::to_string).collect::<Vec<_>>().join(", ")
}
