//! Shorthand expansion.
//!
//! Each verb expands through a fixed text template. The expansion records
//! where the original filter fragment starts inside the produced text, so
//! diagnostics against the text can be mapped back into the literal.

use rowan::{TextRange, TextSize};

use super::sort::SortChain;
use super::verb::Verb;
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::params::{ParameterBindings, Placeholder};

const COUNT_PREFIX: &str = "SELECT COUNT(*) ";

/// A shorthand call as found at a call site.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShorthandCall {
    pub verb: Verb,
    pub entity: String,
    /// Raw filter fragment, if any.
    pub filter: Option<String>,
    pub bindings: ParameterBindings,
    pub sort: SortChain,
}

impl ShorthandCall {
    pub fn new(verb: Verb, entity: impl Into<String>) -> Self {
        Self {
            verb,
            entity: entity.into(),
            filter: None,
            bindings: ParameterBindings::default(),
            sort: SortChain::default(),
        }
    }

    pub fn filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    pub fn bindings(mut self, bindings: ParameterBindings) -> Self {
        self.bindings = bindings;
        self
    }

    pub fn sort(mut self, sort: SortChain) -> Self {
        self.sort = sort;
        self
    }
}

/// Full query text plus the position of the original filter within it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Expansion {
    pub text: String,
    /// Characters preceding the first character of the original filter.
    pub offset: u32,
}

impl Expansion {
    fn new(text: String, offset: usize) -> Self {
        Self {
            text,
            offset: u32::try_from(offset).unwrap_or(u32::MAX),
        }
    }
}

/// Expand `call` into full query text.
///
/// Returns `None` when there is nothing sensible to produce: update and
/// delete verbs, named-query references (`#...`), a single-identifier
/// filter without exactly one binding, or a sort chain on a filter that
/// already orders. The last two also report a warning against the filter.
pub fn expand(call: &ShorthandCall, diagnostics: &mut Diagnostics) -> Option<Expansion> {
    if !call.verb.is_supported() {
        tracing::debug!(verb = %call.verb, "verb is never expanded");
        return None;
    }

    let filter = call.filter.as_deref().filter(|f| !f.trim().is_empty());
    if filter.is_some_and(|f| f.trim_start().starts_with('#')) {
        tracing::debug!(entity = %call.entity, "named query reference, not expanded");
        return None;
    }

    let count_prefix = if call.verb.is_count() { COUNT_PREFIX } else { "" };
    let from = format!("{count_prefix}FROM {}", call.entity);

    let mut expansion = match filter {
        None => {
            let offset = from.len() + 1;
            Expansion::new(from, offset)
        }
        Some(f) if starts_with_keyword(f, "from ") || starts_with_keyword(f, "select ") => {
            Expansion::new(f.to_owned(), 0)
        }
        Some(f) if starts_with_keyword(f, "order by ") => {
            let offset = from.len() + 1;
            Expansion::new(format!("{from} {f}"), offset)
        }
        Some(f) if is_single_identifier(f) => {
            let Some(binding) = call.bindings.single() else {
                let kind = if call.bindings.is_empty() {
                    DiagnosticKind::MissingParameter
                } else {
                    DiagnosticKind::TooManyParameters
                };
                diagnostics.report(kind, filter_range(f)).message(f).emit();
                return None;
            };
            // Positional varargs are always bound as the first label
            let binding = match binding {
                Placeholder::Positional(_) => Placeholder::Positional(1),
                named => named,
            };
            let prefix = format!("{from} WHERE ");
            let offset = prefix.len();
            Expansion::new(format!("{prefix}{f} = {binding}"), offset)
        }
        Some(f) => {
            let prefix = format!("{from} WHERE ");
            let offset = prefix.len();
            Expansion::new(format!("{prefix}{f}"), offset)
        }
    };

    if let Some(order_by) = call.sort.order_by_clause() {
        if has_order_by(&expansion.text) {
            let range = filter.map_or_else(TextRange::default, filter_range);
            diagnostics
                .report(DiagnosticKind::SortAlreadySpecified, range)
                .emit();
            return None;
        }
        expansion.text.push(' ');
        expansion.text.push_str(&order_by);
    }

    tracing::debug!(
        verb = %call.verb,
        entity = %call.entity,
        text = %expansion.text,
        offset = expansion.offset,
        "expanded shorthand"
    );
    Some(expansion)
}

fn starts_with_keyword(filter: &str, keyword: &str) -> bool {
    filter
        .get(..keyword.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(keyword))
}

/// Whether `text` orders its results, ignoring `'...'` string literals.
fn has_order_by(text: &str) -> bool {
    // Even segments lie outside quotes, `''` escapes included
    text.split('\'').step_by(2).any(|outside| {
        let words: Vec<&str> = outside
            .split(|c: char| !(c.is_ascii_alphanumeric() || c == '_' || c == '.'))
            .filter(|w| !w.is_empty())
            .collect();
        words.windows(2).any(|pair| {
            pair[0].eq_ignore_ascii_case("order") && pair[1].eq_ignore_ascii_case("by")
        })
    })
}

/// A bare property name meant to be compared against the only binding.
fn is_single_identifier(filter: &str) -> bool {
    !filter.contains(' ') && !filter.contains('=')
}

fn filter_range(filter: &str) -> TextRange {
    TextRange::up_to(TextSize::of(filter))
}
