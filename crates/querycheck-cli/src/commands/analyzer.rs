//! A deliberately small analyzer for the demonstration host.
//!
//! Understands `[SELECT ...] FROM <Entity> [alias] [WHERE ...] [ORDER BY ...]`:
//! checks the root entity and every property path it can attribute to it
//! (`alias.path`, or bare identifiers when there is no alias). Joins are
//! not followed.

use querycheck_lib::analyzer::{DiagnosticSink, MetadataLookup, SemanticAnalyzer};
use rowan::{TextRange, TextSize};

const KEYWORDS: &[&str] = &[
    "all", "and", "as", "asc", "between", "by", "count", "desc", "distinct", "else", "end",
    "escape", "exists", "false", "fetch", "from", "group", "having", "in", "is", "join", "left",
    "like", "member", "not", "null", "of", "on", "or", "order", "select", "then", "true", "when",
    "where", "case", "inner", "outer", "empty",
];

#[derive(Clone, Copy, Debug, Default)]
pub struct RootEntityAnalyzer;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Word<'q> {
    text: &'q str,
    start: usize,
    /// Followed by `(`.
    call: bool,
}

impl Word<'_> {
    fn range(&self) -> TextRange {
        let start = to_size(self.start);
        TextRange::at(start, TextSize::of(self.text))
    }

    fn is_keyword(&self) -> bool {
        KEYWORDS.iter().any(|k| k.eq_ignore_ascii_case(self.text))
    }
}

fn to_size(pos: usize) -> TextSize {
    TextSize::from(u32::try_from(pos).unwrap_or(u32::MAX))
}

/// Identifier-like words, skipping string literals, numbers and placeholders.
fn words(query: &str) -> Vec<Word<'_>> {
    let bytes = query.as_bytes();
    let is_word = |b: u8| b.is_ascii_alphanumeric() || b == b'_' || b == b'.';
    let mut out = Vec::new();
    let mut pos = 0;

    while pos < bytes.len() {
        let byte = bytes[pos];
        if byte == b'\'' {
            pos += 1;
            while pos < bytes.len() && bytes[pos] != b'\'' {
                pos += 1;
            }
            pos += 1;
        } else if byte == b':' || byte == b'?' || byte.is_ascii_digit() {
            pos += 1;
            while pos < bytes.len() && is_word(bytes[pos]) {
                pos += 1;
            }
        } else if is_word(byte) {
            let start = pos;
            while pos < bytes.len() && is_word(bytes[pos]) {
                pos += 1;
            }
            let call = query[pos..].trim_start().starts_with('(');
            out.push(Word {
                text: &query[start..pos],
                start,
                call,
            });
        } else {
            pos += 1;
        }
    }
    out
}

impl SemanticAnalyzer for RootEntityAnalyzer {
    fn analyze(
        &mut self,
        query: &str,
        lookup: &mut dyn MetadataLookup,
        sink: &mut dyn DiagnosticSink,
    ) {
        let words = words(query);
        let Some(from) = words.iter().position(|w| w.text.eq_ignore_ascii_case("from")) else {
            sink.error(TextRange::up_to(TextSize::of(query)), "query has no FROM clause");
            return;
        };
        let Some(root) = words.get(from + 1) else {
            sink.error(TextRange::empty(TextSize::of(query)), "expected an entity after FROM");
            return;
        };

        let Some(entity) = lookup.entity(root.text) else {
            sink.error(root.range(), &format!("`{}` is not a mapped entity", root.text));
            return;
        };
        let entity = entity.name().to_owned();

        let alias = words
            .get(from + 2)
            .filter(|w| !w.is_keyword())
            .map(|w| w.text);
        if words.iter().any(|w| w.text.eq_ignore_ascii_case("join")) {
            tracing::debug!(%entity, "joins are not followed, paths left unchecked");
            return;
        }

        let skip = from + 1 + usize::from(alias.is_some());
        for (idx, word) in words.iter().enumerate() {
            if (from..=skip).contains(&idx) || word.is_keyword() || word.call {
                continue;
            }
            let path = match alias {
                Some(alias) if word.text == alias => continue,
                Some(alias) => match word.text.strip_prefix(alias).and_then(|p| p.strip_prefix('.')) {
                    Some(path) => path,
                    None => continue,
                },
                None => word.text,
            };
            if lookup.property_type(&entity, path).is_none() {
                sink.error(word.range(), &format!("{entity} has no mapped {path}"));
            }
        }
    }
}
