//! Checking facade: expansion, analysis, binding checks and remapping for
//! one call site at a time.

use querycheck_core::TypeIntrospection;
use rowan::{TextRange, TextSize};

use crate::Result;
use crate::analyzer::SemanticAnalyzer;
use crate::config::CheckConfig;
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::metadata::MetadataGraph;
use crate::params::{ParameterBindings, check_bindings};
use crate::remap::LiteralOrigin;
use crate::shorthand::{ShorthandCall, SortChain, Verb, expand};

/// A query literal and the call context around it, as found by a host.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Deserialize)]
pub struct CallSite {
    /// Literal contents without delimiters: a full query, or a shorthand filter.
    #[serde(default)]
    pub literal: Option<String>,
    /// Offset of the literal's opening delimiter in the enclosing source.
    #[serde(default)]
    pub literal_start: u32,
    /// Shorthand verb, when the literal is a filter for one.
    #[serde(default)]
    pub verb: Option<String>,
    /// Shorthand target entity.
    #[serde(default)]
    pub entity: Option<String>,
    #[serde(default)]
    pub bindings: ParameterBindings,
    #[serde(default)]
    pub sort: SortChain,
}

impl CallSite {
    /// A plain query literal.
    pub fn query(literal: impl Into<String>, literal_start: u32) -> Self {
        Self {
            literal: Some(literal.into()),
            literal_start,
            ..Self::default()
        }
    }

    /// A shorthand call; `filter` is the literal, if any.
    pub fn shorthand(verb: &str, entity: impl Into<String>, filter: Option<&str>) -> Self {
        Self {
            literal: filter.map(str::to_owned),
            verb: Some(verb.to_owned()),
            entity: Some(entity.into()),
            ..Self::default()
        }
    }

    pub fn at(mut self, literal_start: u32) -> Self {
        self.literal_start = literal_start;
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

    /// Parse a JSON array of call sites.
    pub fn from_json_list(json: &str) -> Result<Vec<CallSite>> {
        Ok(serde_json::from_str(json)?)
    }

    /// The shorthand call this site makes, if it names a verb and entity.
    pub fn shorthand_call(&self) -> Result<Option<ShorthandCall>> {
        let (Some(verb), Some(entity)) = (&self.verb, &self.entity) else {
            return Ok(None);
        };
        let verb: Verb = verb.parse()?;
        let mut call = ShorthandCall::new(verb, entity.as_str())
            .bindings(self.bindings.clone())
            .sort(self.sort.clone());
        call.filter = self.literal.clone();
        Ok(Some(call))
    }

    fn literal_range(&self) -> TextRange {
        let len = self.literal.as_deref().map_or(TextSize::from(0), TextSize::of);
        TextRange::up_to(len)
    }
}

/// Runs call sites through expansion, the analyzer and the binding checker.
///
/// Owns the metadata graph of one run.
pub struct QueryChecker<'t, T: TypeIntrospection + ?Sized, A: SemanticAnalyzer> {
    graph: MetadataGraph<'t, T>,
    analyzer: A,
    config: CheckConfig,
}

impl<'t, T: TypeIntrospection + ?Sized, A: SemanticAnalyzer> QueryChecker<'t, T, A> {
    pub fn new(types: &'t T, analyzer: A, config: CheckConfig) -> Self {
        let graph = MetadataGraph::new(types).with_subtype_fallback(config.fallback_to_subtypes);
        Self {
            graph,
            analyzer,
            config,
        }
    }

    pub fn config(&self) -> &CheckConfig {
        &self.config
    }

    pub fn graph(&self) -> &MetadataGraph<'t, T> {
        &self.graph
    }

    pub fn graph_mut(&mut self) -> &mut MetadataGraph<'t, T> {
        &mut self.graph
    }

    pub fn analyzer(&self) -> &A {
        &self.analyzer
    }

    /// Check one call site. Diagnostics come back in enclosing-source
    /// coordinates.
    pub fn check(&mut self, site: &CallSite) -> Diagnostics {
        let mut early = Diagnostics::new();
        let Some((text, offset)) = self.final_text(site, &mut early) else {
            return early.remapped(LiteralOrigin::new(site.literal_start, 0));
        };

        let mut diagnostics = Diagnostics::new();
        self.analyzer.analyze(&text, &mut self.graph, &mut diagnostics);

        if self.config.check_bindings {
            let mut bindings = site.bindings.clone();
            check_bindings(&text, &mut bindings, &mut diagnostics);
        }

        tracing::debug!(
            literal_start = site.literal_start,
            offset,
            errors = diagnostics.error_count(),
            warnings = diagnostics.warning_count(),
            "checked call site"
        );

        let mut out = early.remapped(LiteralOrigin::new(site.literal_start, 0));
        out.extend(diagnostics.remapped(LiteralOrigin::new(site.literal_start, offset)));
        out
    }

    /// Check several call sites of one source, in order.
    pub fn check_all<'s>(&mut self, sites: impl IntoIterator<Item = &'s CallSite>) -> Diagnostics {
        let mut out = Diagnostics::new();
        for site in sites {
            out.extend(self.check(site));
        }
        out
    }

    /// Text to analyze plus the expansion offset, or `None` to skip the site.
    fn final_text(&mut self, site: &CallSite, early: &mut Diagnostics) -> Option<(String, u32)> {
        let call = match site.shorthand_call() {
            Ok(Some(call)) => call,
            Ok(None) => return site.literal.clone().map(|text| (text, 0)),
            Err(err) => {
                tracing::debug!(%err, "not a shorthand call, skipped");
                return None;
            }
        };

        if self.config.report_unknown_entity && self.graph.resolve_entity(&call.entity).is_none() {
            early
                .report(DiagnosticKind::UnknownEntity, site.literal_range())
                .message(&call.entity)
                .emit();
            return None;
        }

        let expansion = expand(&call, early)?;
        Some((expansion.text, expansion.offset))
    }
}
