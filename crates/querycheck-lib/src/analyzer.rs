//! Contracts shared with the external query analyzer.
//!
//! The analyzer parses and type-checks query text on its own. It asks
//! `MetadataLookup` for entity and path types and reports through a
//! `DiagnosticSink`, with spans against the text it was handed.

use querycheck_core::TypeIntrospection;
use rowan::TextRange;

use crate::diagnostics::{DiagnosticKind, Diagnostics, Severity};
use crate::metadata::{CollectionMetadata, EntityMetadata, MetadataGraph, PropertyType};

/// Property-type lookup keyed by entity name or collection role.
///
/// Every method answers `None` for anything unresolved; deciding whether
/// that is an error is up to the analyzer.
pub trait MetadataLookup {
    fn entity(&mut self, name: &str) -> Option<&EntityMetadata>;

    /// Type of a dotted `path` rooted at the named entity.
    fn property_type(&mut self, entity: &str, path: &str) -> Option<PropertyType>;

    /// Collection by role, `<entity>.<path>`.
    fn collection(&mut self, role: &str) -> Option<CollectionMetadata>;

    /// Type of a dotted `path` within the elements of a collection.
    fn collection_element_type(&mut self, role: &str, path: &str) -> Option<PropertyType>;

    fn entity_names(&self) -> Vec<String>;
}

impl<T: TypeIntrospection + ?Sized> MetadataLookup for MetadataGraph<'_, T> {
    fn entity(&mut self, name: &str) -> Option<&EntityMetadata> {
        self.entity_by_name(name)
    }

    fn property_type(&mut self, entity: &str, path: &str) -> Option<PropertyType> {
        let id = self.resolve_entity(entity)?;
        MetadataGraph::property_type(self, id, path)
    }

    fn collection(&mut self, role: &str) -> Option<CollectionMetadata> {
        self.resolve_collection(role)
    }

    fn collection_element_type(&mut self, role: &str, path: &str) -> Option<PropertyType> {
        MetadataGraph::collection_element_type(self, role, path)
    }

    fn entity_names(&self) -> Vec<String> {
        MetadataGraph::entity_names(self)
    }
}

/// Receives analyzer findings.
pub trait DiagnosticSink {
    fn accept(&mut self, range: TextRange, message: &str, severity: Severity);

    fn error(&mut self, range: TextRange, message: &str) {
        self.accept(range, message, Severity::Error);
    }

    fn warning(&mut self, range: TextRange, message: &str) {
        self.accept(range, message, Severity::Warning);
    }
}

impl DiagnosticSink for Diagnostics {
    fn accept(&mut self, range: TextRange, message: &str, severity: Severity) {
        self.report(DiagnosticKind::QuerySemantic, range)
            .message(message)
            .severity(severity)
            .emit();
    }
}

/// The query-language analyzer, supplied by the host.
pub trait SemanticAnalyzer {
    fn analyze(
        &mut self,
        query: &str,
        lookup: &mut dyn MetadataLookup,
        sink: &mut dyn DiagnosticSink,
    );
}
