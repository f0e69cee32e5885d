use rowan::TextRange;

use super::*;
use crate::remap::LiteralOrigin;

fn range(start: u32, end: u32) -> TextRange {
    TextRange::new(start.into(), end.into())
}

#[test]
fn severity_display() {
    insta::assert_snapshot!(format!("{}", Severity::Error), @"error");
    insta::assert_snapshot!(format!("{}", Severity::Warning), @"warning");
}

#[test]
fn report_with_default_message() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnknownEntity, range(0, 5))
        .emit();

    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics.has_errors());
    assert!(!diagnostics.has_warnings());
    insta::assert_snapshot!(diagnostics.printer().render(), @"error at 0..5: unknown entity");
}

#[test]
fn report_with_custom_message() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::MissingParameter, range(0, 4))
        .message("name")
        .emit();

    assert_eq!(diagnostics.warning_count(), 1);
    insta::assert_snapshot!(
        diagnostics.printer().render(),
        @"warning at 0..4: Missing required parameter for name"
    );
}

#[test]
fn severity_override() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::QuerySemantic, range(2, 3))
        .message("unexpected token")
        .severity(Severity::Warning)
        .emit();

    assert_eq!(diagnostics.error_count(), 0);
    assert_eq!(diagnostics.warning_count(), 1);
}

#[test]
fn hints_render_in_plain_output() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnknownEntity, range(5, 8))
        .message("Foo")
        .hint("did you mean `Person`?")
        .emit();

    insta::assert_snapshot!(
        diagnostics.printer().render(),
        @"error at 5..8: `Foo` is not a mapped entity (hint: did you mean `Person`?)"
    );
}

#[test]
fn multiple_diagnostics_are_line_separated() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnusedParameters, range(0, 1))
        .message("Parameter :a does not occur in the query")
        .emit();
    diagnostics
        .report(DiagnosticKind::UnknownCollection, range(1, 2))
        .message("Person.tags")
        .emit();

    insta::assert_snapshot!(diagnostics.printer().render(), @r"
    warning at 0..1: Parameter :a does not occur in the query
    error at 1..2: `Person.tags` is not a mapped collection role
    ");
}

#[test]
fn remapped_moves_into_source_coordinates() {
    let mut diagnostics = Diagnostics::new();
    diagnostics.report(DiagnosticKind::QuerySyntax, range(0, 2)).emit();
    diagnostics.report(DiagnosticKind::QuerySyntax, range(20, 24)).emit();

    // Filter starts at 18 of the expansion, literal opens at 40
    let shifted = diagnostics.remapped(LiteralOrigin::new(40, 18));
    let ranges: Vec<_> = shifted.iter().map(|d| d.range()).collect();
    assert_eq!(ranges, vec![range(41, 41), range(43, 47)]);
}

#[test]
fn extend_keeps_order() {
    let mut first = Diagnostics::new();
    first.report(DiagnosticKind::UnknownEntity, range(0, 1)).emit();
    let mut second = Diagnostics::new();
    second.report(DiagnosticKind::UnusedParameters, range(2, 3)).emit();

    first.extend(second);
    let kinds: Vec<_> = first.iter().map(|d| d.kind()).collect();
    assert_eq!(
        kinds,
        vec![DiagnosticKind::UnknownEntity, DiagnosticKind::UnusedParameters]
    );
    assert_eq!(first.count(Severity::Warning), 1);
}

#[test]
fn render_against_source() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnknownEntity, range(5, 8))
        .message("Foo")
        .emit();

    let rendered = diagnostics.printer().source("FROM Foo").render();
    assert!(rendered.starts_with("error: `Foo` is not a mapped entity"));
    assert!(rendered.contains("1 | FROM Foo"));
    assert!(rendered.contains("^^^"));
}

#[test]
fn render_with_path_and_hint() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnknownEntity, range(5, 8))
        .message("Foo")
        .hint("did you mean `Person`?")
        .emit();

    let rendered = diagnostics
        .printer()
        .source("FROM Foo")
        .path("Repo.java")
        .render();
    assert!(rendered.contains("Repo.java"));
    assert!(rendered.contains("did you mean `Person`?"));
}

#[test]
fn render_empty_is_empty() {
    let diagnostics = Diagnostics::new();
    assert_eq!(diagnostics.printer().source("FROM Person").render(), "");
}

#[test]
fn aborting_kinds() {
    assert!(DiagnosticKind::MissingParameter.aborts_expansion());
    assert!(DiagnosticKind::TooManyParameters.aborts_expansion());
    assert!(!DiagnosticKind::UnusedParameters.aborts_expansion());
}
