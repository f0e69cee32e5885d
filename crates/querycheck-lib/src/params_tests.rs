use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::params::{Placeholder, ParameterBindings, check_bindings, scan_placeholders};

fn messages(diagnostics: &Diagnostics) -> Vec<&str> {
    diagnostics.iter().map(|d| d.message()).collect()
}

#[test]
fn scan_named_and_positional() {
    let found = scan_placeholders("FROM Person WHERE name = :name AND age > ?12");
    let placeholders: Vec<_> = found.iter().map(|(p, _)| *p).collect();
    assert_eq!(
        placeholders,
        vec![Placeholder::Named("name"), Placeholder::Positional(12)]
    );
    assert_eq!(u32::from(found[0].1.start()), 25);
    assert_eq!(u32::from(found[0].1.end()), 30);
    assert_eq!(u32::from(found[1].1.start()), 41);
    assert_eq!(u32::from(found[1].1.end()), 44);
}

#[test]
fn scan_skips_strings_and_casts() {
    let found = scan_placeholders("FROM Person WHERE name = ':fake ?1' AND x = y::text AND z = ? AND w = :real");
    let placeholders: Vec<_> = found.iter().map(|(p, _)| *p).collect();
    assert_eq!(placeholders, vec![Placeholder::Named("real")]);
}

#[test]
fn scan_handles_escaped_quotes() {
    let found = scan_placeholders("WHERE a = 'it''s :no' AND b = :yes");
    let placeholders: Vec<_> = found.iter().map(|(p, _)| *p).collect();
    assert_eq!(placeholders, vec![Placeholder::Named("yes")]);
}

#[test]
fn all_bound() {
    let mut bindings = ParameterBindings::named(["name"]);
    let mut diagnostics = Diagnostics::new();
    check_bindings("FROM Person WHERE name = :name", &mut bindings, &mut diagnostics);
    assert!(diagnostics.is_empty());
    assert!(bindings.is_empty());
}

#[test]
fn single_unused_named() {
    let mut bindings = ParameterBindings::named(["name"]);
    let mut diagnostics = Diagnostics::new();
    check_bindings("FROM Person", &mut bindings, &mut diagnostics);

    assert_eq!(
        messages(&diagnostics),
        vec!["Parameter :name does not occur in the query"]
    );
    let diag = diagnostics.iter().next().unwrap();
    assert_eq!(diag.kind(), DiagnosticKind::UnusedParameters);
    assert!(diag.is_warning());
}

#[test]
fn unbound_placeholders_are_combined() {
    let mut bindings = ParameterBindings::positional(1);
    let mut diagnostics = Diagnostics::new();
    check_bindings(
        "FROM Person WHERE a = :a AND b = ?1 AND c = ?2 AND d = :a",
        &mut bindings,
        &mut diagnostics,
    );

    assert_eq!(
        messages(&diagnostics),
        vec!["Missing values for parameters :a, ?2"]
    );
    let diag = diagnostics.iter().next().unwrap();
    assert_eq!(diag.kind(), DiagnosticKind::UnboundParameters);
    assert_eq!(u32::from(diag.range().start()), 22);
}

#[test]
fn single_unbound() {
    let mut bindings = ParameterBindings::new();
    let mut diagnostics = Diagnostics::new();
    check_bindings("FROM Person WHERE name = ?1", &mut bindings, &mut diagnostics);
    assert_eq!(messages(&diagnostics), vec!["Missing value for parameter ?1"]);
}

#[test]
fn oversized_label_is_still_unbound() {
    let query = "FROM Person WHERE id = ?99999999999";
    let found = scan_placeholders(query);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].0, Placeholder::Positional(u32::MAX));
    assert_eq!(u32::from(found[0].1.start()), 23);
    assert_eq!(u32::from(found[0].1.end()), 35);

    let mut bindings = ParameterBindings::positional(1);
    let mut diagnostics = Diagnostics::new();
    check_bindings(query, &mut bindings, &mut diagnostics);
    assert_eq!(
        messages(&diagnostics),
        vec![
            "Missing value for parameter ?4294967295",
            "Parameter ?1 does not occur in the query",
        ]
    );
}

#[test]
fn unused_lists_named_before_positional() {
    let mut bindings = ParameterBindings::positional(2);
    bindings.named.insert("b".to_owned());
    bindings.named.insert("a".to_owned());
    let mut diagnostics = Diagnostics::new();
    check_bindings("FROM Person WHERE x = ?1", &mut bindings, &mut diagnostics);

    assert_eq!(
        messages(&diagnostics),
        vec!["Parameters :b, :a, ?2 do not occur in the query"]
    );
}

#[test]
fn both_warnings() {
    let mut bindings = ParameterBindings::named(["unused"]);
    let mut diagnostics = Diagnostics::new();
    check_bindings("FROM Person WHERE name = :name", &mut bindings, &mut diagnostics);

    insta::assert_snapshot!(diagnostics.printer().render(), @r"
    warning at 25..30: Missing value for parameter :name
    warning at 0..30: Parameter :unused does not occur in the query
    ");
}

#[test]
fn bindings_are_cleared_between_checks() {
    let mut bindings = ParameterBindings::named(["name"]);
    let mut diagnostics = Diagnostics::new();
    check_bindings("FROM Person WHERE name = :name", &mut bindings, &mut diagnostics);
    check_bindings("FROM Person WHERE name = :name", &mut bindings, &mut diagnostics);

    assert_eq!(
        messages(&diagnostics),
        vec!["Missing value for parameter :name"]
    );
}

#[test]
fn single_binding() {
    assert_eq!(
        ParameterBindings::named(["id"]).single(),
        Some(Placeholder::Named("id"))
    );
    assert_eq!(
        ParameterBindings::positional(1).single(),
        Some(Placeholder::Positional(1))
    );
    assert_eq!(ParameterBindings::positional(2).single(), None);
    assert_eq!(ParameterBindings::new().single(), None);
}
