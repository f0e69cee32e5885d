use querycheck_lib::shorthand::SortChain;

use super::expand::{ExpandArgs, render};
use crate::cli::build_cli;

fn args(entity: &str, verb: &str, filter: Option<&str>) -> ExpandArgs {
    ExpandArgs {
        entity: entity.to_owned(),
        verb: verb.to_owned(),
        filter: filter.map(str::to_owned),
        positional: None,
        named: Vec::new(),
        sort: SortChain::new(),
        color: false,
    }
}

#[test]
fn expands_with_offset() {
    let mut a = args("Person", "find", Some("name"));
    a.positional = Some(1);
    insta::assert_snapshot!(render(&a).unwrap(), @r"
    FROM Person WHERE name = ?1
    offset: 18
    ");
}

#[test]
fn named_binding_and_sort() {
    let mut a = args("Person", "list", Some("name"));
    a.named = vec!["who".to_owned()];
    a.sort = SortChain::by("name").and("age").descending();
    insta::assert_snapshot!(render(&a).unwrap(), @r"
    FROM Person WHERE name = :who ORDER BY name DESC, age DESC
    offset: 18
    ");
}

#[test]
fn unsupported_verb() {
    let a = args("Person", "delete", Some("name = 'x'"));
    assert_eq!(render(&a).unwrap_err(), "`delete` calls are not expanded");

    let a = args("Person", "persist", None);
    assert_eq!(render(&a).unwrap_err(), "unknown shorthand verb `persist`");
}

#[test]
fn missing_parameter_is_rendered() {
    let a = args("Person", "find", Some("name"));
    let err = render(&a).unwrap_err();
    assert!(err.contains("Missing required parameter for name"), "{err}");
    assert!(err.contains("<filter>"), "{err}");
}

#[test]
fn sort_flag_from_command_line() {
    let m = build_cli()
        .try_get_matches_from([
            "querycheck", "expand", "Person", "listAll", "--sort", "name,-age",
        ])
        .unwrap();
    let (_, sub) = m.subcommand().unwrap();
    let params = crate::cli::ExpandParams::from_matches(sub);
    let a: ExpandArgs = params.into();
    insta::assert_snapshot!(render(&a).unwrap(), @r"
    FROM Person ORDER BY name ASC, age DESC
    offset: 12
    ");
}
