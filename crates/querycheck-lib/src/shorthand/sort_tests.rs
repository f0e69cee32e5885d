use super::{Direction, SortCall, SortChain};

fn rendered(chain: &SortChain) -> Option<String> {
    chain.order_by_clause()
}

#[test]
fn defaults_to_ascending() {
    let chain = SortChain::by("name").and("age");
    assert_eq!(rendered(&chain).as_deref(), Some("ORDER BY name ASC, age ASC"));
}

#[test]
fn chain_wide_direction_applies_to_preceding_columns() {
    let chain = SortChain::by("name").and("age").descending();
    assert_eq!(
        rendered(&chain).as_deref(),
        Some("ORDER BY name DESC, age DESC")
    );
}

#[test]
fn explicit_direction_wins() {
    let chain = SortChain::by_direction("name", Direction::Ascending)
        .and("age")
        .descending();
    assert_eq!(
        rendered(&chain).as_deref(),
        Some("ORDER BY name ASC, age DESC")
    );
}

#[test]
fn nearest_following_call_wins() {
    let chain = SortChain::by("a")
        .descending()
        .and("b")
        .ascending()
        .and("c")
        .descending();
    assert_eq!(
        rendered(&chain).as_deref(),
        Some("ORDER BY a DESC, b ASC, c DESC")
    );
}

#[test]
fn empty_chain() {
    assert_eq!(rendered(&SortChain::new()), None);
    assert_eq!(rendered(&SortChain::new().descending()), None);
    assert!(SortChain::new().is_empty());
}

#[test]
fn builder_records_calls() {
    let chain = SortChain::by("a").and("b").ascending();
    assert_eq!(
        chain.calls(),
        &[
            SortCall::By {
                column: "a".to_owned(),
                direction: None
            },
            SortCall::And {
                column: "b".to_owned(),
                direction: None
            },
            SortCall::Ascending,
        ]
    );
}

#[test]
fn deserialize_chain() {
    let chain: SortChain = serde_json::from_str(
        r#"[{"by": {"column": "name"}}, {"and": {"column": "age", "direction": "descending"}}, "ascending"]"#,
    )
    .unwrap();
    assert_eq!(
        rendered(&chain).as_deref(),
        Some("ORDER BY name ASC, age DESC")
    );
}
