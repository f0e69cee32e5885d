use indoc::indoc;

use crate::{
    DynamicTypeModel, Element, Error, MemberKind, Modifiers, StaticAnnotation, StaticMember,
    StaticTypeInfo, StaticTypeModel, TypeId, TypeIntrospection, parse_type_declarations,
};

const SAMPLE_JSON: &str = indoc! {r#"
    [
        {
            "name": "com.example.Base",
            "annotations": [{"name": "MappedSuperclass"}],
            "members": [
                {"name": "id", "type": "long", "annotations": [{"name": "Id"}]}
            ]
        },
        {
            "name": "com.example.Person",
            "superclass": "com.example.Base",
            "annotations": [{"name": "Entity", "attributes": {"name": "Human"}}],
            "members": [
                {"name": "name", "type": "String"},
                {"name": "tags", "type": "java.util.Set", "arguments": ["String"]},
                {"name": "COUNTER", "type": "int", "static": true},
                {"name": "getAge", "kind": "method", "type": "int"},
                {"name": "setAge", "kind": "method", "type": "void", "parameters": 1}
            ]
        },
        {
            "name": "com.example.Employee",
            "superclass": "Person",
            "annotations": [{"name": "Entity"}]
        },
        {
            "name": "com.example.Widget",
            "superclass": "java.lang.Object"
        }
    ]
"#};

#[test]
fn parse_raw_types() {
    let types = parse_type_declarations(SAMPLE_JSON).unwrap();
    assert_eq!(types.len(), 4);

    let person = &types[1];
    assert_eq!(person.superclass.as_deref(), Some("com.example.Base"));
    assert_eq!(person.members.len(), 5);
    assert_eq!(person.annotations[0].attributes["name"], "Human");
    assert!(person.members[2].is_static);
    assert_eq!(person.members[4].parameters, 1);
}

#[test]
fn build_dynamic_model() {
    let model = DynamicTypeModel::from_json(SAMPLE_JSON).unwrap();
    assert_eq!(model.len(), 4);
    assert_eq!(model.all_types(), vec![0, 1, 2, 3]);

    assert_eq!(model.type_name(1), "com.example.Person");
    assert_eq!(model.simple_name(1), "Person");
    assert_eq!(model.superclass(1), Some(0));
    // Superclass given by simple name
    assert_eq!(model.superclass(2), Some(1));
    // Undeclared library superclass is treated as absent
    assert_eq!(model.superclass(3), None);
}

#[test]
fn dynamic_members() {
    let model = DynamicTypeModel::from_json(SAMPLE_JSON).unwrap();
    let members = model.members(1);

    assert_eq!(members.len(), 5);
    assert_eq!(members[0].name, "name");
    assert!(members[0].is_field());
    assert_eq!(members[1].ty.simple_name(), "Set");
    assert_eq!(members[1].ty.arguments, vec!["String"]);
    assert!(members[2].modifiers.is_static);
    assert_eq!(members[3].kind, MemberKind::Method { parameters: 0 });
    assert!(members[4].ty.is_void());
    assert_eq!(members[4].parameter_count(), 1);
}

#[test]
fn dynamic_annotations() {
    let model = DynamicTypeModel::from_json(SAMPLE_JSON).unwrap();

    let entity = model.annotation(Element::Type(1), "Entity").unwrap();
    assert_eq!(entity.attribute("name"), Some("Human"));
    assert_eq!(entity.attribute("missing"), None);
    assert!(model.has_annotation(Element::Type(0), "MappedSuperclass"));
    assert!(!model.has_annotation(Element::Type(3), "Entity"));

    let id_member = model.members(0)[0].id;
    assert!(model.has_annotation(Element::Member(id_member), "Id"));
}

#[test]
fn dynamic_resolve_type() {
    let model = DynamicTypeModel::from_json(SAMPLE_JSON).unwrap();
    assert_eq!(model.resolve_type("com.example.Person"), Some(1));
    assert_eq!(model.resolve_type("Employee"), Some(2));
    assert_eq!(model.resolve_type("Nope"), None);
}

#[test]
fn subtype_relation() {
    let model = DynamicTypeModel::from_json(SAMPLE_JSON).unwrap();
    assert!(model.is_subtype(2, 0));
    assert!(model.is_subtype(2, 1));
    assert!(model.is_subtype(1, 1));
    assert!(!model.is_subtype(0, 1));
    assert!(!model.is_subtype(3, 0));
}

#[test]
fn duplicate_type_is_rejected() {
    let json = r#"[{"name": "a.A"}, {"name": "a.A"}]"#;
    let err = DynamicTypeModel::from_json(json).unwrap_err();
    assert!(matches!(err, Error::DuplicateType(ref name) if name == "a.A"));
    assert_eq!(err.to_string(), "type `a.A` is declared more than once");
}

#[test]
fn malformed_json_is_rejected() {
    let err = DynamicTypeModel::from_json("[{").unwrap_err();
    assert!(matches!(err, Error::Json(_)));
}

// Static tests using manually constructed data
static ENTITY_ANN: [StaticAnnotation; 1] = [StaticAnnotation {
    name: "Entity",
    attributes: &[],
}];

static ID_ANN: [StaticAnnotation; 1] = [StaticAnnotation {
    name: "Id",
    attributes: &[],
}];

static PERSON_MEMBERS: [StaticMember; 2] = [
    StaticMember {
        name: "id",
        kind: MemberKind::Field,
        type_name: "long",
        arguments: &[],
        modifiers: Modifiers {
            is_static: false,
            is_transient: false,
        },
        annotations: &ID_ANN,
    },
    StaticMember {
        name: "nicknames",
        kind: MemberKind::Field,
        type_name: "java.util.List",
        arguments: &["String"],
        modifiers: Modifiers {
            is_static: false,
            is_transient: true,
        },
        annotations: &[],
    },
];

static TYPES: [(TypeId, StaticTypeInfo); 2] = [
    (
        10,
        StaticTypeInfo {
            name: "com.example.Person",
            superclass: None,
            annotations: &ENTITY_ANN,
            members: &PERSON_MEMBERS,
        },
    ),
    (
        20,
        StaticTypeInfo {
            name: "com.example.Employee",
            superclass: Some(10),
            annotations: &ENTITY_ANN,
            members: &[],
        },
    ),
];

#[test]
fn static_model_lookups() {
    let model = StaticTypeModel::new(&TYPES);

    assert_eq!(model.len(), 2);
    assert!(model.contains(10));
    assert!(!model.contains(11));
    assert_eq!(model.all_types(), vec![10, 20]);
    assert_eq!(model.resolve_type("Employee"), Some(20));
    assert_eq!(model.resolve_type("com.example.Person"), Some(10));
    assert!(model.is_subtype(20, 10));
    assert!(!model.is_subtype(10, 20));

    let members = model.members(10);
    assert_eq!(members.len(), 2);
    assert!(members[1].modifiers.is_transient);
    assert_eq!(members[1].ty.arguments, vec!["String"]);
    assert!(model.has_annotation(Element::Member(members[0].id), "Id"));
    assert!(model.has_annotation(Element::Type(20), "Entity"));
}

/// Both backends answer identically through the trait.
#[test]
fn backends_agree_through_trait() {
    fn describe(model: &dyn TypeIntrospection, name: &str) -> (String, Option<String>) {
        let ty = model.resolve_type(name).unwrap();
        let sup = model
            .superclass(ty)
            .map(|s| model.simple_name(s).to_string());
        (model.simple_name(ty).to_string(), sup)
    }

    let dynamic = DynamicTypeModel::from_json(
        r#"[
            {"name": "com.example.Person", "annotations": [{"name": "Entity"}]},
            {"name": "com.example.Employee", "superclass": "com.example.Person"}
        ]"#,
    )
    .unwrap();
    let stat = StaticTypeModel::new(&TYPES);

    assert_eq!(
        describe(&dynamic, "Employee"),
        describe(&stat, "Employee")
    );
}

#[test]
fn cyclic_superclass_is_rejected() {
    let json = r#"[
        {"name": "a.A", "superclass": "a.B"},
        {"name": "a.B", "superclass": "a.A"}
    ]"#;
    let err = DynamicTypeModel::from_json(json).unwrap_err();
    assert!(matches!(err, Error::CyclicSuperclass(_)));
}

static CYCLIC: [(TypeId, StaticTypeInfo); 2] = [
    (
        1,
        StaticTypeInfo {
            name: "a.A",
            superclass: Some(2),
            annotations: &[],
            members: &[],
        },
    ),
    (
        2,
        StaticTypeInfo {
            name: "a.B",
            superclass: Some(1),
            annotations: &[],
            members: &[],
        },
    ),
];

#[test]
fn static_cycle_is_caught_by_validate() {
    assert!(StaticTypeModel::new(&TYPES).validate().is_ok());
    assert!(StaticTypeModel::checked(&TYPES).is_ok());

    let err = StaticTypeModel::checked(&CYCLIC).err().unwrap();
    assert_eq!(err.to_string(), "type `a.A` is its own superclass");
}
