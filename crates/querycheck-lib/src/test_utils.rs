use indoc::indoc;
use querycheck_core::DynamicTypeModel;

/// A small mapped domain covering every property kind.
pub const DOMAIN_JSON: &str = indoc! {r#"
    [
        {
            "name": "com.example.Auditable",
            "annotations": [{"name": "MappedSuperclass"}],
            "members": [
                {"name": "id", "type": "long", "annotations": [{"name": "Id"}]},
                {"name": "createdAt", "type": "java.time.Instant"}
            ]
        },
        {
            "name": "com.example.Helper",
            "superclass": "com.example.Auditable",
            "members": [
                {"name": "scratch", "type": "String"}
            ]
        },
        {
            "name": "com.example.Person",
            "superclass": "com.example.Helper",
            "annotations": [{"name": "Entity"}],
            "members": [
                {"name": "name", "type": "String"},
                {"name": "age", "type": "int"},
                {"name": "cache", "type": "String", "transient": true},
                {"name": "INSTANCES", "type": "int", "static": true},
                {"name": "nickname", "type": "String", "annotations": [{"name": "Transient"}]},
                {"name": "address", "type": "com.example.Address", "annotations": [{"name": "Embedded"}]},
                {"name": "phones", "type": "java.util.List", "arguments": ["String"],
                    "annotations": [{"name": "ElementCollection"}]},
                {"name": "homes", "type": "java.util.Set", "arguments": ["com.example.Address"],
                    "annotations": [{"name": "ElementCollection"}]},
                {"name": "orders", "type": "java.util.List", "arguments": ["com.example.Order"],
                    "annotations": [{"name": "OneToMany"}]},
                {"name": "manager", "type": "com.example.Employee",
                    "annotations": [{"name": "ManyToOne"}]}
            ]
        },
        {
            "name": "com.example.Employee",
            "superclass": "com.example.Person",
            "annotations": [{"name": "Entity"}],
            "members": [
                {"name": "employeeId", "type": "String"},
                {"name": "salary", "type": "java.math.BigDecimal"}
            ]
        },
        {
            "name": "com.example.Contractor",
            "superclass": "com.example.Person",
            "annotations": [{"name": "Entity"}],
            "members": [
                {"name": "employeeId", "type": "int"},
                {"name": "agency", "type": "String"}
            ]
        },
        {
            "name": "com.example.Address",
            "annotations": [{"name": "Embeddable"}],
            "members": [
                {"name": "street", "type": "String"},
                {"name": "city", "type": "String"},
                {"name": "geo", "type": "com.example.Geo"}
            ]
        },
        {
            "name": "com.example.Geo",
            "annotations": [{"name": "Embeddable"}],
            "members": [
                {"name": "lat", "type": "double"},
                {"name": "lon", "type": "double"}
            ]
        },
        {
            "name": "com.example.Order",
            "annotations": [{"name": "Entity", "attributes": {"name": "PurchaseOrder"}}],
            "members": [
                {"name": "getId", "kind": "method", "type": "long", "annotations": [{"name": "Id"}]},
                {"name": "getTotal", "kind": "method", "type": "java.math.BigDecimal"},
                {"name": "isPaid", "kind": "method", "type": "boolean"},
                {"name": "isOpen", "kind": "method", "type": "String"},
                {"name": "getLabel", "kind": "method", "type": "String", "parameters": 1},
                {"name": "reset", "kind": "method", "type": "void"},
                {"name": "total", "type": "java.math.BigDecimal"},
                {"name": "getCustomer", "kind": "method", "type": "com.example.Person",
                    "annotations": [{"name": "ManyToOne"}]},
                {"name": "getLines", "kind": "method", "type": "java.util.Map",
                    "arguments": ["String", "com.example.OrderLine"],
                    "annotations": [{"name": "OneToMany"}]}
            ]
        },
        {
            "name": "com.example.OrderLine",
            "annotations": [
                {"name": "Entity"},
                {"name": "Access", "attributes": {"value": "FIELD"}}
            ],
            "members": [
                {"name": "id", "type": "long", "annotations": [{"name": "Id"}]},
                {"name": "quantity", "type": "int"},
                {"name": "product", "type": "Object",
                    "annotations": [{"name": "ManyToOne", "attributes": {"targetEntity": "com.example.Product.class"}}]}
            ]
        },
        {
            "name": "com.example.Product",
            "annotations": [{"name": "Entity"}],
            "members": [
                {"name": "id", "type": "long", "annotations": [{"name": "Id"}]},
                {"name": "sku", "type": "String"},
                {"name": "parent", "type": "com.example.Product",
                    "annotations": [{"name": "ManyToOne"}, {"name": "OneToMany"}]}
            ]
        }
    ]
"#};

pub fn domain() -> DynamicTypeModel {
    DynamicTypeModel::from_json(DOMAIN_JSON).expect("fixture must parse")
}
