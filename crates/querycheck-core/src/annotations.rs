//! Annotation and attribute names understood by metadata resolution.

pub const ENTITY: &str = "Entity";
pub const MAPPED_SUPERCLASS: &str = "MappedSuperclass";
pub const EMBEDDABLE: &str = "Embeddable";
pub const EMBEDDED: &str = "Embedded";
pub const EMBEDDED_ID: &str = "EmbeddedId";
pub const ID: &str = "Id";
pub const TRANSIENT: &str = "Transient";
pub const ACCESS: &str = "Access";

pub const MANY_TO_ONE: &str = "ManyToOne";
pub const ONE_TO_ONE: &str = "OneToOne";
pub const ONE_TO_MANY: &str = "OneToMany";
pub const MANY_TO_MANY: &str = "ManyToMany";
pub const ELEMENT_COLLECTION: &str = "ElementCollection";

/// Attribute names.
pub mod attr {
    pub const NAME: &str = "name";
    pub const VALUE: &str = "value";
    pub const TARGET_ENTITY: &str = "targetEntity";
    pub const TARGET_CLASS: &str = "targetClass";
}

/// `Access` annotation values.
pub mod access {
    pub const FIELD: &str = "FIELD";
    pub const PROPERTY: &str = "PROPERTY";
}
