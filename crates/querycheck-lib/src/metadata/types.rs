//! Persistence metadata reconstructed from static declarations.
//!
//! Descriptors refer to other entities and components by name only.
//! The graph resolves those names on demand, which keeps mutually
//! referencing entities from requiring each other during construction.

use std::collections::HashMap;

use indexmap::IndexSet;
use querycheck_core::{MemberId, TypeId};

/// Index of an entity within one `MetadataGraph`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub(crate) u32);

impl EntityId {
    pub fn as_u32(self) -> u32 {
        self.0
    }
}

/// How persistent state is read.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AccessType {
    #[default]
    Field,
    /// Through `get`/`is` accessor methods.
    Property,
}

impl std::fmt::Display for AccessType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccessType::Field => write!(f, "field"),
            AccessType::Property => write!(f, "property"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PropertyKind {
    Basic,
    Embedded,
    ToOne,
    ToMany,
    ElementCollection,
}

/// One persistent property of an entity or component.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PropertyDescriptor {
    pub name: String,
    pub kind: PropertyKind,
    /// Basic: declared type name. Embedded: component type name.
    /// ToOne / ToMany: target entity name. ElementCollection: element type name.
    pub target: String,
    /// Declared container type for ToMany / ElementCollection.
    pub container: Option<String>,
    pub member: MemberId,
}

impl PropertyDescriptor {
    pub fn is_collection(&self) -> bool {
        matches!(self.kind, PropertyKind::ToMany | PropertyKind::ElementCollection)
    }
}

#[derive(Clone, Debug)]
pub struct EntityMetadata {
    pub(crate) id: EntityId,
    pub(crate) name: String,
    pub(crate) type_id: TypeId,
    pub(crate) type_name: String,
    pub(crate) access: AccessType,
    pub(crate) properties: Vec<PropertyDescriptor>,
    /// Known strict subtypes, in registration order.
    pub(crate) subtypes: IndexSet<EntityId>,
    /// Exact-entity path resolution cache, misses included.
    pub(crate) property_types: HashMap<String, Option<PropertyType>>,
}

impl EntityMetadata {
    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn access(&self) -> AccessType {
        self.access
    }

    pub fn properties(&self) -> &[PropertyDescriptor] {
        &self.properties
    }

    pub fn property(&self, name: &str) -> Option<&PropertyDescriptor> {
        self.properties.iter().find(|p| p.name == name)
    }

    pub fn subtypes(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.subtypes.iter().copied()
    }
}

/// Embedded value type, flattened over its own superclass chain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComponentMetadata {
    pub type_id: TypeId,
    pub type_name: String,
    pub access: AccessType,
    pub properties: Vec<PropertyDescriptor>,
}

impl ComponentMetadata {
    pub fn property(&self, name: &str) -> Option<&PropertyDescriptor> {
        self.properties.iter().find(|p| p.name == name)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CollectionShape {
    Set,
    List,
    Map,
    Bag,
}

impl CollectionShape {
    /// Infer the shape from a declared container type name.
    pub fn from_container(type_name: &str) -> Self {
        let simple = querycheck_core::utils::simple_name(type_name);
        if simple.ends_with("Map") {
            Self::Map
        } else if simple.ends_with("Set") {
            Self::Set
        } else if simple.ends_with("List") {
            Self::List
        } else {
            Self::Bag
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CollectionElement {
    Entity { entity_name: String },
    Component(ComponentMetadata),
    Basic(BasicType),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CollectionMetadata {
    pub owner: String,
    /// `<entity>.<path>`
    pub role: String,
    pub shape: CollectionShape,
    pub element: CollectionElement,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BasicKind {
    String,
    Integer,
    Decimal,
    Boolean,
    Temporal,
    Binary,
    Other,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BasicType {
    pub name: String,
    pub kind: BasicKind,
}

impl BasicType {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let kind = basic_kind(&name);
        Self { name, kind }
    }
}

fn basic_kind(type_name: &str) -> BasicKind {
    match querycheck_core::utils::simple_name(type_name) {
        "String" | "char" | "Character" | "CharSequence" => BasicKind::String,
        "byte" | "short" | "int" | "long" | "Byte" | "Short" | "Integer" | "Long"
        | "BigInteger" => BasicKind::Integer,
        "float" | "double" | "Float" | "Double" | "BigDecimal" => BasicKind::Decimal,
        "boolean" | "Boolean" => BasicKind::Boolean,
        "Date" | "Calendar" | "Timestamp" | "Time" | "Instant" | "LocalDate" | "LocalTime"
        | "LocalDateTime" | "OffsetDateTime" | "OffsetTime" | "ZonedDateTime" | "Year"
        | "YearMonth" => BasicKind::Temporal,
        "byte[]" | "Byte[]" | "Blob" => BasicKind::Binary,
        _ => BasicKind::Other,
    }
}

/// Type of a property path, as handed to the semantic analyzer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PropertyType {
    Basic(BasicType),
    /// To-one association.
    Entity { entity_name: String },
    ToMany(CollectionMetadata),
    ElementCollection(CollectionMetadata),
    Component(ComponentMetadata),
}

impl PropertyType {
    pub fn as_collection(&self) -> Option<&CollectionMetadata> {
        match self {
            PropertyType::ToMany(c) | PropertyType::ElementCollection(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_component(&self) -> Option<&ComponentMetadata> {
        match self {
            PropertyType::Component(c) => Some(c),
            _ => None,
        }
    }
}

impl std::fmt::Display for PropertyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PropertyType::Basic(b) => write!(f, "{}", b.name),
            PropertyType::Entity { entity_name } => write!(f, "{entity_name}"),
            PropertyType::ToMany(c) | PropertyType::ElementCollection(c) => {
                let element = match &c.element {
                    CollectionElement::Entity { entity_name } => entity_name.as_str(),
                    CollectionElement::Component(comp) => comp.type_name.as_str(),
                    CollectionElement::Basic(b) => b.name.as_str(),
                };
                write!(f, "{:?}<{element}>", c.shape)
            }
            PropertyType::Component(c) => write!(f, "{}", c.type_name),
        }
    }
}
