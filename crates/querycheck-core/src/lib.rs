#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures for querycheck type introspection.
//!
//! Two layers:
//! - **Deserialization layer**: 1:1 mapping to the type declaration JSON
//! - **Introspection layer**: id-indexed structures behind `TypeIntrospection`
//!
//! Two implementations:
//! - **Dynamic** (`DynamicTypeModel`): HashMap-based, built from declarations at runtime
//! - **Static** (`StaticTypeModel`): slice-based, zero runtime init
//!
//! Everything above this crate is written against the trait only and never
//! asks which backend is active.

use std::collections::HashMap;

use indexmap::IndexMap;

pub mod annotations;
mod invariants;
pub mod utils;

#[cfg(test)]
mod lib_tests;

/// Errors raised while loading type declarations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid type declarations: {0}")]
    Json(#[from] serde_json::Error),

    #[error("type `{0}` is declared more than once")]
    DuplicateType(String),

    #[error("type `{0}` is its own superclass")]
    CyclicSuperclass(String),
}

pub type Result<T> = std::result::Result<T, Error>;

// ============================================================================
// Deserialization Layer
// ============================================================================

/// Raw type declaration, as exported by a compiler front end.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct RawType {
    /// Qualified type name (`com.example.Person`).
    pub name: String,
    #[serde(default)]
    pub superclass: Option<String>,
    #[serde(default)]
    pub annotations: Vec<RawAnnotation>,
    #[serde(default)]
    pub members: Vec<RawMember>,
}

/// Annotation-like metadata attached to a type or member.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct RawAnnotation {
    pub name: String,
    #[serde(default)]
    pub attributes: IndexMap<String, String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RawMemberKind {
    #[default]
    Field,
    Method,
}

/// A declared field or method.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct RawMember {
    pub name: String,
    #[serde(default)]
    pub kind: RawMemberKind,
    /// Field type or method return type (`void` for none).
    #[serde(rename = "type")]
    pub type_name: String,
    /// Generic type arguments of `type_name`.
    #[serde(default)]
    pub arguments: Vec<String>,
    /// Method parameter count. Ignored for fields.
    #[serde(default)]
    pub parameters: u8,
    #[serde(default, rename = "static")]
    pub is_static: bool,
    #[serde(default, rename = "transient")]
    pub is_transient: bool,
    #[serde(default)]
    pub annotations: Vec<RawAnnotation>,
}

/// Parse type declaration JSON into raw types.
pub fn parse_type_declarations(json: &str) -> std::result::Result<Vec<RawType>, serde_json::Error> {
    serde_json::from_str(json)
}

// ============================================================================
// Common Types
// ============================================================================

/// Handle to a declared type within one introspection backend.
pub type TypeId = u32;

/// Handle to a member: owning type plus declaration index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MemberId {
    pub owner: TypeId,
    pub index: u32,
}

/// Anything annotations can be attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Element {
    Type(TypeId),
    Member(MemberId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKind {
    Field,
    Method { parameters: u8 },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Modifiers {
    pub is_static: bool,
    pub is_transient: bool,
}

/// Reference to a declared type by name, with generic arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeRef<'a> {
    pub name: &'a str,
    pub arguments: Vec<&'a str>,
}

impl<'a> TypeRef<'a> {
    pub fn simple_name(&self) -> &'a str {
        utils::simple_name(self.name)
    }

    pub fn is_void(&self) -> bool {
        self.name == "void"
    }

    pub fn is_boolean(&self) -> bool {
        matches!(self.simple_name(), "boolean" | "Boolean")
    }
}

/// Borrowed view of a member, produced by either backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member<'a> {
    pub id: MemberId,
    pub name: &'a str,
    pub kind: MemberKind,
    pub ty: TypeRef<'a>,
    pub modifiers: Modifiers,
}

impl Member<'_> {
    pub fn is_field(&self) -> bool {
        self.kind == MemberKind::Field
    }

    pub fn is_method(&self) -> bool {
        matches!(self.kind, MemberKind::Method { .. })
    }

    pub fn parameter_count(&self) -> u8 {
        match self.kind {
            MemberKind::Field => 0,
            MemberKind::Method { parameters } => parameters,
        }
    }
}

/// Borrowed view of an annotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation<'a> {
    pub name: &'a str,
    pub attributes: Vec<(&'a str, &'a str)>,
}

impl<'a> Annotation<'a> {
    pub fn attribute(&self, key: &str) -> Option<&'a str> {
        self.attributes
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| *v)
    }
}

// ============================================================================
// TypeIntrospection Trait
// ============================================================================

/// Minimal capability any compiler integration must provide.
///
/// Covers only what metadata resolution needs:
/// - Enumerate types, members and superclasses
/// - Read annotations of a type or member
/// - Resolve a type by qualified or simple name
pub trait TypeIntrospection {
    fn all_types(&self) -> Vec<TypeId>;
    fn type_name(&self, ty: TypeId) -> &str;
    fn members(&self, ty: TypeId) -> Vec<Member<'_>>;
    fn superclass(&self, ty: TypeId) -> Option<TypeId>;
    fn annotation(&self, element: Element, name: &str) -> Option<Annotation<'_>>;
    fn resolve_type(&self, name: &str) -> Option<TypeId>;

    fn simple_name(&self, ty: TypeId) -> &str {
        utils::simple_name(self.type_name(ty))
    }

    fn has_annotation(&self, element: Element, name: &str) -> bool {
        self.annotation(element, name).is_some()
    }

    /// Reflexive: every type is a subtype of itself.
    fn is_subtype(&self, sub: TypeId, sup: TypeId) -> bool {
        let mut current = Some(sub);
        while let Some(ty) = current {
            if ty == sup {
                return true;
            }
            current = self.superclass(ty);
        }
        false
    }
}

impl<T: TypeIntrospection + ?Sized> TypeIntrospection for &T {
    fn all_types(&self) -> Vec<TypeId> {
        (*self).all_types()
    }
    fn type_name(&self, ty: TypeId) -> &str {
        (*self).type_name(ty)
    }
    fn members(&self, ty: TypeId) -> Vec<Member<'_>> {
        (*self).members(ty)
    }
    fn superclass(&self, ty: TypeId) -> Option<TypeId> {
        (*self).superclass(ty)
    }
    fn annotation(&self, element: Element, name: &str) -> Option<Annotation<'_>> {
        (*self).annotation(element, name)
    }
    fn resolve_type(&self, name: &str) -> Option<TypeId> {
        (*self).resolve_type(name)
    }
    fn is_subtype(&self, sub: TypeId, sup: TypeId) -> bool {
        (*self).is_subtype(sub, sup)
    }
}

/// Fails on the first type whose superclass chain never ends.
///
/// Walks `superclass` directly, so it terminates on cyclic input where
/// `is_subtype` would not.
pub fn check_acyclic<T: TypeIntrospection + ?Sized>(types: &T) -> Result<()> {
    let all = types.all_types();
    for &ty in &all {
        let mut current = types.superclass(ty);
        let mut steps = 0;
        while let Some(sup) = current {
            steps += 1;
            if sup == ty || steps > all.len() {
                return Err(Error::CyclicSuperclass(types.type_name(ty).to_owned()));
            }
            current = types.superclass(sup);
        }
    }
    Ok(())
}

// ============================================================================
// Static Layer (zero runtime init)
// ============================================================================

#[derive(Debug, Clone, Copy)]
pub struct StaticAnnotation {
    pub name: &'static str,
    pub attributes: &'static [(&'static str, &'static str)],
}

#[derive(Debug, Clone, Copy)]
pub struct StaticMember {
    pub name: &'static str,
    pub kind: MemberKind,
    pub type_name: &'static str,
    pub arguments: &'static [&'static str],
    pub modifiers: Modifiers,
    pub annotations: &'static [StaticAnnotation],
}

#[derive(Debug, Clone, Copy)]
pub struct StaticTypeInfo {
    pub name: &'static str,
    pub superclass: Option<TypeId>,
    pub annotations: &'static [StaticAnnotation],
    pub members: &'static [StaticMember],
}

/// Type model with static storage, typically emitted by a code generator.
///
/// Type lookups use binary search on the sorted table.
#[derive(Debug, Clone, Copy)]
pub struct StaticTypeModel {
    /// Sorted slice of (type_id, type_info) pairs.
    types: &'static [(TypeId, StaticTypeInfo)],
}

impl StaticTypeModel {
    /// Wrap a generated table, sorted by id.
    ///
    /// Superclass links are not checked here; a cyclic table makes
    /// `is_subtype` loop. Run [`StaticTypeModel::validate`] once (a test of the
    /// generated code is enough) or build with [`StaticTypeModel::checked`].
    pub const fn new(types: &'static [(TypeId, StaticTypeInfo)]) -> Self {
        Self { types }
    }

    pub fn checked(types: &'static [(TypeId, StaticTypeInfo)]) -> Result<Self> {
        let model = Self::new(types);
        model.validate()?;
        Ok(model)
    }

    /// Reject superclass cycles.
    pub fn validate(&self) -> Result<()> {
        check_acyclic(self)
    }

    pub fn get(&self, ty: TypeId) -> Option<&'static StaticTypeInfo> {
        self.types
            .binary_search_by_key(&ty, |(id, _)| *id)
            .ok()
            .map(|idx| &self.types[idx].1)
    }

    pub fn contains(&self, ty: TypeId) -> bool {
        self.get(ty).is_some()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (TypeId, &'static StaticTypeInfo)> {
        self.types.iter().map(|(id, info)| (*id, info))
    }

    fn static_annotations(&self, element: Element) -> &'static [StaticAnnotation] {
        match element {
            Element::Type(ty) => self.ensure_type(ty).annotations,
            Element::Member(id) => self
                .ensure_type(id.owner)
                .members
                .get(id.index as usize)
                .map(|m| m.annotations)
                .unwrap_or(&[]),
        }
    }
}

impl TypeIntrospection for StaticTypeModel {
    fn all_types(&self) -> Vec<TypeId> {
        self.types.iter().map(|(id, _)| *id).collect()
    }

    fn type_name(&self, ty: TypeId) -> &str {
        self.ensure_type(ty).name
    }

    fn members(&self, ty: TypeId) -> Vec<Member<'_>> {
        self.ensure_type(ty)
            .members
            .iter()
            .enumerate()
            .map(|(index, m)| Member {
                id: MemberId {
                    owner: ty,
                    index: index as u32,
                },
                name: m.name,
                kind: m.kind,
                ty: TypeRef {
                    name: m.type_name,
                    arguments: m.arguments.to_vec(),
                },
                modifiers: m.modifiers,
            })
            .collect()
    }

    fn superclass(&self, ty: TypeId) -> Option<TypeId> {
        self.get(ty)?.superclass
    }

    fn annotation(&self, element: Element, name: &str) -> Option<Annotation<'_>> {
        self.static_annotations(element)
            .iter()
            .find(|a| a.name == name)
            .map(|a| Annotation {
                name: a.name,
                attributes: a.attributes.to_vec(),
            })
    }

    fn resolve_type(&self, name: &str) -> Option<TypeId> {
        self.iter()
            .find(|(_, info)| info.name == name)
            .or_else(|| {
                self.iter()
                    .find(|(_, info)| utils::simple_name(info.name) == name)
            })
            .map(|(id, _)| id)
    }
}

// ============================================================================
// Dynamic Layer (runtime construction)
// ============================================================================

#[derive(Debug, Clone)]
pub struct AnnotationInfo {
    pub name: String,
    pub attributes: IndexMap<String, String>,
}

#[derive(Debug, Clone)]
pub struct MemberInfo {
    pub name: String,
    pub kind: MemberKind,
    pub type_name: String,
    pub arguments: Vec<String>,
    pub modifiers: Modifiers,
    pub annotations: Vec<AnnotationInfo>,
}

#[derive(Debug, Clone)]
pub struct TypeInfo {
    pub name: String,
    pub superclass: Option<TypeId>,
    pub annotations: Vec<AnnotationInfo>,
    pub members: Vec<MemberInfo>,
}

/// Type model built from declarations at runtime (heap-allocated).
///
/// Type ids are assigned in declaration order.
#[derive(Debug, Clone, Default)]
pub struct DynamicTypeModel {
    types: HashMap<TypeId, TypeInfo>,
    by_name: HashMap<String, TypeId>,
    /// Simple name → first declared type with that simple name.
    by_simple_name: HashMap<String, TypeId>,
}

impl DynamicTypeModel {
    /// Parse declarations from JSON and build the model.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw = parse_type_declarations(json)?;
        Self::build(&raw)
    }

    /// Build from raw declarations.
    ///
    /// Superclasses that are not declared (library base types) are treated
    /// as absent rather than as an error.
    pub fn build(raw_types: &[RawType]) -> Result<Self> {
        let mut by_name = HashMap::new();
        let mut by_simple_name = HashMap::new();

        for (idx, raw) in raw_types.iter().enumerate() {
            let id = idx as TypeId;
            if by_name.insert(raw.name.clone(), id).is_some() {
                return Err(Error::DuplicateType(raw.name.clone()));
            }
            by_simple_name
                .entry(utils::simple_name(&raw.name).to_owned())
                .or_insert(id);
        }

        let types = raw_types
            .iter()
            .enumerate()
            .map(|(idx, raw)| {
                let superclass = raw
                    .superclass
                    .as_deref()
                    .and_then(|s| by_name.get(s).or_else(|| by_simple_name.get(s)))
                    .copied();
                let info = TypeInfo {
                    name: raw.name.clone(),
                    superclass,
                    annotations: raw.annotations.iter().map(convert_annotation).collect(),
                    members: raw.members.iter().map(convert_member).collect(),
                };
                (idx as TypeId, info)
            })
            .collect();

        let model = Self {
            types,
            by_name,
            by_simple_name,
        };
        check_acyclic(&model)?;
        Ok(model)
    }

    pub fn get(&self, ty: TypeId) -> Option<&TypeInfo> {
        self.types.get(&ty)
    }

    pub fn contains(&self, ty: TypeId) -> bool {
        self.types.contains_key(&ty)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (TypeId, &TypeInfo)> {
        self.types.iter().map(|(&id, info)| (id, info))
    }

    fn dynamic_annotations(&self, element: Element) -> &[AnnotationInfo] {
        match element {
            Element::Type(ty) => &self.ensure_type(ty).annotations,
            Element::Member(id) => self
                .ensure_type(id.owner)
                .members
                .get(id.index as usize)
                .map(|m| m.annotations.as_slice())
                .unwrap_or(&[]),
        }
    }
}

fn convert_annotation(raw: &RawAnnotation) -> AnnotationInfo {
    AnnotationInfo {
        name: raw.name.clone(),
        attributes: raw.attributes.clone(),
    }
}

fn convert_member(raw: &RawMember) -> MemberInfo {
    let kind = match raw.kind {
        RawMemberKind::Field => MemberKind::Field,
        RawMemberKind::Method => MemberKind::Method {
            parameters: raw.parameters,
        },
    };
    MemberInfo {
        name: raw.name.clone(),
        kind,
        type_name: raw.type_name.clone(),
        arguments: raw.arguments.clone(),
        modifiers: Modifiers {
            is_static: raw.is_static,
            is_transient: raw.is_transient,
        },
        annotations: raw.annotations.iter().map(convert_annotation).collect(),
    }
}

impl TypeIntrospection for DynamicTypeModel {
    fn all_types(&self) -> Vec<TypeId> {
        let mut ids: Vec<_> = self.types.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    fn type_name(&self, ty: TypeId) -> &str {
        &self.ensure_type(ty).name
    }

    fn members(&self, ty: TypeId) -> Vec<Member<'_>> {
        self.ensure_type(ty)
            .members
            .iter()
            .enumerate()
            .map(|(index, m)| Member {
                id: MemberId {
                    owner: ty,
                    index: index as u32,
                },
                name: &m.name,
                kind: m.kind,
                ty: TypeRef {
                    name: &m.type_name,
                    arguments: m.arguments.iter().map(String::as_str).collect(),
                },
                modifiers: m.modifiers,
            })
            .collect()
    }

    fn superclass(&self, ty: TypeId) -> Option<TypeId> {
        self.get(ty)?.superclass
    }

    fn annotation(&self, element: Element, name: &str) -> Option<Annotation<'_>> {
        self.dynamic_annotations(element)
            .iter()
            .find(|a| a.name == name)
            .map(|a| Annotation {
                name: &a.name,
                attributes: a
                    .attributes
                    .iter()
                    .map(|(k, v)| (k.as_str(), v.as_str()))
                    .collect(),
            })
    }

    fn resolve_type(&self, name: &str) -> Option<TypeId> {
        self.by_name
            .get(name)
            .or_else(|| self.by_simple_name.get(name))
            .copied()
    }
}
