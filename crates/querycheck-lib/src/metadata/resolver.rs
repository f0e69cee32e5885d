//! Static metadata resolution: pure functions over `TypeIntrospection`.
//!
//! Classifies members as persistent or not, computes access strategy,
//! and classifies associations. Unresolvable lookups return `None`.

use indexmap::IndexMap;
use querycheck_core::annotations::{self as ann, access, attr};
use querycheck_core::utils::{accessor_property_name, simple_name};
use querycheck_core::{Element, Member, TypeId, TypeIntrospection};

use super::types::{AccessType, PropertyDescriptor, PropertyKind};

pub fn is_entity<T: TypeIntrospection + ?Sized>(types: &T, ty: TypeId) -> bool {
    types.has_annotation(Element::Type(ty), ann::ENTITY)
}

pub fn is_embeddable<T: TypeIntrospection + ?Sized>(types: &T, ty: TypeId) -> bool {
    types.has_annotation(Element::Type(ty), ann::EMBEDDABLE)
}

/// Entity, mapped superclass, or embeddable.
pub fn is_persistent_type<T: TypeIntrospection + ?Sized>(types: &T, ty: TypeId) -> bool {
    let element = Element::Type(ty);
    types.has_annotation(element, ann::ENTITY)
        || types.has_annotation(element, ann::MAPPED_SUPERCLASS)
        || types.has_annotation(element, ann::EMBEDDABLE)
}

/// Entity name: the `Entity(name = ...)` override, else the simple type name.
pub fn entity_name<T: TypeIntrospection + ?Sized>(types: &T, ty: TypeId) -> String {
    types
        .annotation(Element::Type(ty), ann::ENTITY)
        .and_then(|a| a.attribute(attr::NAME).map(str::to_owned))
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| types.simple_name(ty).to_owned())
}

/// `ty` followed by its persistent supertypes, nearest first.
///
/// Non-persistent intervening types are skipped; `ty` itself is always kept.
pub fn persistent_chain<T: TypeIntrospection + ?Sized>(types: &T, ty: TypeId) -> Vec<TypeId> {
    let mut chain = vec![ty];
    let mut current = types.superclass(ty);
    while let Some(sup) = current {
        if is_persistent_type(types, sup) {
            chain.push(sup);
        }
        current = types.superclass(sup);
    }
    chain
}

/// Access strategy from an explicit `Access` annotation on the type.
pub fn explicit_access<T: TypeIntrospection + ?Sized>(types: &T, ty: TypeId) -> Option<AccessType> {
    let annotation = types.annotation(Element::Type(ty), ann::ACCESS)?;
    match annotation.attribute(attr::VALUE)? {
        access::FIELD => Some(AccessType::Field),
        access::PROPERTY => Some(AccessType::Property),
        _ => None,
    }
}

/// Default access strategy of a hierarchy.
///
/// Decided by whichever member carries the identifier: an accessor makes the
/// whole hierarchy property-accessed, a field (or no identifier) field-accessed.
/// Every type in a hierarchy shares its root's identifier, so the answer is
/// the same for every subtype.
pub fn default_access<T: TypeIntrospection + ?Sized>(types: &T, ty: TypeId) -> AccessType {
    for owner in persistent_chain(types, ty).into_iter().rev() {
        for member in types.members(owner) {
            let element = Element::Member(member.id);
            if types.has_annotation(element, ann::ID)
                || types.has_annotation(element, ann::EMBEDDED_ID)
            {
                return if member.is_method() {
                    AccessType::Property
                } else {
                    AccessType::Field
                };
            }
        }
    }
    AccessType::Field
}

/// Access for members declared directly on `ty`.
pub fn access_for<T: TypeIntrospection + ?Sized>(
    types: &T,
    ty: TypeId,
    default: AccessType,
) -> AccessType {
    explicit_access(types, ty).unwrap_or(default)
}

/// Not static, not transient (by modifier or annotation).
pub fn is_persistent_member<T: TypeIntrospection + ?Sized>(types: &T, member: &Member<'_>) -> bool {
    !member.modifiers.is_static
        && !member.modifiers.is_transient
        && !types.has_annotation(Element::Member(member.id), ann::TRANSIENT)
}

/// Property name of a persistent member under the given access strategy.
///
/// Accessors qualify as zero-argument `get<Name>` returning a value or
/// `is<Name>` returning a boolean.
pub fn member_property_name<T: TypeIntrospection + ?Sized>(
    types: &T,
    member: &Member<'_>,
    access: AccessType,
) -> Option<String> {
    if !is_persistent_member(types, member) {
        return None;
    }
    match access {
        AccessType::Field => member.is_field().then(|| member.name.to_owned()),
        AccessType::Property => {
            if !member.is_method() || member.parameter_count() != 0 {
                return None;
            }
            let qualifies = if member.name.starts_with("get") {
                !member.ty.is_void()
            } else {
                member.ty.is_boolean()
            };
            if !qualifies {
                return None;
            }
            accessor_property_name(member.name)
        }
    }
}

/// Best-matching member for `property`, searching `ty` first, then its
/// persistent supertypes.
pub fn find_property_member<'t, T: TypeIntrospection + ?Sized>(
    types: &'t T,
    ty: TypeId,
    property: &str,
    default: AccessType,
) -> Option<Member<'t>> {
    persistent_chain(types, ty).into_iter().find_map(|owner| {
        let access = access_for(types, owner, default);
        types.members(owner).into_iter().find(|member| {
            member_property_name(types, member, access).as_deref() == Some(property)
        })
    })
}

/// All persistent properties of `ty`, root-declared first.
///
/// A subtype redeclaring a property replaces the member but keeps the
/// position of the first declaration.
pub fn property_members<'t, T: TypeIntrospection + ?Sized>(
    types: &'t T,
    ty: TypeId,
    default: AccessType,
) -> Vec<(String, Member<'t>)> {
    let mut properties: IndexMap<String, Member<'t>> = IndexMap::new();
    for owner in persistent_chain(types, ty).into_iter().rev() {
        let access = access_for(types, owner, default);
        for member in types.members(owner) {
            if let Some(name) = member_property_name(types, &member, access) {
                properties.insert(name, member);
            }
        }
    }
    properties.into_iter().collect()
}

/// Classify a member.
///
/// Precedence when several checks match:
/// to-one > to-many > element collection > embedded > basic.
pub fn classify<T: TypeIntrospection + ?Sized>(types: &T, member: &Member<'_>) -> PropertyKind {
    let element = Element::Member(member.id);
    let has = |name: &str| types.has_annotation(element, name);

    if has(ann::MANY_TO_ONE) || has(ann::ONE_TO_ONE) {
        PropertyKind::ToOne
    } else if has(ann::ONE_TO_MANY) || has(ann::MANY_TO_MANY) {
        PropertyKind::ToMany
    } else if has(ann::ELEMENT_COLLECTION) {
        PropertyKind::ElementCollection
    } else if has(ann::EMBEDDED)
        || has(ann::EMBEDDED_ID)
        || types
            .resolve_type(member.ty.name)
            .is_some_and(|ty| is_embeddable(types, ty))
    {
        PropertyKind::Embedded
    } else {
        PropertyKind::Basic
    }
}

/// Name of whatever the property points at; see `PropertyDescriptor::target`.
pub fn target_name<T: TypeIntrospection + ?Sized>(
    types: &T,
    member: &Member<'_>,
    kind: PropertyKind,
) -> String {
    let element = Element::Member(member.id);
    let explicit = |annotations: &[&str], key: &str| {
        annotations.iter().find_map(|name| {
            types
                .annotation(element, name)
                .and_then(|a| a.attribute(key).map(strip_class_suffix))
                .filter(|value| !value.is_empty())
                .map(|value| simple_name(value).to_owned())
        })
    };
    // Map-shaped containers keep the element in the last argument
    let element_type = || {
        member
            .ty
            .arguments
            .last()
            .map(|arg| simple_name(arg).to_owned())
            .unwrap_or_else(|| member.ty.simple_name().to_owned())
    };

    match kind {
        PropertyKind::ToOne => explicit(&[ann::MANY_TO_ONE, ann::ONE_TO_ONE][..], attr::TARGET_ENTITY)
            .unwrap_or_else(|| member.ty.simple_name().to_owned()),
        PropertyKind::ToMany => {
            explicit(&[ann::ONE_TO_MANY, ann::MANY_TO_MANY][..], attr::TARGET_ENTITY)
                .unwrap_or_else(element_type)
        }
        PropertyKind::ElementCollection => {
            explicit(&[ann::ELEMENT_COLLECTION][..], attr::TARGET_CLASS).unwrap_or_else(element_type)
        }
        PropertyKind::Embedded | PropertyKind::Basic => member.ty.name.to_owned(),
    }
}

fn strip_class_suffix(value: &str) -> &str {
    value.strip_suffix(".class").unwrap_or(value)
}

pub fn describe<T: TypeIntrospection + ?Sized>(
    types: &T,
    name: String,
    member: &Member<'_>,
) -> PropertyDescriptor {
    let kind = classify(types, member);
    let container = matches!(kind, PropertyKind::ToMany | PropertyKind::ElementCollection)
        .then(|| member.ty.name.to_owned());
    PropertyDescriptor {
        name,
        kind,
        target: target_name(types, member, kind),
        container,
        member: member.id,
    }
}

/// Descriptor for a single property of `ty`.
pub fn find_property<T: TypeIntrospection + ?Sized>(
    types: &T,
    ty: TypeId,
    property: &str,
    default: AccessType,
) -> Option<PropertyDescriptor> {
    let member = find_property_member(types, ty, property, default)?;
    Some(describe(types, property.to_owned(), &member))
}

/// Descriptors for every property of `ty`.
pub fn describe_properties<T: TypeIntrospection + ?Sized>(
    types: &T,
    ty: TypeId,
    default: AccessType,
) -> Vec<PropertyDescriptor> {
    property_members(types, ty, default)
        .into_iter()
        .map(|(name, member)| describe(types, name, &member))
        .collect()
}
