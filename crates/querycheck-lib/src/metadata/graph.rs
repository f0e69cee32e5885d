//! Per-run cache of entity, collection and component metadata.
//!
//! Entities are built on first reference by name and cross-linked with every
//! already known super- or subtype, so path lookups can fall back to
//! properties only a subtype declares.

use std::collections::HashMap;

use indexmap::IndexSet;
use querycheck_core::{TypeId, TypeIntrospection};

use super::resolver;
use super::types::{
    AccessType, BasicType, CollectionElement, CollectionMetadata, CollectionShape,
    ComponentMetadata, EntityId, EntityMetadata, PropertyDescriptor, PropertyKind, PropertyType,
};

/// Metadata reconstructed for one analysis run.
///
/// Not shared between runs; every run owns its own instance.
pub struct MetadataGraph<'t, T: TypeIntrospection + ?Sized> {
    types: &'t T,
    entities: Vec<EntityMetadata>,
    /// Requested name → entity, misses included.
    by_name: HashMap<String, Option<EntityId>>,
    by_type: HashMap<TypeId, EntityId>,
    collections: HashMap<String, CollectionMetadata>,
    components: HashMap<(TypeId, AccessType), ComponentMetadata>,
    fallback_to_subtypes: bool,
}

impl<'t, T: TypeIntrospection + ?Sized> MetadataGraph<'t, T> {
    pub fn new(types: &'t T) -> Self {
        Self {
            types,
            entities: Vec::new(),
            by_name: HashMap::new(),
            by_type: HashMap::new(),
            collections: HashMap::new(),
            components: HashMap::new(),
            fallback_to_subtypes: true,
        }
    }

    /// Whether path lookups consult known subtypes when the exact entity fails.
    pub fn with_subtype_fallback(mut self, enabled: bool) -> Self {
        self.fallback_to_subtypes = enabled;
        self
    }

    pub fn types(&self) -> &'t T {
        self.types
    }

    /// Entities constructed so far, in construction order.
    pub fn entities(&self) -> impl Iterator<Item = &EntityMetadata> {
        self.entities.iter()
    }

    pub fn entity(&self, id: EntityId) -> &EntityMetadata {
        &self.entities[id.0 as usize]
    }

    /// Names of every declared entity, whether constructed yet or not.
    pub fn entity_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .types
            .all_types()
            .into_iter()
            .filter(|&ty| resolver::is_entity(self.types, ty))
            .map(|ty| resolver::entity_name(self.types, ty))
            .collect();
        names.sort();
        names.dedup();
        names
    }

    /// Resolve an entity by entity name, falling back to its type name.
    ///
    /// Idempotent: later calls with the same name return the cached entity.
    pub fn resolve_entity(&mut self, name: &str) -> Option<EntityId> {
        if let Some(&cached) = self.by_name.get(name) {
            tracing::trace!(name, hit = cached.is_some(), "entity cache hit");
            return cached;
        }

        let id = self
            .find_entity_type(name)
            .map(|ty| self.entity_for_type(ty));
        if id.is_none() {
            tracing::debug!(name, "no entity with this name");
        }
        self.by_name.insert(name.to_owned(), id);
        id
    }

    /// Construct every declared entity.
    pub fn resolve_all(&mut self) -> Vec<EntityId> {
        let types = self.types;
        types
            .all_types()
            .into_iter()
            .filter(|&ty| resolver::is_entity(types, ty))
            .map(|ty| self.entity_for_type(ty))
            .collect()
    }

    pub fn entity_by_name(&mut self, name: &str) -> Option<&EntityMetadata> {
        let id = self.resolve_entity(name)?;
        Some(self.entity(id))
    }

    fn find_entity_type(&self, name: &str) -> Option<TypeId> {
        let types = self.types;
        let entity_types: Vec<TypeId> = types
            .all_types()
            .into_iter()
            .filter(|&ty| resolver::is_entity(types, ty))
            .collect();

        entity_types
            .iter()
            .copied()
            .find(|&ty| resolver::entity_name(types, ty) == name)
            .or_else(|| {
                types
                    .resolve_type(name)
                    .filter(|&ty| resolver::is_entity(types, ty))
            })
            .or_else(|| {
                entity_types
                    .iter()
                    .copied()
                    .find(|&ty| types.simple_name(ty) == name)
            })
    }

    fn entity_for_type(&mut self, ty: TypeId) -> EntityId {
        if let Some(&id) = self.by_type.get(&ty) {
            return id;
        }

        let types = self.types;
        let id = EntityId(self.entities.len() as u32);
        let name = resolver::entity_name(types, ty);
        let access = resolver::default_access(types, ty);
        let properties = resolver::describe_properties(types, ty, access);

        let mut subtypes = IndexSet::new();
        for known in &mut self.entities {
            if types.is_subtype(ty, known.type_id) {
                known.subtypes.insert(id);
                tracing::trace!(sub = %name, sup = %known.name, "linked subtype");
            } else if types.is_subtype(known.type_id, ty) {
                subtypes.insert(known.id);
                tracing::trace!(sub = %known.name, sup = %name, "linked subtype");
            }
        }

        tracing::debug!(
            entity = %name,
            ty = types.type_name(ty),
            %access,
            properties = properties.len(),
            "constructed entity"
        );

        self.entities.push(EntityMetadata {
            id,
            name: name.clone(),
            type_id: ty,
            type_name: types.type_name(ty).to_owned(),
            access,
            properties,
            subtypes,
            property_types: HashMap::new(),
        });
        self.by_type.insert(ty, id);
        self.by_name.entry(name).or_insert(Some(id));
        id
    }

    /// Type of `path` on exactly this entity, without subtype fallback.
    pub fn exact_property_type(&mut self, id: EntityId, path: &str) -> Option<PropertyType> {
        let entity = &self.entities[id.0 as usize];
        if let Some(cached) = entity.property_types.get(path) {
            return cached.clone();
        }

        let (owner, ty, access) = (entity.name.clone(), entity.type_id, entity.access);
        let resolved = self.path_type(&owner, "", ty, access, path);
        // Dotted misses stay uncached: a to-one target may gain a subtype later
        if resolved.is_some() || !path.contains('.') {
            self.entities[id.0 as usize]
                .property_types
                .insert(path.to_owned(), resolved.clone());
        }
        resolved
    }

    /// Type of `path` on the entity, else on the first known subtype that has it.
    ///
    /// When sibling subtypes declare the path with different types, whichever
    /// was linked first wins.
    pub fn property_type(&mut self, id: EntityId, path: &str) -> Option<PropertyType> {
        if let Some(found) = self.exact_property_type(id, path) {
            return Some(found);
        }
        if !self.fallback_to_subtypes {
            return None;
        }

        let subtypes: Vec<EntityId> = self.entity(id).subtypes().collect();
        for sub in subtypes {
            if let Some(found) = self.exact_property_type(sub, path) {
                tracing::debug!(
                    entity = self.entity(id).name(),
                    subtype = self.entity(sub).name(),
                    path,
                    "resolved through subtype"
                );
                return Some(found);
            }
        }
        None
    }

    /// Resolve `<entity>.<path>` to a to-many association or element collection.
    pub fn resolve_collection(&mut self, role: &str) -> Option<CollectionMetadata> {
        if let Some(cached) = self.collections.get(role) {
            return Some(cached.clone());
        }

        let resolved = role.split_once('.').and_then(|(entity, path)| {
            let id = self.resolve_entity(entity)?;
            self.property_type(id, path)?.as_collection().cloned()
        });
        match &resolved {
            // Misses stay uncached: a subtype registered later may declare it
            None => tracing::debug!(role, "no collection with this role"),
            Some(found) => {
                self.collections.insert(role.to_owned(), found.clone());
            }
        }
        resolved
    }

    /// Type of `path` within the elements of the collection `role`.
    pub fn collection_element_type(&mut self, role: &str, path: &str) -> Option<PropertyType> {
        let collection = self.resolve_collection(role)?;
        match collection.element {
            CollectionElement::Entity { entity_name } => {
                let id = self.resolve_entity(&entity_name)?;
                self.property_type(id, path)
            }
            CollectionElement::Component(component) => {
                let prefix = role.split_once('.').map_or("", |(_, p)| p);
                self.path_type(
                    &collection.owner,
                    prefix,
                    component.type_id,
                    component.access,
                    path,
                )
            }
            CollectionElement::Basic(_) => None,
        }
    }

    /// Flattened properties of an embeddable type under an access strategy.
    pub fn component(&mut self, ty: TypeId, inherited: AccessType) -> ComponentMetadata {
        let types = self.types;
        let access = resolver::access_for(types, ty, inherited);
        if let Some(cached) = self.components.get(&(ty, access)) {
            return cached.clone();
        }
        let component = ComponentMetadata {
            type_id: ty,
            type_name: types.type_name(ty).to_owned(),
            access,
            properties: resolver::describe_properties(types, ty, access),
        };
        self.components.insert((ty, access), component.clone());
        component
    }

    /// Walk `path` from `ty`, descending through components and to-one targets.
    fn path_type(
        &mut self,
        owner: &str,
        prefix: &str,
        ty: TypeId,
        access: AccessType,
        path: &str,
    ) -> Option<PropertyType> {
        let types = self.types;
        let (head, rest) = match path.split_once('.') {
            Some((head, rest)) => (head, Some(rest)),
            None => (path, None),
        };
        let descriptor = resolver::find_property(types, ty, head, access)?;
        let full_path = if prefix.is_empty() {
            head.to_owned()
        } else {
            format!("{prefix}.{head}")
        };

        let Some(rest) = rest else {
            return self.descriptor_type(owner, &full_path, &descriptor, access);
        };
        match descriptor.kind {
            PropertyKind::Embedded => {
                let target = types.resolve_type(&descriptor.target)?;
                let access = resolver::access_for(types, target, access);
                self.path_type(owner, &full_path, target, access, rest)
            }
            PropertyKind::ToOne => {
                let target = self.resolve_entity(&descriptor.target)?;
                self.property_type(target, rest)
            }
            PropertyKind::Basic | PropertyKind::ToMany | PropertyKind::ElementCollection => None,
        }
    }

    fn descriptor_type(
        &mut self,
        owner: &str,
        path: &str,
        descriptor: &PropertyDescriptor,
        access: AccessType,
    ) -> Option<PropertyType> {
        let types = self.types;
        let collection = |element| CollectionMetadata {
            owner: owner.to_owned(),
            role: format!("{owner}.{path}"),
            shape: CollectionShape::from_container(descriptor.container.as_deref().unwrap_or("")),
            element,
        };

        let resolved = match descriptor.kind {
            PropertyKind::Basic => PropertyType::Basic(BasicType::new(descriptor.target.as_str())),
            PropertyKind::ToOne => PropertyType::Entity {
                entity_name: descriptor.target.clone(),
            },
            PropertyKind::Embedded => {
                let ty = types.resolve_type(&descriptor.target)?;
                PropertyType::Component(self.component(ty, access))
            }
            PropertyKind::ToMany => PropertyType::ToMany(collection(CollectionElement::Entity {
                entity_name: descriptor.target.clone(),
            })),
            PropertyKind::ElementCollection => {
                let element = match types
                    .resolve_type(&descriptor.target)
                    .filter(|&ty| resolver::is_embeddable(types, ty))
                {
                    Some(ty) => CollectionElement::Component(self.component(ty, access)),
                    None => CollectionElement::Basic(BasicType::new(descriptor.target.as_str())),
                };
                PropertyType::ElementCollection(collection(element))
            }
        };
        Some(resolved)
    }
}
