//! Invariant checks excluded from coverage reports.

#![cfg_attr(coverage_nightly, coverage(off))]

use crate::{DynamicTypeModel, StaticTypeInfo, StaticTypeModel, TypeId, TypeInfo};

impl StaticTypeModel {
    pub(crate) fn ensure_type(&self, ty: TypeId) -> &'static StaticTypeInfo {
        self.get(ty).unwrap_or_else(|| {
            panic!(
                "TypeIntrospection: type id {ty} not found \
                 (ids must come from this model)"
            )
        })
    }
}

impl DynamicTypeModel {
    pub(crate) fn ensure_type(&self, ty: TypeId) -> &TypeInfo {
        self.get(ty).unwrap_or_else(|| {
            panic!(
                "TypeIntrospection: type id {ty} not found \
                 (ids must come from this model)"
            )
        })
    }
}
