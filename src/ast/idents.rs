//! Entity and property reference nodes.
//!
//! References carry names only. Resolution to physical tables and columns
//! goes through the active visitor (`Visitor::entity_mapping`), so the same
//! tree renders correctly under different mapping scopes: an outer query
//! and a nested sub-select resolve the same alias differently without any
//! tree mutation.

use serde::{Deserialize, Serialize};

use crate::ast::visitor::Visitor;
use crate::error::StorqResult;
use crate::mapping::{EntityMapping, PropertyMapping};

/// The implicit property of bare entity references.
pub const ID_PROPERTY: &str = "id";

/// A bare entity reference. Implies the entity's `id` property wherever a
/// column is needed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub entity: String,
}

impl Entity {
    pub fn new(entity: impl Into<String>) -> Self {
        Self {
            entity: entity.into(),
        }
    }

    pub fn entity_mapping<'a, V: Visitor + ?Sized>(
        &self,
        visitor: &'a V,
    ) -> StorqResult<&'a EntityMapping> {
        visitor.entity_mapping(&self.entity)
    }

    pub fn property_mapping<'a, V: Visitor + ?Sized>(
        &self,
        visitor: &'a V,
    ) -> StorqResult<&'a PropertyMapping> {
        self.entity_mapping(visitor)?.get_mapping(ID_PROPERTY)
    }
}

/// An entity-qualified property reference (`Author.name`).
///
/// A `None` property is a whole-row reference; where a single column is
/// required it resolves to the entity's `id` property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ident {
    pub entity: String,
    pub property: Option<String>,
}

impl Ident {
    pub fn new(entity: impl Into<String>, property: Option<String>) -> Self {
        Self {
            entity: entity.into(),
            property,
        }
    }

    pub fn entity_mapping<'a, V: Visitor + ?Sized>(
        &self,
        visitor: &'a V,
    ) -> StorqResult<&'a EntityMapping> {
        visitor.entity_mapping(&self.entity)
    }

    pub fn property_mapping<'a, V: Visitor + ?Sized>(
        &self,
        visitor: &'a V,
    ) -> StorqResult<&'a PropertyMapping> {
        let property = self.property.as_deref().unwrap_or(ID_PROPERTY);
        self.entity_mapping(visitor)?.get_mapping(property)
    }

    /// The name this reference contributes to a result row:
    /// `"<entity>.<property>"`, or the bare entity name for whole-row
    /// references.
    pub fn result_property_name(&self) -> String {
        match &self.property {
            Some(property) => format!("{}.{}", self.entity, property),
            None => self.entity.clone(),
        }
    }
}

/// An alias-qualified property reference (`a.name`). The alias must be
/// declared by the active from clause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasIdent {
    pub alias: String,
    pub property: Option<String>,
}

impl AliasIdent {
    pub fn new(alias: impl Into<String>, property: Option<String>) -> Self {
        let alias = alias.into();
        debug_assert!(!alias.is_empty(), "AliasIdent requires an alias");
        Self { alias, property }
    }

    pub fn entity_mapping<'a, V: Visitor + ?Sized>(
        &self,
        visitor: &'a V,
    ) -> StorqResult<&'a EntityMapping> {
        visitor.entity_mapping(&self.alias)
    }

    pub fn property_mapping<'a, V: Visitor + ?Sized>(
        &self,
        visitor: &'a V,
    ) -> StorqResult<&'a PropertyMapping> {
        let property = self.property.as_deref().unwrap_or(ID_PROPERTY);
        self.entity_mapping(visitor)?.get_mapping(property)
    }

    pub fn result_property_name(&self) -> String {
        match &self.property {
            Some(property) => format!("{}.{}", self.alias, property),
            None => self.alias.clone(),
        }
    }
}

/// An alias reference selecting the aliased entity itself.
///
/// `load_aggressive` asks downstream consumers to eager-load the full row
/// instead of the id column alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasEntity {
    pub alias: String,
    pub load_aggressive: bool,
}

impl AliasEntity {
    pub fn new(alias: impl Into<String>, load_aggressive: bool) -> Self {
        let alias = alias.into();
        debug_assert!(!alias.is_empty(), "AliasEntity requires an alias");
        Self {
            alias,
            load_aggressive,
        }
    }

    pub fn entity_mapping<'a, V: Visitor + ?Sized>(
        &self,
        visitor: &'a V,
    ) -> StorqResult<&'a EntityMapping> {
        visitor.entity_mapping(&self.alias)
    }

    pub fn property_mapping<'a, V: Visitor + ?Sized>(
        &self,
        visitor: &'a V,
    ) -> StorqResult<&'a PropertyMapping> {
        self.entity_mapping(visitor)?.get_mapping(ID_PROPERTY)
    }

    pub fn result_property_name(&self) -> String {
        self.alias.clone()
    }
}
