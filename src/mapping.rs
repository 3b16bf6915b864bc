//! Mapping-store boundary types.
//!
//! The core never owns table/column metadata; an external mapping store
//! supplies it per entity. `MappingRegistry` is the in-process face of that
//! store: renderers resolve entity names (or aliases, via the active from
//! clause) against it during traversal, and fail fast on any dangling
//! reference.

use std::collections::BTreeMap;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{StorqError, StorqResult};

/// Physical column descriptor for one entity property.
///
/// This is the `mapping` argument consumed by `Dialect::column_sql`:
/// `data_type` selects the dialect's type rule, `length`/`precision`/`scale`
/// feed into the produced column DDL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyMapping {
    /// Physical column name.
    pub column: String,
    /// Semantic data type key (`integer`, `string`, `timestamp`, ...).
    #[serde(rename = "type")]
    pub data_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precision: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<u32>,
}

impl PropertyMapping {
    /// Create a mapping with just a column name and data type.
    pub fn new(column: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            data_type: data_type.into(),
            length: None,
            precision: None,
            scale: None,
        }
    }

    pub fn with_length(mut self, length: u32) -> Self {
        self.length = Some(length);
        self
    }

    pub fn with_precision(mut self, precision: u32, scale: Option<u32>) -> Self {
        self.precision = Some(precision);
        self.scale = scale;
        self
    }
}

/// Table-level mapping for one entity type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityMapping {
    /// Entity type name as used in query trees.
    pub entity: String,
    /// Physical table name.
    pub table: String,
    /// Optional schema the table lives in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    /// Property name → column descriptor, ordered by name. Must contain an
    /// `id` entry; bare entity references resolve to it.
    pub properties: BTreeMap<String, PropertyMapping>,
}

impl EntityMapping {
    /// Create an entity mapping with an `id` column of the given data type.
    pub fn new(
        entity: impl Into<String>,
        table: impl Into<String>,
        id_mapping: PropertyMapping,
    ) -> Self {
        let mut properties = BTreeMap::new();
        properties.insert("id".to_string(), id_mapping);
        Self {
            entity: entity.into(),
            table: table.into(),
            schema: None,
            properties,
        }
    }

    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    /// Add a property mapping.
    pub fn with_property(mut self, name: impl Into<String>, mapping: PropertyMapping) -> Self {
        self.properties.insert(name.into(), mapping);
        self
    }

    /// Resolve a property name to its column descriptor, failing if the
    /// property is unknown to this entity.
    pub fn get_mapping(&self, property: &str) -> StorqResult<&PropertyMapping> {
        self.properties
            .get(property)
            .ok_or_else(|| StorqError::unknown_property(&self.entity, property))
    }

    /// The id column descriptor (the implicit property of bare entity
    /// references).
    pub fn id_mapping(&self) -> StorqResult<&PropertyMapping> {
        self.get_mapping("id")
    }
}

/// In-process registry of entity mappings, keyed by entity type name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MappingRegistry {
    entities: BTreeMap<String, EntityMapping>,
}

impl MappingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an entity mapping under its entity type name.
    pub fn register(&mut self, mapping: EntityMapping) {
        debug!("Registering entity mapping {}", mapping.entity);
        self.entities.insert(mapping.entity.clone(), mapping);
    }

    /// True if an entity with the given name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.entities.contains_key(name)
    }

    /// Resolve an entity type name, failing distinguishably when unknown.
    pub fn get(&self, name: &str) -> StorqResult<&EntityMapping> {
        self.entities
            .get(name)
            .ok_or_else(|| StorqError::UnknownEntity(name.to_string()))
    }
}
