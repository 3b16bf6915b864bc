//! Error types for storq.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StorqError {
    /// The active dialect has no column mapping for a data type.
    #[error("Missing or invalid dialect data type '{data_type}'")]
    UnknownDataType { data_type: String },

    /// A dialect was asked for a feature it does not implement
    /// (limit/offset/range pagination, sequences).
    #[error("Dialect '{dialect}' does not support {feature}")]
    UnsupportedFeature {
        dialect: &'static str,
        feature: &'static str,
    },

    /// The mapping store has no entity registered under this name or alias.
    #[error("Entity '{0}' is not defined")]
    UnknownEntity(String),

    /// The entity mapping has no such property.
    #[error("Entity '{entity}' has no property '{property}'")]
    UnknownProperty { entity: String, property: String },
}

impl StorqError {
    /// Create an unknown-data-type error.
    pub fn unknown_data_type(data_type: impl Into<String>) -> Self {
        Self::UnknownDataType {
            data_type: data_type.into(),
        }
    }

    /// Create an unsupported-feature error.
    pub fn unsupported(dialect: &'static str, feature: &'static str) -> Self {
        Self::UnsupportedFeature { dialect, feature }
    }

    /// Create an unknown-property error.
    pub fn unknown_property(entity: impl Into<String>, property: impl Into<String>) -> Self {
        Self::UnknownProperty {
            entity: entity.into(),
            property: property.into(),
        }
    }
}

/// Result type alias for storq operations.
pub type StorqResult<T> = Result<T, StorqError>;
