use thiserror::Error;

use crate::db::PersistenceError;

/// A required field was absent or blank.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{entity_type}: {field} is required")]
    MissingField {
        entity_type: &'static str,
        field: &'static str,
    },

    #[error("{entity_type}: {field} must be a finite, non-negative number")]
    InvalidAmount {
        entity_type: &'static str,
        field: &'static str,
    },
}

impl ValidationError {
    pub(crate) fn missing(entity_type: &'static str, field: &'static str) -> Self {
        Self::MissingField { entity_type, field }
    }
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: &'static str, id: u64 },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("No {entity_type} id left above {}", u64::MAX)]
    IdsExhausted { entity_type: &'static str },

    #[error("Invalid enum value for {field}: {value}")]
    InvalidEnum { field: String, value: String },

    /// The in-memory change stands; only the durable write failed.
    #[error("{entity_type} {id} changed in memory but was not saved: {source}")]
    NotPersisted {
        entity_type: &'static str,
        id: u64,
        #[source]
        source: PersistenceError,
    },

    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    #[error("Export failed: {0}")]
    Export(String),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
