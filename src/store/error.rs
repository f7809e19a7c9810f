use crate::model::Id;
use thiserror::Error;

/// Store failures callers are expected to react to. Carried inside
/// `anyhow::Error` and recovered with `downcast_ref`.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{entity} {id} was modified concurrently (expected version {expected})")]
    VersionConflict {
        entity: &'static str,
        id: Id,
        expected: i64,
    },

    #[error("{entity} already exists: {key}")]
    Duplicate { entity: &'static str, key: String },
}

impl StoreError {
    pub fn version_conflict(entity: &'static str, id: impl Into<Id>, expected: i64) -> Self {
        Self::VersionConflict {
            entity,
            id: id.into(),
            expected,
        }
    }

    pub fn duplicate(entity: &'static str, key: impl Into<String>) -> Self {
        Self::Duplicate {
            entity,
            key: key.into(),
        }
    }
}
