use itertools::Itertools;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::auth::AuthError;
use crate::store::StoreError;

/// One rejected input field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldError {
    pub msg: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub param: Option<String>,
}

impl FieldError {
    pub fn new(param: &str, msg: impl Into<String>) -> Self {
        Self {
            msg: msg.into(),
            param: Some(param.to_string()),
        }
    }

    /// A message not tied to a single field.
    pub fn general(msg: impl Into<String>) -> Self {
        Self {
            msg: msg.into(),
            param: None,
        }
    }
}

/// Failure of a profile, post or account operation.
#[derive(Debug, Error)]
pub enum OpError {
    /// Input rejected before touching the store.
    #[error("validation failed: {}", .0.iter().map(|e| e.msg.as_str()).join("; "))]
    Validation(Vec<FieldError>),

    /// Registration or login refused (duplicate account, bad credentials).
    #[error("{0}")]
    AccountRejected(String),

    #[error("{0}")]
    NotFound(String),

    /// Request conflicts with the current state (already liked, ...).
    #[error("{0}")]
    Conflict(String),

    /// The acting user does not own the resource.
    #[error("{0}")]
    Unauthorized(String),

    /// Another request saved the same document first.
    #[error("resource was modified concurrently")]
    ConcurrentModification,

    #[error("upstream request failed: {0}")]
    Upstream(String),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Store(anyhow::Error),
}

impl From<anyhow::Error> for OpError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast_ref::<StoreError>() {
            Some(StoreError::VersionConflict { .. }) => OpError::ConcurrentModification,
            Some(StoreError::Duplicate { .. }) => OpError::Conflict(err.to_string()),
            None => OpError::Store(err),
        }
    }
}

pub type OpResult<T> = Result<T, OpError>;
