use crate::model::Id;
use serde::{Deserialize, Serialize};

/// Identity attached to a request once its bearer token has been verified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    pub user_id: Id,
}

impl AuthUser {
    pub fn new(user_id: impl Into<Id>) -> Self {
        Self {
            user_id: user_id.into(),
        }
    }

    /// True when this identity owns a resource referencing `owner_id`.
    pub fn owns(&self, owner_id: &str) -> bool {
        self.user_id == owner_id
    }
}
