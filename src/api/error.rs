use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use log::error;
use serde::Serialize;

use crate::logic::{FieldError, OpError};

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub msg: String,
}

impl MessageResponse {
    pub fn new(message: &str) -> Self {
        Self {
            msg: message.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ValidationErrorResponse {
    pub errors: Vec<FieldError>,
}

/// Handler error: an operation failure rendered as a JSON response.
#[derive(Debug)]
pub struct ApiError(pub OpError);

pub type ApiResult<T> = Result<Json<T>, ApiError>;

impl From<OpError> for ApiError {
    fn from(err: OpError) -> Self {
        Self(err)
    }
}

/// Unreadable bodies are reported in the validation error shape.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(OpError::Validation(vec![FieldError::general(
            rejection.body_text(),
        )]))
    }
}

impl ApiError {
    pub fn unauthorized(message: &str) -> Self {
        Self(OpError::Unauthorized(message.to_string()))
    }

    pub fn status(&self) -> StatusCode {
        match &self.0 {
            OpError::Validation(_) | OpError::AccountRejected(_) | OpError::Conflict(_) => {
                StatusCode::BAD_REQUEST
            }
            OpError::NotFound(_) => StatusCode::NOT_FOUND,
            OpError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            OpError::ConcurrentModification => StatusCode::CONFLICT,
            OpError::Upstream(_) | OpError::Auth(_) | OpError::Store(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self.0 {
            OpError::Validation(errors) => {
                (status, Json(ValidationErrorResponse { errors })).into_response()
            }
            OpError::AccountRejected(msg) => (
                status,
                Json(ValidationErrorResponse {
                    errors: vec![FieldError::general(msg)],
                }),
            )
                .into_response(),
            OpError::NotFound(msg) | OpError::Conflict(msg) | OpError::Unauthorized(msg) => {
                (status, Json(MessageResponse::new(&msg))).into_response()
            }
            OpError::ConcurrentModification => (
                status,
                Json(MessageResponse::new(
                    "Resource was modified concurrently, retry the request",
                )),
            )
                .into_response(),
            other => {
                error!("Request failed: {:#}", other);
                (status, Json(MessageResponse::new("Server error"))).into_response()
            }
        }
    }
}
