use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};
use std::sync::Arc;

use crate::api::error::ApiError;
use crate::auth::TokenManager;
use crate::model::AuthUser;

/// Header the web client sends the token in.
pub const AUTH_TOKEN_HEADER: &str = "x-auth-token";

/// Axum extractor for the authenticated caller.
///
/// The token is read from `Authorization: Bearer <token>` or, failing that,
/// from `x-auth-token`. Missing or invalid tokens reject with 401.
#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    Arc<TokenManager>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = extract_token(&parts.headers)
            .ok_or_else(|| ApiError::unauthorized("No token, authorization denied"))?;

        let tokens = Arc::<TokenManager>::from_ref(state);
        let claims = tokens
            .verify(&token)
            .map_err(|_| ApiError::unauthorized("Token is not valid"))?;

        Ok(AuthUser::new(claims.sub))
    }
}

/// Bearer token from the request headers, if any
fn extract_token(headers: &HeaderMap) -> Option<String> {
    let bearer = extract_header_value(headers, AUTHORIZATION.as_str()).and_then(|value| {
        value
            .strip_prefix("Bearer ")
            .map(|token| token.trim().to_string())
    });

    bearer
        .or_else(|| extract_header_value(headers, AUTH_TOKEN_HEADER))
        .filter(|token| !token.is_empty())
}

/// Extract header value as string
fn extract_header_value(headers: &HeaderMap, header_name: &str) -> Option<String> {
    headers
        .get(header_name)
        .and_then(|value| value.to_str().ok())
        .map(|s| s.to_string())
}
