use axum::{extract::State, response::Json};
use serde::Serialize;

use crate::api::error::ApiResult;
use crate::api::json_extractor::ValidJson;
use crate::api::state::AppState;
use crate::logic::AccountOperations;
use crate::model::{Account, AuthUser, Credentials, NewUser, TokenResponse};
use crate::store::traits::Store;

/// Simple health check endpoint
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

pub async fn api_running() -> &'static str {
    "API Running"
}

/// POST /api/users
pub async fn register_user<S: Store>(
    State(state): State<AppState<S>>,
    ValidJson(input): ValidJson<NewUser>,
) -> ApiResult<TokenResponse> {
    let token = AccountOperations::register(&*state.store, &state.tokens, &input).await?;
    Ok(Json(token))
}

/// GET /api/auth
pub async fn get_current_user<S: Store>(
    State(state): State<AppState<S>>,
    auth: AuthUser,
) -> ApiResult<Account> {
    let account = AccountOperations::current(&*state.store, &auth).await?;
    Ok(Json(account))
}

/// POST /api/auth
pub async fn login<S: Store>(
    State(state): State<AppState<S>>,
    ValidJson(credentials): ValidJson<Credentials>,
) -> ApiResult<TokenResponse> {
    let token = AccountOperations::login(&*state.store, &state.tokens, &credentials).await?;
    Ok(Json(token))
}
