use axum::{
    extract::{Path, State},
    response::Json,
};

use crate::api::error::{ApiResult, MessageResponse};
use crate::api::json_extractor::ValidJson;
use crate::api::state::AppState;
use crate::logic::{AccountOperations, ProfileOperations};
use crate::model::{
    AuthUser, Id, NewEducation, NewExperience, PopulatedProfile, Profile, ProfileFields,
};
use crate::store::traits::Store;

/// GET /api/profile/my
pub async fn get_my_profile<S: Store>(
    State(state): State<AppState<S>>,
    auth: AuthUser,
) -> ApiResult<PopulatedProfile> {
    Ok(Json(ProfileOperations::get_own(&*state.store, &auth).await?))
}

/// POST /api/profile
pub async fn upsert_profile<S: Store>(
    State(state): State<AppState<S>>,
    auth: AuthUser,
    ValidJson(fields): ValidJson<ProfileFields>,
) -> ApiResult<Profile> {
    Ok(Json(
        ProfileOperations::upsert(&*state.store, &auth, &fields).await?,
    ))
}

/// GET /api/profile
pub async fn list_profiles<S: Store>(
    State(state): State<AppState<S>>,
) -> ApiResult<Vec<PopulatedProfile>> {
    Ok(Json(ProfileOperations::list(&*state.store).await?))
}

/// GET /api/profile/user/:user_id
pub async fn get_profile_by_user<S: Store>(
    State(state): State<AppState<S>>,
    Path(user_id): Path<Id>,
) -> ApiResult<PopulatedProfile> {
    Ok(Json(
        ProfileOperations::get_by_user(&*state.store, &user_id).await?,
    ))
}

/// DELETE /api/profile: removes profile, posts and the account itself
pub async fn delete_account<S: Store>(
    State(state): State<AppState<S>>,
    auth: AuthUser,
) -> ApiResult<MessageResponse> {
    AccountOperations::delete_account(&*state.store, &auth).await?;
    Ok(Json(MessageResponse::new("User deleted")))
}

/// PUT /api/profile/experience
pub async fn add_experience<S: Store>(
    State(state): State<AppState<S>>,
    auth: AuthUser,
    ValidJson(input): ValidJson<NewExperience>,
) -> ApiResult<Profile> {
    Ok(Json(
        ProfileOperations::add_experience(&*state.store, &auth, &input).await?,
    ))
}

/// DELETE /api/profile/experience/:exp_id
pub async fn delete_experience<S: Store>(
    State(state): State<AppState<S>>,
    auth: AuthUser,
    Path(exp_id): Path<Id>,
) -> ApiResult<Profile> {
    Ok(Json(
        ProfileOperations::remove_experience(&*state.store, &auth, &exp_id).await?,
    ))
}

/// PUT /api/profile/education
pub async fn add_education<S: Store>(
    State(state): State<AppState<S>>,
    auth: AuthUser,
    ValidJson(input): ValidJson<NewEducation>,
) -> ApiResult<Profile> {
    Ok(Json(
        ProfileOperations::add_education(&*state.store, &auth, &input).await?,
    ))
}

/// DELETE /api/profile/education/:edu_id
pub async fn delete_education<S: Store>(
    State(state): State<AppState<S>>,
    auth: AuthUser,
    Path(edu_id): Path<Id>,
) -> ApiResult<Profile> {
    Ok(Json(
        ProfileOperations::remove_education(&*state.store, &auth, &edu_id).await?,
    ))
}

/// GET /api/profile/github/:username
pub async fn get_github_repos<S: Store>(
    State(state): State<AppState<S>>,
    Path(username): Path<String>,
) -> ApiResult<serde_json::Value> {
    Ok(Json(state.github.recent_repos(&username).await?))
}
