use axum::{
    extract::{Path, State},
    response::Json,
};

use crate::api::error::{ApiResult, MessageResponse};
use crate::api::json_extractor::ValidJson;
use crate::api::state::AppState;
use crate::logic::PostOperations;
use crate::model::{AuthUser, Comment, Id, Like, Post, TextBody};
use crate::store::traits::Store;

/// POST /api/post
pub async fn create_post<S: Store>(
    State(state): State<AppState<S>>,
    auth: AuthUser,
    ValidJson(body): ValidJson<TextBody>,
) -> ApiResult<Post> {
    Ok(Json(PostOperations::create(&*state.store, &auth, &body).await?))
}

/// GET /api/post
pub async fn list_posts<S: Store>(
    State(state): State<AppState<S>>,
    _auth: AuthUser,
) -> ApiResult<Vec<Post>> {
    Ok(Json(PostOperations::list(&*state.store).await?))
}

/// GET /api/post/:id
pub async fn get_post<S: Store>(
    State(state): State<AppState<S>>,
    _auth: AuthUser,
    Path(post_id): Path<Id>,
) -> ApiResult<Post> {
    Ok(Json(PostOperations::get(&*state.store, &post_id).await?))
}

/// POST /api/post/:id
pub async fn update_post<S: Store>(
    State(state): State<AppState<S>>,
    auth: AuthUser,
    Path(post_id): Path<Id>,
    ValidJson(body): ValidJson<TextBody>,
) -> ApiResult<Post> {
    Ok(Json(
        PostOperations::update(&*state.store, &auth, &post_id, &body).await?,
    ))
}

/// DELETE /api/post/:id
pub async fn delete_post<S: Store>(
    State(state): State<AppState<S>>,
    auth: AuthUser,
    Path(post_id): Path<Id>,
) -> ApiResult<MessageResponse> {
    PostOperations::delete(&*state.store, &auth, &post_id).await?;
    Ok(Json(MessageResponse::new("Post removed")))
}

/// PUT /api/post/like/:id
pub async fn like_post<S: Store>(
    State(state): State<AppState<S>>,
    auth: AuthUser,
    Path(post_id): Path<Id>,
) -> ApiResult<Vec<Like>> {
    Ok(Json(PostOperations::like(&*state.store, &auth, &post_id).await?))
}

/// PUT /api/post/unlike/:id
pub async fn unlike_post<S: Store>(
    State(state): State<AppState<S>>,
    auth: AuthUser,
    Path(post_id): Path<Id>,
) -> ApiResult<Vec<Like>> {
    Ok(Json(PostOperations::unlike(&*state.store, &auth, &post_id).await?))
}

/// PUT /api/post/comment/:id
pub async fn add_comment<S: Store>(
    State(state): State<AppState<S>>,
    auth: AuthUser,
    Path(post_id): Path<Id>,
    ValidJson(body): ValidJson<TextBody>,
) -> ApiResult<Vec<Comment>> {
    Ok(Json(
        PostOperations::add_comment(&*state.store, &auth, &post_id, &body).await?,
    ))
}

/// DELETE /api/post/comment/:id/:comment_id
pub async fn delete_comment<S: Store>(
    State(state): State<AppState<S>>,
    auth: AuthUser,
    Path((post_id, comment_id)): Path<(Id, Id)>,
) -> ApiResult<Vec<Comment>> {
    Ok(Json(
        PostOperations::remove_comment(&*state.store, &auth, &post_id, &comment_id).await?,
    ))
}
