use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::cors::CorsLayer;

use crate::api::state::AppState;
use crate::api::{handlers, post_handlers, profile_handlers};
use crate::store::traits::Store;

pub fn create_router<S: Store + 'static>() -> Router<AppState<S>> {
    Router::new()
        // Health check
        .route("/", get(handlers::api_running))
        .route("/health", get(handlers::health_check))
        // Accounts
        .route("/api/users", post(handlers::register_user::<S>))
        .route(
            "/api/auth",
            get(handlers::get_current_user::<S>).post(handlers::login::<S>),
        )
        // Profiles
        .route(
            "/api/profile",
            get(profile_handlers::list_profiles::<S>)
                .post(profile_handlers::upsert_profile::<S>)
                .delete(profile_handlers::delete_account::<S>),
        )
        .route("/api/profile/my", get(profile_handlers::get_my_profile::<S>))
        .route(
            "/api/profile/user/:user_id",
            get(profile_handlers::get_profile_by_user::<S>),
        )
        .route(
            "/api/profile/experience",
            put(profile_handlers::add_experience::<S>),
        )
        .route(
            "/api/profile/experience/:exp_id",
            delete(profile_handlers::delete_experience::<S>),
        )
        .route(
            "/api/profile/education",
            put(profile_handlers::add_education::<S>),
        )
        .route(
            "/api/profile/education/:edu_id",
            delete(profile_handlers::delete_education::<S>),
        )
        .route(
            "/api/profile/github/:username",
            get(profile_handlers::get_github_repos::<S>),
        )
        // Posts
        .route(
            "/api/post",
            get(post_handlers::list_posts::<S>).post(post_handlers::create_post::<S>),
        )
        .route(
            "/api/post/:id",
            get(post_handlers::get_post::<S>)
                .post(post_handlers::update_post::<S>)
                .delete(post_handlers::delete_post::<S>),
        )
        .route("/api/post/like/:id", put(post_handlers::like_post::<S>))
        .route("/api/post/unlike/:id", put(post_handlers::unlike_post::<S>))
        .route("/api/post/comment/:id", put(post_handlers::add_comment::<S>))
        .route(
            "/api/post/comment/:id/:comment_id",
            delete(post_handlers::delete_comment::<S>),
        )
        .layer(CorsLayer::permissive())
}
