use axum::extract::FromRef;
use std::sync::Arc;

use crate::auth::TokenManager;
use crate::logic::GitHubClient;

/// Shared handles passed to every handler.
pub struct AppState<S> {
    pub store: Arc<S>,
    pub tokens: Arc<TokenManager>,
    pub github: Arc<GitHubClient>,
}

impl<S> AppState<S> {
    pub fn new(store: Arc<S>, tokens: TokenManager, github: GitHubClient) -> Self {
        Self {
            store,
            tokens: Arc::new(tokens),
            github: Arc::new(github),
        }
    }
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            tokens: Arc::clone(&self.tokens),
            github: Arc::clone(&self.github),
        }
    }
}

impl<S> FromRef<AppState<S>> for Arc<TokenManager> {
    fn from_ref(state: &AppState<S>) -> Self {
        Arc::clone(&state.tokens)
    }
}
