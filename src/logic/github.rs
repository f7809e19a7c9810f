use anyhow::Context;
use log::{debug, error};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};

use crate::config::GitHubConfig;
use crate::logic::error::{OpError, OpResult};
use crate::logic::validate;

/// Passthrough to the GitHub REST API for a user's latest repositories.
///
/// One attempt per request; failures surface to the caller unchanged.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: reqwest::Client,
    api_base_url: String,
}

impl GitHubClient {
    pub fn new(config: &GitHubConfig) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        if let Some(token) = &config.token {
            let value = HeaderValue::from_str(&format!("token {}", token))
                .context("GitHub token is not a valid header value")?;
            headers.insert(AUTHORIZATION, value);
        }

        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .build()
            .context("Failed to build GitHub HTTP client")?;

        Ok(Self {
            http,
            api_base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// The five most recently created public repositories of `username`
    pub async fn recent_repos(&self, username: &str) -> OpResult<serde_json::Value> {
        validate::github_username(username)?;

        let url = format!(
            "{}/users/{}/repos?per_page=5&sort=created:asc",
            self.api_base_url, username
        );
        debug!("GET {}", url);

        let response = self.http.get(&url).send().await.map_err(|e| {
            error!("GitHub request for {} failed: {}", username, e);
            OpError::Upstream(e.to_string())
        })?;

        if !response.status().is_success() {
            debug!("GitHub answered {} for {}", response.status(), username);
            return Err(OpError::NotFound("No GitHub profile found".to_string()));
        }

        response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| OpError::Upstream(e.to_string()))
    }
}
