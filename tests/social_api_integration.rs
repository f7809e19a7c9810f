use devconnector_rust::config::{AppConfig, StoreBackend};
use devconnector_rust::{build_app, MemoryStore};
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::net::TcpListener;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// Test client wrapper for making API calls
struct TestClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl TestClient {
    fn new(base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
            token: None,
        }
    }

    fn as_user(&self, token: &str) -> Self {
        Self {
            client: self.client.clone(),
            base_url: self.base_url.clone(),
            token: Some(token.to_string()),
        }
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let builder = self
            .client
            .request(method, format!("{}{}", self.base_url, path));
        match &self.token {
            Some(token) => builder.header("x-auth-token", token),
            None => builder,
        }
    }

    async fn post(&self, path: &str, json: Value) -> reqwest::Result<reqwest::Response> {
        self.request(reqwest::Method::POST, path).json(&json).send().await
    }

    async fn put(&self, path: &str, json: Value) -> reqwest::Result<reqwest::Response> {
        self.request(reqwest::Method::PUT, path).json(&json).send().await
    }

    async fn get(&self, path: &str) -> reqwest::Result<reqwest::Response> {
        self.request(reqwest::Method::GET, path).send().await
    }

    async fn delete(&self, path: &str) -> reqwest::Result<reqwest::Response> {
        self.request(reqwest::Method::DELETE, path).send().await
    }
}

/// Serve the app on an ephemeral port backed by a fresh in-memory store.
async fn spawn_app(github_base_url: Option<String>) -> TestClient {
    let mut config = AppConfig::default();
    config.database.backend = StoreBackend::Memory;
    config.auth.jwt_secret = "integration-secret".to_string();
    if let Some(url) = github_base_url {
        config.github.api_base_url = url;
    }

    let app = build_app(Arc::new(MemoryStore::new()), &config).unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestClient::new(format!("http://{}", address))
}

async fn register(client: &TestClient, name: &str) -> TestClient {
    let response = client
        .post(
            "/api/users",
            json!({
                "name": name,
                "email": format!("{}@example.com", name.to_lowercase()),
                "password": "secret123"
            }),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    let token = body["token"].as_str().expect("token in response");
    client.as_user(token)
}

async fn json_of(response: reqwest::Response) -> Value {
    response.json().await.unwrap()
}

#[tokio::test]
async fn test_root_and_health() {
    let client = spawn_app(None).await;

    let response = client.get("/").await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.text().await.unwrap(), "API Running");

    let body = json_of(client.get("/health").await.unwrap()).await;
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_register_login_and_current_user() {
    let client = spawn_app(None).await;
    let ada = register(&client, "Ada").await;

    let again = client
        .post(
            "/api/users",
            json!({"name": "Ada", "email": "ADA@example.com", "password": "secret123"}),
        )
        .await
        .unwrap();
    assert_eq!(again.status(), StatusCode::BAD_REQUEST);
    let body = json_of(again).await;
    assert_eq!(body["errors"][0]["msg"], "User already exists");

    let me = json_of(ada.get("/api/auth").await.unwrap()).await;
    assert_eq!(me["name"], "Ada");
    assert_eq!(me["email"], "ada@example.com");
    assert!(me.get("password").is_none());
    assert!(me["_id"].is_string());

    let login = client
        .post(
            "/api/auth",
            json!({"email": "ada@example.com", "password": "secret123"}),
        )
        .await
        .unwrap();
    assert_eq!(login.status(), StatusCode::OK);
    assert!(json_of(login).await["token"].is_string());

    let bad = client
        .post(
            "/api/auth",
            json!({"email": "ada@example.com", "password": "wrong-password"}),
        )
        .await
        .unwrap();
    assert_eq!(bad.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_of(bad).await["errors"][0]["msg"], "Invalid credentials");
}

#[tokio::test]
async fn test_registration_validation_lists_every_field() {
    let client = spawn_app(None).await;
    let response = client
        .post("/api/users", json!({"email": "not-an-email", "password": "123"}))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_of(response).await;
    let params: Vec<&str> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|e| e["param"].as_str())
        .collect();
    assert!(params.contains(&"name"));
    assert!(params.contains(&"email"));
    assert!(params.contains(&"password"));
}

#[tokio::test]
async fn test_unreadable_bodies_use_the_validation_shape() {
    let client = spawn_app(None).await;

    let wrong_type = client
        .post(
            "/api/users",
            json!({"name": 5, "email": "ada@example.com", "password": "secret123"}),
        )
        .await
        .unwrap();
    assert_eq!(wrong_type.status(), StatusCode::BAD_REQUEST);
    let body = json_of(wrong_type).await;
    assert!(body["errors"][0]["msg"].is_string());

    let no_content_type = client
        .request(reqwest::Method::POST, "/api/auth")
        .body(r#"{"email":"ada@example.com","password":"secret123"}"#)
        .send()
        .await
        .unwrap();
    assert_eq!(no_content_type.status(), StatusCode::BAD_REQUEST);
    assert!(json_of(no_content_type).await["errors"][0]["msg"].is_string());

    let ada = register(&client, "Ada").await;
    ada.post("/api/profile", json!({"status": "Dev", "skills": "rust"}))
        .await
        .unwrap();
    let bad_flag = ada
        .put(
            "/api/profile/education",
            json!({
                "school": "MIT",
                "degree": "BSc",
                "fieldofstudy": "CS",
                "from": "2010-09-01",
                "current": "false"
            }),
        )
        .await
        .unwrap();
    assert_eq!(bad_flag.status(), StatusCode::BAD_REQUEST);
    assert!(json_of(bad_flag).await["errors"].is_array());
}

#[tokio::test]
async fn test_protected_routes_require_token() {
    let client = spawn_app(None).await;

    let response = client.get("/api/auth").await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        json_of(response).await["msg"],
        "No token, authorization denied"
    );

    let response = client.as_user("garbage").get("/api/post").await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(json_of(response).await["msg"], "Token is not valid");
}

#[tokio::test]
async fn test_profile_lifecycle_with_experience() {
    let client = spawn_app(None).await;
    let ada = register(&client, "Ada").await;

    let missing = ada.get("/api/profile/my").await.unwrap();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);

    let profile = ada
        .post(
            "/api/profile",
            json!({"status": "Developer", "skills": "rust, sql , ", "twitter": "https://twitter.com/ada"}),
        )
        .await
        .unwrap();
    assert_eq!(profile.status(), StatusCode::OK);
    let profile = json_of(profile).await;
    assert_eq!(profile["skills"], json!(["rust", "sql"]));
    assert_eq!(profile["social"]["twitter"], "https://twitter.com/ada");

    for title in ["Intern", "Engineer"] {
        let response = ada
            .put(
                "/api/profile/experience",
                json!({"title": title, "company": "Acme", "from": "2019-06-01"}),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let mine = json_of(ada.get("/api/profile/my").await.unwrap()).await;
    assert_eq!(mine["user"]["name"], "Ada");
    assert_eq!(mine["experience"][0]["title"], "Engineer");
    assert_eq!(mine["experience"][1]["title"], "Intern");

    let exp_id = mine["experience"][1]["_id"].as_str().unwrap().to_string();
    let after = json_of(
        ada.delete(&format!("/api/profile/experience/{}", exp_id))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(after["experience"].as_array().unwrap().len(), 1);
    assert_eq!(after["experience"][0]["title"], "Engineer");

    let public = client
        .get(&format!("/api/profile/user/{}", mine["user"]["_id"].as_str().unwrap()))
        .await
        .unwrap();
    assert_eq!(public.status(), StatusCode::OK);

    let all = json_of(client.get("/api/profile").await.unwrap()).await;
    assert_eq!(all.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_delete_account_removes_everything() {
    let client = spawn_app(None).await;
    let ada = register(&client, "Ada").await;
    let bob = register(&client, "Bob").await;

    ada.post("/api/profile", json!({"status": "Dev", "skills": "rust"}))
        .await
        .unwrap();
    ada.post("/api/post", json!({"text": "bye"})).await.unwrap();

    let response = ada.delete("/api/profile").await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_of(response).await["msg"], "User deleted");

    let posts = json_of(bob.get("/api/post").await.unwrap()).await;
    assert!(posts.as_array().unwrap().is_empty());
    let profiles = json_of(client.get("/api/profile").await.unwrap()).await;
    assert!(profiles.as_array().unwrap().is_empty());

    let login = client
        .post(
            "/api/auth",
            json!({"email": "ada@example.com", "password": "secret123"}),
        )
        .await
        .unwrap();
    assert_eq!(login.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_posts_likes_and_comments() {
    let client = spawn_app(None).await;
    let ada = register(&client, "Ada").await;
    let bob = register(&client, "Bob").await;

    let post = json_of(ada.post("/api/post", json!({"text": "hello"})).await.unwrap()).await;
    let post_id = post["_id"].as_str().unwrap().to_string();
    assert_eq!(post["name"], "Ada");

    let likes = bob.put(&format!("/api/post/like/{}", post_id), json!({})).await.unwrap();
    assert_eq!(likes.status(), StatusCode::OK);
    assert_eq!(json_of(likes).await.as_array().unwrap().len(), 1);

    let twice = bob.put(&format!("/api/post/like/{}", post_id), json!({})).await.unwrap();
    assert_eq!(twice.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_of(twice).await["msg"], "Post already liked");

    let not_liked = ada
        .put(&format!("/api/post/unlike/{}", post_id), json!({}))
        .await
        .unwrap();
    assert_eq!(not_liked.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_of(not_liked).await["msg"], "Post has not yet been liked");

    let unliked = bob
        .put(&format!("/api/post/unlike/{}", post_id), json!({}))
        .await
        .unwrap();
    assert!(json_of(unliked).await.as_array().unwrap().is_empty());

    bob.put(&format!("/api/post/comment/{}", post_id), json!({"text": "first"}))
        .await
        .unwrap();
    let comments = json_of(
        ada.put(&format!("/api/post/comment/{}", post_id), json!({"text": "second"}))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(comments[0]["text"], "second");
    assert_eq!(comments[1]["text"], "first");
    assert_eq!(comments[1]["name"], "Bob");

    let bobs_comment = comments[1]["_id"].as_str().unwrap();
    let forbidden = ada
        .delete(&format!("/api/post/comment/{}/{}", post_id, bobs_comment))
        .await
        .unwrap();
    assert_eq!(forbidden.status(), StatusCode::UNAUTHORIZED);

    let remaining = json_of(
        bob.delete(&format!("/api/post/comment/{}/{}", post_id, bobs_comment))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(remaining.as_array().unwrap().len(), 1);
    assert_eq!(remaining[0]["text"], "second");

    let missing = bob
        .delete(&format!("/api/post/comment/{}/{}", post_id, "nope"))
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_only_owner_edits_or_deletes_post() {
    let client = spawn_app(None).await;
    let ada = register(&client, "Ada").await;
    let bob = register(&client, "Bob").await;

    let post = json_of(ada.post("/api/post", json!({"text": "hello"})).await.unwrap()).await;
    let path = format!("/api/post/{}", post["_id"].as_str().unwrap());

    let response = bob.delete(&path).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(json_of(response).await["msg"], "User not authorized");

    let response = bob.post(&path, json!({"text": "hijack"})).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let edited = json_of(ada.post(&path, json!({"text": "edited"})).await.unwrap()).await;
    assert_eq!(edited["text"], "edited");

    let fetched = json_of(bob.get(&path).await.unwrap()).await;
    assert_eq!(fetched["text"], "edited");

    let response = ada.delete(&path).await.unwrap();
    assert_eq!(json_of(response).await["msg"], "Post removed");
    assert_eq!(bob.get(&path).await.unwrap().status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_posts_are_listed_newest_first() {
    let client = spawn_app(None).await;
    let ada = register(&client, "Ada").await;

    for text in ["one", "two", "three"] {
        ada.post("/api/post", json!({"text": text})).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }

    let posts = json_of(ada.get("/api/post").await.unwrap()).await;
    let texts: Vec<&str> = posts
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["text"].as_str().unwrap())
        .collect();
    assert_eq!(texts, vec!["three", "two", "one"]);
}

#[tokio::test]
async fn test_github_repos_are_passed_through() {
    let github = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/octocat/repos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"name": "hello-world"}])))
        .mount(&github)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/nobody/repos"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&github)
        .await;

    let client = spawn_app(Some(github.uri())).await;

    let repos = json_of(client.get("/api/profile/github/octocat").await.unwrap()).await;
    assert_eq!(repos[0]["name"], "hello-world");

    let response = client.get("/api/profile/github/nobody").await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_of(response).await["msg"], "No GitHub profile found");
}
