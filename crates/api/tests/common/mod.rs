#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use salon_api::auth::jwt::{generate_access_token, JwtConfig};
use salon_api::auth::password::hash_password;
use salon_api::config::{LogFormat, ServerConfig};
use salon_api::router::build_app_router;
use salon_api::state::AppState;
use salon_db::models::user::{CreateUser, User};
use salon_db::repositories::UserRepo;

/// Role ids seeded by the roles migration.
pub const ADMIN_ROLE_ID: i64 = 1;
pub const USER_ROLE_ID: i64 = 2;

/// Password given to every user created through [`create_user`].
pub const TEST_PASSWORD: &str = "correct-horse-battery";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:4200".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 5,
        database_url: "postgres://unused".to_string(),
        db_max_connections: 5,
        log_format: LogFormat::Pretty,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        },
        admin_bootstrap: None,
    }
}

/// Build the production router around the given pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// Insert a user with [`TEST_PASSWORD`] directly through the repository.
pub async fn create_user(pool: &PgPool, username: &str, role_id: i64) -> User {
    let password_hash = hash_password(TEST_PASSWORD).expect("hashing should succeed");
    UserRepo::create(
        pool,
        &CreateUser {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            password_hash,
            first_name: None,
            last_name: None,
            role_id,
        },
    )
    .await
    .expect("user creation should succeed")
}

/// Mint an access token without going through `/auth/login`.
pub fn token_for(user_id: i64, role: &str) -> String {
    generate_access_token(user_id, role, &test_config().jwt).expect("token should encode")
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    let body = match body {
        Some(json) => {
            builder = builder.header(CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    app.oneshot(builder.body(body).expect("request should build"))
        .await
        .expect("router is infallible")
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::DELETE, uri, Some(token), None).await
}
