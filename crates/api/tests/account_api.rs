//! Integration tests for `/api/v1/account` and its role rules.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, create_user, delete_auth, get, get_auth, post_json, post_json_auth, put_json_auth,
    token_for, ADMIN_ROLE_ID, USER_ROLE_ID,
};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn admin_lists_accounts(pool: PgPool) {
    let admin = create_user(&pool, "boss", ADMIN_ROLE_ID).await;
    create_user(&pool, "client", USER_ROLE_ID).await;
    let app = common::build_test_app(pool);

    let response = get_auth(app, "/api/v1/account", &token_for(admin.id, "admin")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn regular_user_cannot_list_accounts(pool: PgPool) {
    let user = create_user(&pool, "client", USER_ROLE_ID).await;
    let app = common::build_test_app(pool);

    let response = get_auth(app, "/api/v1/account", &token_for(user.id, "user")).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn listing_without_token_returns_401(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app, "/api/v1/account").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn paged_listing_reports_total(pool: PgPool) {
    let admin = create_user(&pool, "boss", ADMIN_ROLE_ID).await;
    for i in 0..3 {
        create_user(&pool, &format!("client{i}"), USER_ROLE_ID).await;
    }
    let app = common::build_test_app(pool);

    let response = get_auth(
        app,
        "/api/v1/account/page/1/2",
        &token_for(admin.id, "admin"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["total"], 4);
    assert_eq!(json["skip"], 1);
    assert_eq!(json["top"], 2);
    assert_eq!(json["data"].as_array().unwrap().len(), 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn admin_creates_account_that_can_log_in(pool: PgPool) {
    let admin = create_user(&pool, "boss", ADMIN_ROLE_ID).await;

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/api/v1/account",
        json!({
            "username": "newclient",
            "email": "newclient@example.com",
            "password": "a-long-enough-password",
        }),
        &token_for(admin.id, "admin"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["role"], "user");

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/auth/login",
        json!({ "username": "newclient", "password": "a-long-enough-password" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_rejects_short_password_and_bad_email(pool: PgPool) {
    let admin = create_user(&pool, "boss", ADMIN_ROLE_ID).await;
    let token = token_for(admin.id, "admin");

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/api/v1/account",
        json!({ "username": "shorty", "email": "shorty@example.com", "password": "short" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        "/api/v1/account",
        json!({ "username": "noemail", "email": "not-an-email", "password": "long-enough-pass" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_username_returns_409(pool: PgPool) {
    let admin = create_user(&pool, "boss", ADMIN_ROLE_ID).await;
    create_user(&pool, "taken", USER_ROLE_ID).await;
    let app = common::build_test_app(pool);

    let response = post_json_auth(
        app,
        "/api/v1/account",
        json!({ "username": "taken", "email": "other@example.com", "password": "long-enough-pass" }),
        &token_for(admin.id, "admin"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn user_reads_own_account_but_not_others(pool: PgPool) {
    let me = create_user(&pool, "me", USER_ROLE_ID).await;
    let other = create_user(&pool, "other", USER_ROLE_ID).await;
    let token = token_for(me.id, "user");

    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, &format!("/api/v1/account/{}", me.id), &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let app = common::build_test_app(pool);
    let response = get_auth(app, &format!("/api/v1/account/{}", other.id), &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn user_cannot_promote_themselves(pool: PgPool) {
    let me = create_user(&pool, "me", USER_ROLE_ID).await;
    let app = common::build_test_app(pool);

    let response = put_json_auth(
        app,
        &format!("/api/v1/account/{}", me.id),
        json!({ "role": "admin" }),
        &token_for(me.id, "user"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn user_updates_own_name(pool: PgPool) {
    let me = create_user(&pool, "me", USER_ROLE_ID).await;
    let app = common::build_test_app(pool);

    let response = put_json_auth(
        app,
        &format!("/api/v1/account/{}", me.id),
        json!({ "first_name": "Ada" }),
        &token_for(me.id, "user"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["first_name"], "Ada");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn deactivated_account_cannot_log_in(pool: PgPool) {
    let admin = create_user(&pool, "boss", ADMIN_ROLE_ID).await;
    let client = create_user(&pool, "client", USER_ROLE_ID).await;

    let app = common::build_test_app(pool.clone());
    let response = delete_auth(
        app,
        &format!("/api/v1/account/{}", client.id),
        &token_for(admin.id, "admin"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/auth/login",
        json!({ "username": "client", "password": common::TEST_PASSWORD }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn admin_cannot_deactivate_self(pool: PgPool) {
    let admin = create_user(&pool, "boss", ADMIN_ROLE_ID).await;
    let app = common::build_test_app(pool);

    let response = delete_auth(
        app,
        &format!("/api/v1/account/{}", admin.id),
        &token_for(admin.id, "admin"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn reset_password_replaces_credentials(pool: PgPool) {
    let admin = create_user(&pool, "boss", ADMIN_ROLE_ID).await;
    let client = create_user(&pool, "client", USER_ROLE_ID).await;

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        &format!("/api/v1/account/{}/reset-password", client.id),
        json!({ "new_password": "brand-new-password" }),
        &token_for(admin.id, "admin"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/auth/login",
        json!({ "username": "client", "password": "brand-new-password" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}
