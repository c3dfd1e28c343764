//! Handlers for the `/auth` resource (login, refresh, logout).

use axum::extract::State;
use axum::http::header::USER_AGENT;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use chrono::Utc;
use salon_db::models::session::{ClientInfo, NewRefreshSession};
use salon_db::models::user::{User, UserResponse};
use salon_db::repositories::{RoleRepo, SessionRepo, UserRepo};
use serde::{Deserialize, Serialize};

use crate::auth::jwt::{generate_access_token, generate_refresh_token, hash_refresh_token};
use crate::auth::password::verify_password;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAuth;
use crate::state::AppState;

/// Consecutive failed logins that lock an account.
const MAX_FAILED_ATTEMPTS: i32 = 5;

/// Minutes an account stays locked after too many failed logins.
const LOCK_DURATION_MINS: i64 = 15;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: &'static str,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserResponse,
}

/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let user = UserRepo::find_by_username(&state.pool, &input.username)
        .await?
        .ok_or_else(|| AppError::unauthorized("Invalid username or password"))?;

    if !user.is_active {
        return Err(AppError::forbidden("Account is deactivated"));
    }

    if user.locked_until.is_some_and(|until| until > Utc::now()) {
        return Err(AppError::forbidden(
            "Account is temporarily locked. Try again later.",
        ));
    }

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        let failures = UserRepo::increment_failed_login(&state.pool, user.id).await?;
        if failures >= MAX_FAILED_ATTEMPTS {
            let until = Utc::now() + chrono::Duration::minutes(LOCK_DURATION_MINS);
            UserRepo::lock_account(&state.pool, user.id, until).await?;
            tracing::warn!(user_id = user.id, failures, "Account locked after failed logins");
        }
        return Err(AppError::unauthorized("Invalid username or password"));
    }

    UserRepo::record_successful_login(&state.pool, user.id).await?;
    tracing::info!(user_id = user.id, "User logged in");

    Ok(Json(issue_tokens(&state, &user, &headers).await?))
}

/// POST /api/v1/auth/refresh
///
/// Rotates the refresh token: the presented one is redeemed (and so revoked)
/// and a new pair issued. A token can be redeemed once.
pub async fn refresh(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(input): Json<RefreshRequest>,
) -> AppResult<Json<AuthResponse>> {
    let hash = hash_refresh_token(&input.refresh_token);

    let session = SessionRepo::redeem(&state.pool, &hash)
        .await?
        .ok_or_else(|| AppError::unauthorized("Invalid or expired refresh token"))?;

    let user = UserRepo::find_by_id(&state.pool, session.user_id)
        .await?
        .ok_or_else(|| AppError::unauthorized("User no longer exists"))?;

    if !user.is_active {
        return Err(AppError::forbidden("Account is deactivated"));
    }

    Ok(Json(issue_tokens(&state, &user, &headers).await?))
}

/// POST /api/v1/auth/logout
///
/// Revokes every session of the caller. Returns 204 No Content.
pub async fn logout(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> AppResult<StatusCode> {
    let revoked = SessionRepo::revoke_all_for_user(&state.pool, user.user_id).await?;
    tracing::info!(user_id = user.user_id, revoked, "User logged out");
    Ok(StatusCode::NO_CONTENT)
}

async fn issue_tokens(
    state: &AppState,
    user: &User,
    headers: &HeaderMap,
) -> AppResult<AuthResponse> {
    let role = RoleRepo::name_of(&state.pool, user.role_id).await?;
    let jwt = &state.config.jwt;

    let access_token = generate_access_token(user.id, &role, jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    let (refresh_token, refresh_token_hash) = generate_refresh_token();

    SessionRepo::create(
        &state.pool,
        &NewRefreshSession {
            user_id: user.id,
            refresh_token_hash,
            expires_at: Utc::now() + chrono::Duration::days(jwt.refresh_token_expiry_days),
            client: client_info(headers),
        },
    )
    .await?;

    Ok(AuthResponse {
        access_token,
        refresh_token,
        token_type: "Bearer",
        expires_in: jwt.access_token_expiry_mins * 60,
        user: user.to_response(role),
    })
}

fn client_info(headers: &HeaderMap) -> ClientInfo {
    ClientInfo {
        user_agent: header_str(headers, USER_AGENT.as_str()).map(str::to_string),
        ip_address: header_str(headers, "x-forwarded-for")
            .and_then(|v| v.split(',').next())
            .map(|ip| ip.trim().to_string())
            .filter(|ip| !ip.is_empty()),
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}
