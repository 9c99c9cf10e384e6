use axum::{
    extract::{FromRef, State},
    routing::post,
    Json, Router,
};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse},
        jwt::JwtKeys,
        password,
    },
    errors::{ApiError, Result},
    state::AppState,
    users::repo::User,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

// Emails are exact identifiers here: no trimming, no case folding.
fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Json<RegisterResponse>> {
    if payload.email.is_empty() {
        return Err(ApiError::Validation("email is required"));
    }
    if payload.password.is_empty() {
        return Err(ApiError::Validation("password is required"));
    }
    if !is_valid_email(&payload.email) {
        warn!(email = %payload.email, "invalid email");
        return Err(ApiError::Validation("invalid email"));
    }

    let hash = password::hash_password(&payload.password)?;

    // Single insert; the store's unique constraint decides duplicate races.
    let user = User::create(&state.db, &payload.email, &hash, &payload.phone, &payload.role).await?;

    info!(user_id = %user.id, email = %user.email, "user registered");
    Ok(Json(RegisterResponse { status: "success", email: user.email }))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    if payload.email.is_empty() {
        return Err(ApiError::Validation("email is required"));
    }
    if payload.password.is_empty() {
        return Err(ApiError::Validation("password is required"));
    }

    let user = User::find_by_email(&state.db, &payload.email)
        .await
        .map_err(ApiError::StoreQueryFailed)?
        .ok_or_else(|| {
            warn!(email = %payload.email, "login unknown email");
            ApiError::AccountNotFound { email: payload.email.clone() }
        })?;

    let ok = password::verify_password(&payload.password, &user.password_hash)?;
    if !ok {
        warn!(email = %payload.email, user_id = %user.id, "login invalid password");
        return Err(ApiError::InvalidCredentials);
    }

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign(user.id, &user.email, &user.role)?;

    info!(user_id = %user.id, email = %user.email, "user logged in");
    Ok(Json(LoginResponse {
        token,
        email: user.email,
        role: user.role,
        user_id: user.id,
    }))
}
