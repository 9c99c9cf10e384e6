use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument};

use crate::{
    errors::{ApiError, Result},
    state::AppState,
    users::{
        dto::{DeleteUserRequest, DeleteUserResponse, UserListItem},
        repo::User,
    },
};

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users))
        .route("/users/delete", post(delete_user))
}

#[instrument(skip(state))]
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<UserListItem>>> {
    let users = User::list(&state.db).await.map_err(ApiError::StoreQueryFailed)?;
    let items = users
        .into_iter()
        .map(|u| UserListItem {
            email: u.email,
            role: u.role,
            phone: u.phone,
            created: u.created_at,
        })
        .collect();
    Ok(Json(items))
}

#[instrument(skip(state, payload))]
pub async fn delete_user(
    State(state): State<AppState>,
    Json(payload): Json<DeleteUserRequest>,
) -> Result<Json<DeleteUserResponse>> {
    if payload.email.is_empty() {
        return Err(ApiError::Validation("email is required"));
    }

    let removed = User::delete_by_email(&state.db, &payload.email)
        .await
        .map_err(ApiError::DeleteFailed)?;

    info!(email = %payload.email, removed, "user records deleted");
    Ok(Json(DeleteUserResponse { status: "deleted", email: payload.email }))
}
