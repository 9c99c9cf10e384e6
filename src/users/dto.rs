use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// One row of `GET /users`.
#[derive(Debug, Serialize)]
pub struct UserListItem {
    pub email: String,
    pub role: String,
    pub phone: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created: OffsetDateTime,
}

/// Request body for `POST /users/delete`.
#[derive(Debug, Deserialize)]
pub struct DeleteUserRequest {
    pub email: String,
}

/// Response returned after deletion.
#[derive(Debug, Serialize)]
pub struct DeleteUserResponse {
    pub status: &'static str,
    pub email: String,
}
