use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Every failure a request can surface. Each variant maps to one HTTP
/// status; nothing here is retried or recovered locally.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("an account already exists for {email}")]
    DuplicateAccount { email: String },

    #[error("no account found for {email}")]
    AccountNotFound { email: String },

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("user record query failed")]
    StoreQueryFailed(#[source] sqlx::Error),

    #[error("user record write failed")]
    StoreWriteFailed(#[source] sqlx::Error),

    #[error("user record delete failed")]
    DeleteFailed(#[source] sqlx::Error),

    #[error("{0}")]
    Validation(&'static str),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::DuplicateAccount { .. } => StatusCode::CONFLICT,
            ApiError::AccountNotFound { .. } => StatusCode::UNAUTHORIZED,
            ApiError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            ApiError::StoreQueryFailed(_)
            | ApiError::StoreWriteFailed(_)
            | ApiError::DeleteFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message returned to the client. Store errors are collapsed to a
    /// generic line so driver details never leak.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::StoreQueryFailed(_)
            | ApiError::StoreWriteFailed(_)
            | ApiError::DeleteFailed(_)
            | ApiError::Internal(_) => "internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::StoreQueryFailed(source)
            | ApiError::StoreWriteFailed(source)
            | ApiError::DeleteFailed(source) => {
                tracing::error!(error = %source, "{}", self);
            }
            ApiError::Internal(source) => {
                tracing::error!("internal error: {:#}", source);
            }
            ApiError::DuplicateAccount { .. } => {
                tracing::warn!("conflict: {}", self);
            }
            ApiError::AccountNotFound { .. } | ApiError::InvalidCredentials => {
                tracing::info!("auth failure: {}", self);
            }
            ApiError::Validation(_) => {
                tracing::debug!("client error: {}", self);
            }
        }

        let body = json!({ "message": self.user_message() });
        (self.status_code(), axum::Json(body)).into_response()
    }
}

/// Type alias for handler results.
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_per_kind() {
        assert_eq!(
            ApiError::DuplicateAccount { email: "a@x.com".into() }.status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::AccountNotFound { email: "a@x.com".into() }.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(ApiError::InvalidCredentials.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            ApiError::Validation("email is required").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::StoreQueryFailed(sqlx::Error::PoolTimedOut).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::DeleteFailed(sqlx::Error::PoolTimedOut).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn store_errors_do_not_leak_details() {
        let err = ApiError::StoreWriteFailed(sqlx::Error::PoolTimedOut);
        assert_eq!(err.user_message(), "internal server error");
    }

    #[test]
    fn auth_failures_are_distinguishable() {
        let missing = ApiError::AccountNotFound { email: "a@x.com".into() };
        let mismatch = ApiError::InvalidCredentials;
        assert_eq!(missing.status_code(), mismatch.status_code());
        assert_ne!(missing.user_message(), mismatch.user_message());
    }
}
