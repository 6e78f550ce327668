use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Authentication failures raised while checking the `Authorization` header.
///
/// Every variant maps to 401 with a coarse machine code; the response never
/// says which check failed beyond that category.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("authorization header is missing")]
    MissingToken,
    #[error("malformed authorization header")]
    MalformedHeader,
    #[error("token has expired")]
    TokenExpired,
    #[error("invalid token")]
    InvalidToken,
}

impl AuthError {
    fn code(&self) -> &'static str {
        match self {
            AuthError::MissingToken => "MISSING_TOKEN",
            AuthError::MalformedHeader => "MALFORMED_AUTH_HEADER",
            AuthError::TokenExpired => "TOKEN_EXPIRED",
            AuthError::InvalidToken => "INVALID_TOKEN",
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": { "code": self.code(), "message": self.to_string() }
        }));
        (StatusCode::UNAUTHORIZED, body).into_response()
    }
}

/// Crate-wide error type. All entity operations return `prelude::Result`
/// built on this enum, one failure discipline everywhere.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("{0} already exists")]
    Duplicate(&'static str),
    #[error("record not found")]
    NotFound,
    #[error("invalid email or password")]
    Credentials,
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error("database error")]
    Database(#[from] sqlx::Error),
    #[error("migration error")]
    Migrate(#[from] sqlx::migrate::MigrateError),
    #[error("password hashing failed")]
    Hash,
    #[error("token signing failed")]
    Token(#[from] jsonwebtoken::errors::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, code) = match self {
            Error::Auth(e) => return e.into_response(),
            Error::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_FAILED"),
            Error::Duplicate(_) => (StatusCode::CONFLICT, "DUPLICATE_RECORD"),
            Error::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Error::Credentials => (StatusCode::UNAUTHORIZED, "INVALID_CREDENTIALS"),
            _ => {
                tracing::error!("internal error: {:?}", self);
                let body = Json(json!({
                    "error": { "code": "INTERNAL", "message": "internal server error" }
                }));
                return (StatusCode::INTERNAL_SERVER_ERROR, body).into_response();
            }
        };
        let body = Json(json!({
            "error": { "code": code, "message": self.to_string() }
        }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_errors_all_present_as_unauthorized() {
        for err in [
            AuthError::MissingToken,
            AuthError::MalformedHeader,
            AuthError::TokenExpired,
            AuthError::InvalidToken,
        ] {
            assert_eq!(err.into_response().status(), StatusCode::UNAUTHORIZED);
        }
    }

    #[test]
    fn test_error_status_mapping() {
        assert_eq!(
            Error::Validation("bad".into()).into_response().status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            Error::Duplicate("application").into_response().status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            Error::NotFound.into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            Error::Credentials.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            Error::Hash.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
