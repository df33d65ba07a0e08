use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use verbum_query::{ErrorKind, QueryError};
use verbum_types::TypeError;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("version '{0}' is not supported")]
    UnsupportedVersion(String),

    #[error("missing required parameter '{0}'")]
    MissingParam(&'static str),

    #[error(transparent)]
    Query(#[from] QueryError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ServerError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::UnsupportedVersion(_) | Self::MissingParam(_) => StatusCode::BAD_REQUEST,
            Self::Query(err) => match err.kind() {
                ErrorKind::NotFound => StatusCode::NOT_FOUND,
                ErrorKind::BadRequest => StatusCode::BAD_REQUEST,
            },
            Self::Config(_) | Self::Io(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<TypeError> for ServerError {
    fn from(err: TypeError) -> Self {
        match err {
            TypeError::UnsupportedVersion(code) => Self::UnsupportedVersion(code),
            TypeError::EmptyVersion => Self::UnsupportedVersion(String::new()),
        }
    }
}

/// Error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let body = ErrorResponse {
            error: self.to_string(),
            code: status.as_u16(),
        };
        (status, Json(body)).into_response()
    }
}

pub type ServerResult<T> = Result<T, ServerError>;

#[cfg(test)]
mod tests {
    use super::*;
    use verbum_types::VersionId;

    #[test]
    fn query_errors_map_by_kind() {
        let ara = VersionId::new("ARA").unwrap();
        let not_found = ServerError::from(QueryError::VersionNotFound(ara));
        assert_eq!(not_found.status_code(), StatusCode::NOT_FOUND);
        let bad = ServerError::from(QueryError::EmptyTheme);
        assert_eq!(bad.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn unsupported_version_is_bad_request() {
        let err = ServerError::from(TypeError::UnsupportedVersion("XXX".into()));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "version 'XXX' is not supported");
    }

    #[test]
    fn query_messages_pass_through() {
        let err = ServerError::from(QueryError::InvalidChapter("x".into()));
        assert_eq!(err.to_string(), "chapter must be an integer, got 'x'");
    }

    #[test]
    fn internal_is_500() {
        assert_eq!(
            ServerError::Internal("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
