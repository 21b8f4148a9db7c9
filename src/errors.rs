use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    BadRequest(String),
    /// Opaque reason surfaced by the store service, e.g. "no results returned".
    #[error("{0}")]
    Store(&'static str),
    #[error("database error: {0}")]
    DatabaseError(#[source] sqlx::Error),
    #[error("image upload failed: {0}")]
    Upload(String),
    #[error("template error: {0}")]
    Template(#[from] tera::Error),
    #[error("configuration error: {0}")]
    Config(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// A failed form submission, answered as JSON rather than a page.
    #[error("{0}")]
    Mutation(&'static str),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::Store(reason) => (StatusCode::INTERNAL_SERVER_ERROR, reason.to_string()),
            Self::DatabaseError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Database error".to_string())
            }
            Self::Upload(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Upload error".to_string()),
            Self::Template(err) => {
                error!(error = ?err, "failed to render view");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
            Self::Config(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            Self::Io(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string()),
            Self::Mutation(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.to_string()),
        };

        let body = Json(json!({ "error": message }));
        (status, body).into_response()
    }
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        error!("Database error: {:?}", err);
        Self::DatabaseError(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mutation_errors_become_json_500() {
        let response = Error::Mutation("Unable to add item").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn bad_request_keeps_its_message() {
        let err = Error::BadRequest("invalid minimum date".to_string());
        assert_eq!(err.to_string(), "invalid minimum date");
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
