use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use todo_store::StoreError;
use todo_types::ValidationError;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServerResult<T> = Result<T, ServerError>;

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(ValidationError::IdParse { .. }) => StatusCode::BAD_REQUEST,
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Store(err) if err.is_not_found() => StatusCode::NOT_FOUND,
            Self::Store(_) | Self::Config(_) | Self::Io(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use todo_types::{ListId, NameKind};

    #[test]
    fn status_mapping() {
        let invalid = ServerError::from(ValidationError::NameLength {
            kind: NameKind::List,
            length: 0,
        });
        assert_eq!(invalid.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let missing = ServerError::from(StoreError::ListNotFound {
            list_id: ListId::new(1),
        });
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);

        let bad_id = ServerError::from("x".parse::<ListId>().unwrap_err());
        assert_eq!(bad_id.status(), StatusCode::BAD_REQUEST);

        let fault = ServerError::from(StoreError::Session("broken".into()));
        assert_eq!(fault.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn validation_message_passes_through() {
        let err = ServerError::from(ValidationError::DuplicateListName {
            name: "Groceries".into(),
        });
        assert_eq!(err.to_string(), "List name must be unique.");
    }
}
