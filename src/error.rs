use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;
use uuid::Uuid;

/// Failures raised by a [`ListsRepository`](crate::repository::ListsRepository).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("list {0} does not exist")]
    ListMissing(Uuid),

    #[error("item {item_id} does not exist in list {list_id}")]
    ItemMissing { list_id: Uuid, item_id: Uuid },
}

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Resource not found")]
    NotFound,

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NotFound => StatusCode::NOT_FOUND.into_response(),
            AppError::Repository(err) => {
                error!("Repository error: {}", err);
                let status = StatusCode::INTERNAL_SERVER_ERROR;
                let body = Json(json!({
                    "error": err.to_string(),
                    "status": status.as_u16(),
                }));

                (status, body).into_response()
            }
        }
    }
}

/// Result type alias for application errors
pub type AppResult<T> = Result<T, AppError>;

/// Result type alias for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    #[tokio::test]
    async fn not_found_has_empty_body() {
        let response = AppError::NotFound.into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn repository_error_maps_to_500() {
        let list_id = Uuid::new_v4();
        let response = AppError::from(RepositoryError::ListMissing(list_id)).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], 500);
        assert!(json["error"].as_str().unwrap().contains(&list_id.to_string()));
    }
}
