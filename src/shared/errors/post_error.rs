use thiserror::Error;
use axum::{http::StatusCode, Json};
use serde_json::json;
use uuid::Uuid;
use crate::shared::errors::AuthError;

/// 게시글 관련 에러
/// Post-related errors
#[derive(Error, Debug)]
pub enum PostError {
    /// 게시글을 찾을 수 없음
    #[error("Post not found: id={id}")]
    NotFound { id: Uuid },

    /// 본문 검증 실패 (빈 본문, 길이 초과)
    #[error("Invalid post: {0}")]
    InvalidBody(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    /// 인증/인가 실패 (401/403)
    #[error(transparent)]
    Auth(#[from] AuthError),
}

impl From<PostError> for (StatusCode, Json<serde_json::Value>) {
    fn from(err: PostError) -> Self {
        let (status, message) = match err {
            PostError::Auth(auth) => return auth.into(),
            PostError::NotFound { .. } => (StatusCode::NOT_FOUND, err.to_string()),
            PostError::InvalidBody(_) => (StatusCode::BAD_REQUEST, err.to_string()),
            PostError::DatabaseError(_) => {
                tracing::error!(error = %err, "post request failed with internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
        };

        (status, Json(json!({ "error": message })))
    }
}
