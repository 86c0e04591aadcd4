// Shared errors
pub mod auth_error;
pub mod post_error;

pub use auth_error::*;
pub use post_error::*;

/// 핸들러 공통 에러 응답 타입
/// Error response returned by every handler
pub type ErrorResponse = (axum::http::StatusCode, axum::Json<serde_json::Value>);
