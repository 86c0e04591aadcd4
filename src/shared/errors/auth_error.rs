use thiserror::Error;
use axum::{http::StatusCode, Json};
use serde_json::json;

/// Access Token 검증 실패 원인 (내부 로그/테스트 전용)
/// Access token verification failure kind, never exposed on the wire
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    /// 헤더의 alg가 HMAC 계열이 아님
    #[error("unexpected signing algorithm")]
    UnexpectedAlgorithm,

    /// 서명 불일치
    #[error("bad signature")]
    BadSignature,

    /// 만료되었거나 아직 유효하지 않음 (leeway 초과)
    #[error("token expired or not yet valid")]
    Expired,

    /// sub 누락 또는 UUID 파싱 실패
    #[error("missing or malformed subject")]
    MalformedSubject,

    /// 구조/인코딩 오류
    #[error("malformed token")]
    Malformed,
}

/// 인증 관련 에러
/// Authentication-related errors
#[derive(Error, Debug)]
pub enum AuthError {
    /// 이메일이 이미 존재함
    /// Email already exists
    #[error("Email already exists: {email}")]
    EmailAlreadyExists { email: String },

    /// 잘못된 입력값
    /// Invalid request input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// 잘못된 이메일 또는 비밀번호 (어느 쪽인지 구분하지 않음)
    /// Invalid email or password
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// 사용자를 찾을 수 없음
    /// User not found
    #[error("User not found: id={id}")]
    UserNotFound { id: uuid::Uuid },

    /// 비밀번호 해싱 실패
    /// Failed to hash password
    #[error("Failed to hash password: {0}")]
    PasswordHashingFailed(String),

    /// 저장된 해시를 파싱할 수 없음
    /// Stored password hash could not be parsed
    #[error("Failed to verify password: {0}")]
    PasswordVerificationFailed(String),

    /// 데이터베이스 에러
    /// Database error
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// 내부 서버 에러
    /// Internal server error
    #[error("Internal server error: {0}")]
    Internal(String),

    /// 잘못된 또는 만료된 Access Token
    /// Invalid or expired access token, kind kept for logs
    #[error("Invalid or expired token")]
    InvalidToken(#[source] TokenError),

    /// 만료/무효화/미발급 Refresh Token
    /// Expired, revoked or unknown refresh token
    #[error("Invalid refresh token")]
    InvalidRefreshToken,

    /// Authorization 헤더 누락 또는 형식 오류
    /// Missing or malformed Authorization header
    #[error("Missing or malformed authorization header")]
    MissingToken,

    /// 잘못된 API Key (웹훅)
    #[error("Invalid API key")]
    InvalidApiKey,

    /// 인증은 되었지만 리소스 소유자가 아님
    /// Authenticated but not the resource owner
    #[error("Forbidden")]
    Forbidden,
}

impl AuthError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::EmailAlreadyExists { .. } | AuthError::InvalidInput(_) => {
                StatusCode::BAD_REQUEST
            }
            AuthError::InvalidCredentials
            | AuthError::InvalidToken(_)
            | AuthError::InvalidRefreshToken
            | AuthError::MissingToken
            | AuthError::InvalidApiKey => StatusCode::UNAUTHORIZED,
            AuthError::Forbidden => StatusCode::FORBIDDEN,
            AuthError::UserNotFound { .. } => StatusCode::NOT_FOUND,
            AuthError::PasswordHashingFailed(_)
            | AuthError::PasswordVerificationFailed(_)
            | AuthError::DatabaseError(_)
            | AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// AuthError를 HTTP 응답으로 변환
/// 5xx는 상세 내용을 로그에만 남기고 응답에는 일반 메시지만 보냄
impl From<AuthError> for (StatusCode, Json<serde_json::Value>) {
    fn from(err: AuthError) -> Self {
        let status = err.status_code();

        let message = if status.is_server_error() {
            tracing::error!(error = %err, "request failed with internal error");
            "Internal server error".to_string()
        } else {
            match &err {
                AuthError::InvalidToken(kind) => {
                    tracing::debug!(kind = ?kind, "access token rejected");
                }
                AuthError::InvalidCredentials
                | AuthError::InvalidRefreshToken
                | AuthError::MissingToken
                | AuthError::InvalidApiKey
                | AuthError::Forbidden => {
                    tracing::debug!(reason = %err, "request rejected");
                }
                _ => {}
            }
            err.to_string()
        };

        (status, Json(json!({ "error": message })))
    }
}
