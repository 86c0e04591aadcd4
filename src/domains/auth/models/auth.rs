use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use utoipa::ToSchema;
use uuid::Uuid;
use crate::domains::auth::models::user::User;

// 회원가입 / 정보 수정 요청 모델
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(as = UserCredentialsRequest)]
pub struct UserCredentialsRequest {
    /// Email address
    /// 이메일 주소
    #[schema(example = "user@example.com")]
    pub email: String,

    /// Password (will be hashed)
    /// 비밀번호 (해싱됨)
    #[schema(example = "password123")]
    pub password: String,
}

// 로그인 요청 모델
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(as = LoginRequest)]
pub struct LoginRequest {
    #[schema(example = "user@example.com")]
    pub email: String,

    #[schema(example = "password123")]
    pub password: String,
}

// 로그인 응답 모델
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(as = LoginResponse)]
pub struct LoginResponse {
    pub id: Uuid,
    pub email: String,
    pub is_premium: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    /// JWT Access Token (1시간)
    /// JWT Access Token (short lifetime)
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub token: String,

    /// Refresh Token (60일, DB에 저장, 64자 hex)
    /// Refresh Token (long lifetime, stored in database)
    #[schema(example = "9f86d081884c7d659a2feaa0c55ad015a3bf4f1b2b0b822cd15d6c15b0f00a08")]
    pub refresh_token: String,
}

impl LoginResponse {
    pub fn new(user: User, token: String, refresh_token: String) -> Self {
        Self {
            id: user.id,
            email: user.email,
            is_premium: user.is_premium,
            created_at: user.created_at,
            updated_at: user.updated_at,
            token,
            refresh_token,
        }
    }
}

// 토큰 갱신 응답 모델
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(as = RefreshTokenResponse)]
pub struct RefreshTokenResponse {
    /// 새 Access Token
    /// New Access Token
    pub token: String,
}
