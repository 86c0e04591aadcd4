use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use utoipa::ToSchema;
use uuid::Uuid;

/// 사용자 모델 (DB 저장용, password_hash 포함)
/// User model (database row, includes password hash)
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    /// 프리미엄 승급 여부 (결제 웹훅으로 설정)
    /// Promotion flag, set by the payment webhook
    pub is_premium: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 사용자 응답 모델 (비밀번호 제외)
/// User response (password hash never leaves the server)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(as = UserResponse)]
pub struct UserResponse {
    pub id: Uuid,

    #[schema(example = "user@example.com")]
    pub email: String,

    pub is_premium: bool,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            is_premium: user.is_premium,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}
