use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Refresh Token 모델 (DB 저장용, 토큰 값이 기본 키)
/// Refresh Token model (database row keyed by token value)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshToken {
    pub token: String,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub revoked_at: Option<DateTime<Utc>>,
}

impl RefreshToken {
    /// 사용 가능 여부: 무효화되지 않았고 만료 전
    /// Usable iff not revoked and `now < expires_at`
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.revoked_at.is_none() && now < self.expires_at
    }
}

/// Refresh Token 생성 요청 (새 토큰 발급 시)
/// Refresh Token creation request (when issuing new token)
#[derive(Debug)]
pub struct RefreshTokenCreate {
    pub token: String,
    pub user_id: Uuid,
    pub expires_at: DateTime<Utc>,
}
