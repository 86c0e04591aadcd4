use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// JWT Claims (토큰에 포함될 데이터)
/// JWT Claims (data to be included in token)
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// 사용자 ID (UUID 문자열)
    /// Subject (user id)
    pub sub: String,

    /// 발급 시간 (Unix timestamp)
    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// 만료 시간 (Unix timestamp)
    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// 발급자
    /// Issuer
    pub iss: String,
}

impl Claims {
    /// 새 Claims 생성 (ttl_secs가 음수면 이미 만료된 토큰)
    /// Create new Claims; a negative ttl yields an already-expired token
    pub fn new(subject: Uuid, issuer: &str, now: i64, ttl_secs: i64) -> Self {
        Self {
            sub: subject.to_string(),
            iat: now,
            exp: now.saturating_add(ttl_secs),
            iss: issuer.to_string(),
        }
    }
}

/// 검증용 Claims
///
/// jsonwebtoken은 exp 검사 전에 payload를 역직렬화하므로
/// `sub` / `iat` 형식 검사는 시간 검사 이후로 미룸 (서명 → 시간 → subject 순서 유지)
#[derive(Debug, Deserialize)]
pub struct UnverifiedClaims {
    #[serde(default)]
    pub sub: Option<Value>,

    #[serde(default)]
    pub iat: Option<Value>,

    pub exp: i64,
}
