use std::sync::Arc;
use chrono::{Duration, Utc};
use rand::RngCore;
use rand::rngs::OsRng;
use uuid::Uuid;
use crate::domains::auth::models::refresh_token::RefreshTokenCreate;
use crate::shared::config::{AppConfig, MAX_REFRESH_TOKEN_TTL_DAYS};
use crate::shared::database::RefreshTokenRepository;
use crate::shared::errors::AuthError;

/// Refresh Token 원본 길이 (바이트, 256비트)
const REFRESH_TOKEN_BYTES: usize = 32;

/// Refresh Token 저장소 서비스
/// Opaque refresh tokens: issue, resolve to owner, revoke
///
/// 교환(refresh) 시 토큰을 회전시키지 않음. 같은 값이 명시적 revoke 또는 만료 전까지 계속 유효함.
#[derive(Clone)]
pub struct RefreshTokenStore {
    repo: Arc<dyn RefreshTokenRepository>,
    ttl: Duration,
}

impl RefreshTokenStore {
    pub fn new(repo: Arc<dyn RefreshTokenRepository>, config: &AppConfig) -> Self {
        Self {
            repo,
            ttl: Duration::from_std(config.refresh_token_ttl)
                .unwrap_or_else(|_| Duration::days(MAX_REFRESH_TOKEN_TTL_DAYS as i64)),
        }
    }

    /// 256비트 난수를 hex로 인코딩 (64자, 소문자)
    /// 256-bit random value from the OS CSPRNG, lowercase hex
    pub fn generate_token() -> String {
        let mut bytes = [0u8; REFRESH_TOKEN_BYTES];
        OsRng.fill_bytes(&mut bytes);
        bytes.iter().map(|b| format!("{:02x}", b)).collect()
    }

    /// Refresh Token 발급 및 저장 (만료 = 지금 + ttl)
    /// Issue and persist a refresh token
    pub async fn issue(&self, user_id: Uuid) -> Result<String, AuthError> {
        let token = Self::generate_token();
        let expires_at = Utc::now()
            .checked_add_signed(self.ttl)
            .ok_or_else(|| AuthError::Internal("refresh token expiry out of range".to_string()))?;

        self.repo
            .create(RefreshTokenCreate {
                token: token.clone(),
                user_id,
                expires_at,
            })
            .await
            .map_err(|e| AuthError::DatabaseError(format!("Failed to create refresh token: {:#}", e)))?;

        Ok(token)
    }

    /// 유효한 토큰이면 소유자 ID 반환
    ///
    /// 미발급 / 무효화 / 만료는 모두 같은 `InvalidRefreshToken`으로 처리 (원인은 debug 로그만)
    pub async fn lookup_active_user(&self, token: &str) -> Result<Uuid, AuthError> {
        let stored = self
            .repo
            .find_by_token(token)
            .await
            .map_err(|e| AuthError::DatabaseError(format!("Failed to find refresh token: {:#}", e)))?;

        let stored = match stored {
            Some(t) => t,
            None => {
                tracing::debug!("refresh token not found");
                return Err(AuthError::InvalidRefreshToken);
            }
        };

        if stored.revoked_at.is_some() {
            tracing::debug!(user_id = %stored.user_id, "refresh token revoked");
            return Err(AuthError::InvalidRefreshToken);
        }

        if !stored.is_active(Utc::now()) {
            tracing::debug!(user_id = %stored.user_id, "refresh token expired");
            return Err(AuthError::InvalidRefreshToken);
        }

        Ok(stored.user_id)
    }

    /// Refresh Token 무효화 (멱등: 없는 토큰 / 이미 무효화된 토큰도 성공)
    /// Revoke; unknown or already-revoked tokens are an idempotent success
    pub async fn revoke(&self, token: &str) -> Result<(), AuthError> {
        let revoked = self
            .repo
            .revoke(token, Utc::now())
            .await
            .map_err(|e| AuthError::DatabaseError(format!("Failed to revoke refresh token: {:#}", e)))?;

        if !revoked {
            tracing::debug!("revoke on unknown or already revoked refresh token");
        }

        Ok(())
    }
}
