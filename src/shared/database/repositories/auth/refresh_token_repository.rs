use sqlx::{PgPool, Row};
use sqlx::postgres::PgRow;
use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::collections::HashMap;
use crate::domains::auth::models::refresh_token::{RefreshToken, RefreshTokenCreate};

/// Refresh Token 저장소 인터페이스
/// 토큰 값이 기본 키이므로 서로 다른 토큰에 대한 작업은 경합하지 않음
#[async_trait]
pub trait RefreshTokenRepository: Send + Sync {
    /// Refresh Token 생성 (저장)
    /// Create and store refresh token
    async fn create(&self, data: RefreshTokenCreate) -> Result<RefreshToken>;

    /// Refresh Token 조회 (토큰 값으로)
    /// Find refresh token by value
    async fn find_by_token(&self, token: &str) -> Result<Option<RefreshToken>>;

    /// Refresh Token 무효화 (revoked_at = at)
    /// 실제로 상태가 바뀐 경우에만 true (없는 토큰 / 이미 무효화된 토큰은 false)
    async fn revoke(&self, token: &str, at: DateTime<Utc>) -> Result<bool>;
}

/// Refresh Token Repository (PostgreSQL)
pub struct PgRefreshTokenRepository {
    pool: PgPool,
}

impl PgRefreshTokenRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn refresh_token_from_row(row: &PgRow) -> RefreshToken {
    RefreshToken {
        token: row.get("token"),
        user_id: row.get("user_id"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
        expires_at: row.get("expires_at"),
        revoked_at: row.get("revoked_at"),
    }
}

#[async_trait]
impl RefreshTokenRepository for PgRefreshTokenRepository {
    async fn create(&self, data: RefreshTokenCreate) -> Result<RefreshToken> {
        let row = sqlx::query(
            r#"
            INSERT INTO refresh_tokens (token, user_id, expires_at, revoked_at, created_at, updated_at)
            VALUES ($1, $2, $3, NULL, NOW(), NOW())
            RETURNING token, user_id, expires_at, revoked_at, created_at, updated_at
            "#,
        )
        .bind(&data.token)
        .bind(data.user_id)
        .bind(data.expires_at)
        .fetch_one(&self.pool)
        .await
        .context("Failed to create refresh token")?;

        Ok(refresh_token_from_row(&row))
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<RefreshToken>> {
        let row = sqlx::query(
            r#"
            SELECT token, user_id, expires_at, revoked_at, created_at, updated_at
            FROM refresh_tokens
            WHERE token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to find refresh token")?;

        Ok(row.as_ref().map(refresh_token_from_row))
    }

    async fn revoke(&self, token: &str, at: DateTime<Utc>) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE refresh_tokens
            SET revoked_at = $2, updated_at = $2
            WHERE token = $1 AND revoked_at IS NULL
            "#,
        )
        .bind(token)
        .bind(at)
        .execute(&self.pool)
        .await
        .context("Failed to revoke refresh token")?;

        Ok(result.rows_affected() > 0)
    }
}

/// Refresh Token Repository (in-memory)
#[derive(Default)]
pub struct InMemoryRefreshTokenRepository {
    tokens: RwLock<HashMap<String, RefreshToken>>,
}

impl InMemoryRefreshTokenRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// 저장된 행 개수 (테스트 확인용)
    pub fn count(&self) -> usize {
        self.tokens.read().len()
    }
}

#[async_trait]
impl RefreshTokenRepository for InMemoryRefreshTokenRepository {
    async fn create(&self, data: RefreshTokenCreate) -> Result<RefreshToken> {
        let mut tokens = self.tokens.write();
        if tokens.contains_key(&data.token) {
            bail!("duplicate key value violates unique constraint \"refresh_tokens_pkey\"");
        }

        let now = Utc::now();
        let row = RefreshToken {
            token: data.token,
            user_id: data.user_id,
            created_at: now,
            updated_at: now,
            expires_at: data.expires_at,
            revoked_at: None,
        };
        tokens.insert(row.token.clone(), row.clone());
        Ok(row)
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<RefreshToken>> {
        Ok(self.tokens.read().get(token).cloned())
    }

    async fn revoke(&self, token: &str, at: DateTime<Utc>) -> Result<bool> {
        let mut tokens = self.tokens.write();
        match tokens.get_mut(token) {
            Some(row) if row.revoked_at.is_none() => {
                row.revoked_at = Some(at);
                row.updated_at = at;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
