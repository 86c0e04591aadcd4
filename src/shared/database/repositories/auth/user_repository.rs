use sqlx::{PgPool, Row};
use sqlx::postgres::PgRow;
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use std::collections::HashMap;
use thiserror::Error;
use uuid::Uuid;
use crate::domains::auth::models::user::User;

/// PostgreSQL unique_violation SQLSTATE
const UNIQUE_VIOLATION: &str = "23505";

/// 이메일 UNIQUE 제약 위반 (동시 가입 / 변경 경합)
/// Returned by `create_user` / `update_credentials` when the email is already taken
#[derive(Error, Debug)]
#[error("email already in use")]
pub struct DuplicateEmail;

/// 사용자 저장소 인터페이스
/// User repository interface
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create_user(&self, email: &str, password_hash: &str) -> Result<User>;

    // 이메일로 사용자 조회 (로그인용)
    // Get user by email (for login)
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;

    async fn get_user_by_id(&self, id: Uuid) -> Result<Option<User>>;

    /// 이메일/비밀번호 변경 (없는 사용자면 None)
    async fn update_credentials(
        &self,
        id: Uuid,
        email: &str,
        password_hash: &str,
    ) -> Result<Option<User>>;

    /// 프리미엄 플래그 설정 (없는 사용자면 None)
    async fn set_premium(&self, id: Uuid, is_premium: bool) -> Result<Option<User>>;
}

// =====================================================
// PostgreSQL 구현
// =====================================================

pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// unique 위반은 `DuplicateEmail`로, 나머지는 context를 붙여 그대로 전달
fn write_error(err: sqlx::Error, context: &'static str) -> anyhow::Error {
    let unique_violation = err
        .as_database_error()
        .and_then(|db| db.code())
        .is_some_and(|code| code == UNIQUE_VIOLATION);
    if unique_violation {
        return DuplicateEmail.into();
    }
    anyhow::Error::new(err).context(context)
}

fn user_from_row(row: &PgRow) -> User {
    User {
        id: row.get("id"),
        email: row.get("email"),
        password_hash: row.get("password_hash"),
        is_premium: row.get("is_premium"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create_user(&self, email: &str, password_hash: &str) -> Result<User> {
        let row = sqlx::query(
            r#"
            INSERT INTO users (id, email, password_hash, is_premium, created_at, updated_at)
            VALUES ($1, $2, $3, FALSE, NOW(), NOW())
            RETURNING id, email, password_hash, is_premium, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| write_error(e, "Failed to create user"))?;

        Ok(user_from_row(&row))
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let row = sqlx::query(
            r#"
            SELECT id, email, password_hash, is_premium, created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch user by email")?;

        Ok(row.as_ref().map(user_from_row))
    }

    async fn get_user_by_id(&self, id: Uuid) -> Result<Option<User>> {
        let row = sqlx::query(
            r#"
            SELECT id, email, password_hash, is_premium, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch user by id")?;

        Ok(row.as_ref().map(user_from_row))
    }

    async fn update_credentials(
        &self,
        id: Uuid,
        email: &str,
        password_hash: &str,
    ) -> Result<Option<User>> {
        let row = sqlx::query(
            r#"
            UPDATE users
            SET email = $2, password_hash = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING id, email, password_hash, is_premium, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(email)
        .bind(password_hash)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| write_error(e, "Failed to update user credentials"))?;

        Ok(row.as_ref().map(user_from_row))
    }

    async fn set_premium(&self, id: Uuid, is_premium: bool) -> Result<Option<User>> {
        let row = sqlx::query(
            r#"
            UPDATE users
            SET is_premium = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, email, password_hash, is_premium, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(is_premium)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to update premium flag")?;

        Ok(row.as_ref().map(user_from_row))
    }
}

// =====================================================
// In-memory 구현 (DATABASE_URL 없는 개발 모드 / 테스트용)
// =====================================================

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<Uuid, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.users.read().len()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create_user(&self, email: &str, password_hash: &str) -> Result<User> {
        let mut users = self.users.write();
        if users.values().any(|u| u.email == email) {
            return Err(DuplicateEmail.into());
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            is_premium: false,
            created_at: now,
            updated_at: now,
        };
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self.users.read().values().find(|u| u.email == email).cloned())
    }

    async fn get_user_by_id(&self, id: Uuid) -> Result<Option<User>> {
        Ok(self.users.read().get(&id).cloned())
    }

    async fn update_credentials(
        &self,
        id: Uuid,
        email: &str,
        password_hash: &str,
    ) -> Result<Option<User>> {
        let mut users = self.users.write();
        if users.values().any(|u| u.email == email && u.id != id) {
            return Err(DuplicateEmail.into());
        }

        Ok(users.get_mut(&id).map(|user| {
            user.email = email.to_string();
            user.password_hash = password_hash.to_string();
            user.updated_at = Utc::now();
            user.clone()
        }))
    }

    async fn set_premium(&self, id: Uuid, is_premium: bool) -> Result<Option<User>> {
        Ok(self.users.write().get_mut(&id).map(|user| {
            user.is_premium = is_premium;
            user.updated_at = Utc::now();
            user.clone()
        }))
    }
}
