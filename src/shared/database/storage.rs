use std::sync::Arc;
use anyhow::Result;
use crate::shared::config::AppConfig;
use crate::shared::database::Database;
use crate::shared::database::repositories::{
    InMemoryPostRepository, InMemoryRefreshTokenRepository, InMemoryUserRepository,
    PgPostRepository, PgRefreshTokenRepository, PgUserRepository, PostRepository,
    RefreshTokenRepository, UserRepository,
};

/// 저장소 묶음
/// Repository set shared by all services
///
/// Service는 trait 객체만 참조하므로 PostgreSQL / in-memory 구현을 교체할 수 있음
#[derive(Clone)]
pub struct Storage {
    pub users: Arc<dyn UserRepository>,
    pub refresh_tokens: Arc<dyn RefreshTokenRepository>,
    pub posts: Arc<dyn PostRepository>,
}

impl Storage {
    /// PostgreSQL 저장소
    pub fn postgres(db: &Database) -> Self {
        Self {
            users: Arc::new(PgUserRepository::new(db.pool().clone())),
            refresh_tokens: Arc::new(PgRefreshTokenRepository::new(db.pool().clone())),
            posts: Arc::new(PgPostRepository::new(db.pool().clone())),
        }
    }

    /// In-memory 저장소 (재시작 시 모든 데이터 소실)
    pub fn in_memory() -> Self {
        Self {
            users: Arc::new(InMemoryUserRepository::new()),
            refresh_tokens: Arc::new(InMemoryRefreshTokenRepository::new()),
            posts: Arc::new(InMemoryPostRepository::new()),
        }
    }

    /// 설정에 따라 저장소 선택 (DATABASE_URL 있으면 PostgreSQL + 마이그레이션)
    /// Pick the backend from configuration
    pub async fn from_config(config: &AppConfig) -> Result<Self> {
        match &config.database_url {
            Some(url) => {
                let db = Database::new(url, config.db_max_connections, config.request_timeout).await?;
                db.initialize().await?;
                tracing::info!("Storage: PostgreSQL");
                Ok(Self::postgres(&db))
            }
            None => {
                tracing::warn!("DATABASE_URL not set; using in-memory storage (data is lost on restart)");
                Ok(Self::in_memory())
            }
        }
    }
}
