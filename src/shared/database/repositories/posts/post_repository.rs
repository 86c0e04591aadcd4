use sqlx::{PgPool, Row};
use sqlx::postgres::PgRow;
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use uuid::Uuid;
use crate::domains::posts::models::Post;

/// 게시글 저장소 인터페이스
/// Post repository interface
#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn create(&self, body: &str, user_id: Uuid) -> Result<Post>;

    async fn get(&self, id: Uuid) -> Result<Option<Post>>;

    /// 생성 시각 오름차순 목록 (author가 있으면 해당 작성자만)
    async fn list(&self, author: Option<Uuid>) -> Result<Vec<Post>>;

    /// 소유자 조건이 붙은 삭제. 삭제된 행이 없으면 false
    /// Delete scoped by owner; false when nothing matched
    async fn delete_owned(&self, id: Uuid, owner: Uuid) -> Result<bool>;
}

pub struct PgPostRepository {
    pool: PgPool,
}

impl PgPostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn post_from_row(row: &PgRow) -> Post {
    Post {
        id: row.get("id"),
        body: row.get("body"),
        user_id: row.get("user_id"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

#[async_trait]
impl PostRepository for PgPostRepository {
    async fn create(&self, body: &str, user_id: Uuid) -> Result<Post> {
        let row = sqlx::query(
            r#"
            INSERT INTO posts (id, body, user_id, created_at, updated_at)
            VALUES ($1, $2, $3, NOW(), NOW())
            RETURNING id, body, user_id, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(body)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .context("Failed to create post")?;

        Ok(post_from_row(&row))
    }

    async fn get(&self, id: Uuid) -> Result<Option<Post>> {
        let row = sqlx::query(
            r#"
            SELECT id, body, user_id, created_at, updated_at
            FROM posts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch post")?;

        Ok(row.as_ref().map(post_from_row))
    }

    async fn list(&self, author: Option<Uuid>) -> Result<Vec<Post>> {
        let rows = sqlx::query(
            r#"
            SELECT id, body, user_id, created_at, updated_at
            FROM posts
            WHERE $1::UUID IS NULL OR user_id = $1
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(author)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list posts")?;

        Ok(rows.iter().map(post_from_row).collect())
    }

    async fn delete_owned(&self, id: Uuid, owner: Uuid) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM posts
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(owner)
        .execute(&self.pool)
        .await
        .context("Failed to delete post")?;

        Ok(result.rows_affected() > 0)
    }
}

/// Post Repository (in-memory)
///
/// 삽입 순서 = 생성 순서. 같은 created_at끼리도 순서가 유지됨
#[derive(Default)]
pub struct InMemoryPostRepository {
    posts: RwLock<Vec<Post>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// 저장된 게시글 개수 (테스트 확인용)
    pub fn count(&self) -> usize {
        self.posts.read().len()
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn create(&self, body: &str, user_id: Uuid) -> Result<Post> {
        let now = Utc::now();
        let post = Post {
            id: Uuid::new_v4(),
            body: body.to_string(),
            user_id,
            created_at: now,
            updated_at: now,
        };
        self.posts.write().push(post.clone());
        Ok(post)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Post>> {
        Ok(self.posts.read().iter().find(|p| p.id == id).cloned())
    }

    async fn list(&self, author: Option<Uuid>) -> Result<Vec<Post>> {
        let mut posts: Vec<Post> = self
            .posts
            .read()
            .iter()
            .filter(|p| author.map_or(true, |a| p.user_id == a))
            .cloned()
            .collect();
        posts.sort_by_key(|p| p.created_at);
        Ok(posts)
    }

    async fn delete_owned(&self, id: Uuid, owner: Uuid) -> Result<bool> {
        let mut posts = self.posts.write();
        match posts.iter().position(|p| p.id == id && p.user_id == owner) {
            Some(index) => {
                posts.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
