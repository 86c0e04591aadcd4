use std::sync::Arc;
use uuid::Uuid;
use crate::domains::posts::models::{CreatePostRequest, ListPostsQuery, Post, SortOrder, MAX_POST_LENGTH};
use crate::shared::database::PostRepository;
use crate::shared::errors::PostError;
use crate::shared::middleware::{Owned, OwnershipGuard};

impl Owned for Post {
    fn owner_id(&self) -> Uuid {
        self.user_id
    }
}

// 게시글 서비스
// PostService: post business logic
#[derive(Clone)]
pub struct PostService {
    posts: Arc<dyn PostRepository>,
}

impl PostService {
    pub fn new(posts: Arc<dyn PostRepository>) -> Self {
        Self { posts }
    }

    /// 게시글 작성. 작성자는 항상 인증된 사용자
    /// Create a post owned by the principal; any owner in the request is ignored
    pub async fn create(&self, principal: Uuid, request: CreatePostRequest) -> Result<Post, PostError> {
        validate_body(&request.body)?;

        if request.user_id.is_some_and(|claimed| claimed != principal) {
            tracing::debug!(%principal, "ignoring user_id supplied in post body");
        }

        self.posts
            .create(&request.body, principal)
            .await
            .map_err(|e| PostError::DatabaseError(format!("{:#}", e)))
    }

    pub async fn list(&self, query: ListPostsQuery) -> Result<Vec<Post>, PostError> {
        let mut posts = self
            .posts
            .list(query.author_id)
            .await
            .map_err(|e| PostError::DatabaseError(format!("{:#}", e)))?;

        if query.sort.unwrap_or_default() == SortOrder::Desc {
            posts.reverse();
        }

        Ok(posts)
    }

    pub async fn get(&self, id: Uuid) -> Result<Post, PostError> {
        self.posts
            .get(id)
            .await
            .map_err(|e| PostError::DatabaseError(format!("{:#}", e)))?
            .ok_or(PostError::NotFound { id })
    }

    /// 게시글 삭제
    ///
    /// 1. 로드 → 2. 소유권 검사 → 3. 소유자 조건부 삭제
    /// 검사 통과 후 삭제된 행이 없으면 동시에 삭제된 것이므로 NotFound
    pub async fn delete(&self, principal: Uuid, id: Uuid) -> Result<(), PostError> {
        let post = self.get(id).await?;

        OwnershipGuard::check_resource(principal, &post)?;

        let deleted = self
            .posts
            .delete_owned(id, principal)
            .await
            .map_err(|e| PostError::DatabaseError(format!("{:#}", e)))?;

        if !deleted {
            return Err(PostError::NotFound { id });
        }

        tracing::info!(post_id = %id, user_id = %principal, "post deleted");
        Ok(())
    }
}

fn validate_body(body: &str) -> Result<(), PostError> {
    if body.trim().is_empty() {
        return Err(PostError::InvalidBody("post body must not be empty".to_string()));
    }
    if body.chars().count() > MAX_POST_LENGTH {
        return Err(PostError::InvalidBody(format!(
            "post is too long (max {} characters)",
            MAX_POST_LENGTH
        )));
    }
    Ok(())
}
