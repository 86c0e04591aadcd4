use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

/// 게시글 본문 최대 길이 (문자 수)
/// Maximum post body length in characters
pub const MAX_POST_LENGTH: usize = 140;

/// 게시글 모델
/// Post model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[schema(as = Post)]
pub struct Post {
    pub id: Uuid,

    #[schema(example = "Hello, world!")]
    pub body: String,

    /// 작성자 ID (소유자)
    /// Author id (resource owner)
    pub user_id: Uuid,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

/// 게시글 작성 요청
/// Create post request
///
/// 작성자는 항상 인증된 사용자로 지정됩니다. 요청 본문의 `user_id`는 무시됩니다.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(as = CreatePostRequest)]
pub struct CreatePostRequest {
    #[schema(example = "Hello, world!")]
    pub body: String,

    /// 무시됨 (호환성 유지용)
    /// Ignored; the author is always the authenticated principal
    #[serde(default)]
    pub user_id: Option<Uuid>,
}

/// 정렬 방향
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// 게시글 목록 조회 쿼리
/// List posts query
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListPostsQuery {
    /// 작성자 필터
    pub author_id: Option<Uuid>,

    /// 생성 시각 기준 정렬 (asc | desc)
    pub sort: Option<SortOrder>,
}
