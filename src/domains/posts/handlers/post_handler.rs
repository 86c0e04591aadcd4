use crate::domains::posts::models::{CreatePostRequest, ListPostsQuery, Post};
use crate::shared::services::AppState;
use crate::shared::errors::{ErrorResponse, PostError};
use crate::shared::middleware::auth::AuthenticatedUser;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

/// 게시글 작성
/// Create a post as the authenticated user
#[utoipa::path(
    post,
    path = "/api/posts",
    request_body = CreatePostRequest,
    responses(
        (status = 201, description = "Post created", body = Post),
        (status = 400, description = "Empty or too long body"),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("BearerAuth" = [])
    ),
    tag = "Posts"
)]
pub async fn create_post(
    State(app_state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    Json(request): Json<CreatePostRequest>,
) -> Result<(StatusCode, Json<Post>), ErrorResponse> {
    let post = app_state
        .post_state
        .post_service
        .create(authenticated_user.user_id, request)
        .await
        .map_err(|e: PostError| -> ErrorResponse { e.into() })?;

    Ok((StatusCode::CREATED, Json(post)))
}

#[utoipa::path(
    get,
    path = "/api/posts",
    params(ListPostsQuery),
    responses(
        (status = 200, description = "Posts ordered by creation time", body = Vec<Post>),
        (status = 400, description = "Invalid query parameters"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Posts"
)]
pub async fn list_posts(
    State(app_state): State<AppState>,
    Query(query): Query<ListPostsQuery>,
) -> Result<Json<Vec<Post>>, ErrorResponse> {
    let posts = app_state
        .post_state
        .post_service
        .list(query)
        .await
        .map_err(|e: PostError| -> ErrorResponse { e.into() })?;

    Ok(Json(posts))
}

#[utoipa::path(
    get,
    path = "/api/posts/{id}",
    params(
        ("id" = Uuid, Path, description = "Post ID")
    ),
    responses(
        (status = 200, description = "Post found", body = Post),
        (status = 404, description = "Post not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Posts"
)]
pub async fn get_post(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Post>, ErrorResponse> {
    let post = app_state
        .post_state
        .post_service
        .get(id)
        .await
        .map_err(|e: PostError| -> ErrorResponse { e.into() })?;

    Ok(Json(post))
}

/// 게시글 삭제 (작성자만 가능)
/// Delete a post; only its author may do so
#[utoipa::path(
    delete,
    path = "/api/posts/{id}",
    params(
        ("id" = Uuid, Path, description = "Post ID")
    ),
    responses(
        (status = 204, description = "Post deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not the author of this post"),
        (status = 404, description = "Post not found"),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("BearerAuth" = [])
    ),
    tag = "Posts"
)]
pub async fn delete_post(
    State(app_state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ErrorResponse> {
    app_state
        .post_state
        .post_service
        .delete(authenticated_user.user_id, id)
        .await
        .map_err(|e: PostError| -> ErrorResponse { e.into() })?;

    Ok(StatusCode::NO_CONTENT)
}
