// Posts domain routes
// 게시글 도메인 라우터
use axum::{routing::{get, post}, Router};
use crate::domains::posts::handlers::post_handler;
use crate::shared::services::AppState;

/// Create posts router
pub fn create_posts_router() -> Router<AppState> {
    Router::new()
        .route("/posts", post(post_handler::create_post).get(post_handler::list_posts))
        .route("/posts/:id", get(post_handler::get_post).delete(post_handler::delete_post))
}
