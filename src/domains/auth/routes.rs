// Auth domain routes
// 인증 도메인 라우터
use axum::{routing::post, Router};
use crate::domains::auth::handlers::{auth_handler, user_handler, webhook_handler};
use crate::shared::services::AppState;

/// Create authentication router
/// 인증 라우터 생성 (계정, 세션, 결제 웹훅)
pub fn create_auth_router() -> Router<AppState> {
    Router::new()
        .route("/users", post(user_handler::create_user).put(user_handler::update_user))
        .route("/login", post(auth_handler::login))
        .route("/refresh", post(auth_handler::refresh))
        .route("/revoke", post(auth_handler::revoke))
        .route("/polka/webhooks", post(webhook_handler::polka_webhook))
}
