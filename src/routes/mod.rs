// Routes module: 라우팅 설정
// 역할: 모든 도메인의 라우터를 조합
// Routes module: combines all domain routers

pub mod openapi;

use axum::{
    http::{header, HeaderValue, Method},
    routing::get,
    Router,
};
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;
use crate::shared::services::AppState;

// 각 도메인의 routes import
use crate::domains::auth::routes::create_auth_router;
use crate::domains::posts::routes::create_posts_router;

use openapi::ApiDoc;

/// Liveness probe
#[utoipa::path(
    get,
    path = "/api/healthz",
    responses(
        (status = 200, description = "Server is up", body = String)
    ),
    tag = "Health"
)]
pub async fn healthz() -> &'static str {
    "OK"
}

/// Create main router (combines all domain routers)
/// 메인 라우터 생성 (모든 도메인 라우터 조합)
pub fn create_router() -> Router<AppState> {
    let api = Router::new()
        .route("/healthz", get(healthz))
        .merge(create_auth_router())
        .merge(create_posts_router());

    Router::new().nest("/api", api)
}

/// 상태, Swagger UI, 공통 레이어(Trace, Timeout, CORS)까지 적용한 최종 앱
/// Fully layered application, ready to serve
pub fn build_app(app_state: AppState) -> Router {
    let config = app_state.config.clone();

    let mut app = Router::new()
        .merge(create_router())
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(TraceLayer::new_for_http());

    // CORS 설정 (CORS_ORIGIN 지정 시에만)
    if let Some(origin) = config.cors_origin.as_deref() {
        match origin.parse::<HeaderValue>() {
            Ok(origin) => {
                let cors = CorsLayer::new()
                    .allow_origin(origin)
                    .allow_methods([
                        Method::GET,
                        Method::POST,
                        Method::PUT,
                        Method::DELETE,
                        Method::OPTIONS,
                    ])
                    .allow_headers([
                        header::CONTENT_TYPE,
                        header::AUTHORIZATION,
                        header::ACCEPT,
                    ])
                    .allow_credentials(true);
                app = app.layer(cors);
            }
            Err(_) => tracing::warn!(%origin, "ignoring invalid CORS_ORIGIN"),
        }
    }

    app.with_state(app_state)
}
