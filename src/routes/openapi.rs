use utoipa::OpenApi;

use crate::domains::auth::models::*;
use crate::domains::posts::models::*;

// OpenAPI 스키마 정의: Swagger 문서 자동 생성
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::healthz,
        crate::domains::auth::handlers::user_handler::create_user,
        crate::domains::auth::handlers::user_handler::update_user,
        crate::domains::auth::handlers::auth_handler::login,
        crate::domains::auth::handlers::auth_handler::refresh,
        crate::domains::auth::handlers::auth_handler::revoke,
        crate::domains::auth::handlers::webhook_handler::polka_webhook,
        crate::domains::posts::handlers::post_handler::create_post,
        crate::domains::posts::handlers::post_handler::list_posts,
        crate::domains::posts::handlers::post_handler::get_post,
        crate::domains::posts::handlers::post_handler::delete_post
    ),
    components(schemas(
        UserCredentialsRequest,
        UserResponse,
        LoginRequest,
        LoginResponse,
        RefreshTokenResponse,
        PolkaWebhookRequest,
        PolkaWebhookData,
        Post,
        CreatePostRequest,
        SortOrder
    )),
    modifiers(
        &SecurityAddon
    ),
    tags(
        (name = "Health", description = "Liveness probe"),
        (name = "Users", description = "Account endpoints"),
        (name = "Auth", description = "Login, refresh and revoke"),
        (name = "Posts", description = "Post endpoints (author-only delete)"),
        (name = "Webhooks", description = "Payment provider webhooks")
    ),
    info(
        title = "Post API Server",
        description = "Posting backend with JWT access tokens and stored refresh tokens",
        version = "1.0.0"
    )
)]
pub struct ApiDoc;

// Security scheme 정의: Swagger UI에서 "Authorize" 버튼 추가
struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "BearerAuth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
