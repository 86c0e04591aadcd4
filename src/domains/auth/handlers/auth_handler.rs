use crate::domains::auth::models::{LoginRequest, LoginResponse, RefreshTokenResponse};
use crate::shared::services::AppState;
use crate::shared::errors::{AuthError, ErrorResponse};
use crate::shared::middleware::auth::BearerToken;
use axum::{extract::State, http::StatusCode, Json};

// 로그인 핸들러
#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Bad request"),
        (status = 401, description = "Incorrect email or password"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Auth"
)]
pub async fn login(
    State(app_state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ErrorResponse> {
    // Service 호출 (비밀번호 검증 + Access/Refresh Token 발급)
    let outcome = app_state
        .auth_state
        .auth_service
        .login(request)
        .await
        .map_err(|e: AuthError| -> ErrorResponse { e.into() })?;

    Ok(Json(LoginResponse::new(
        outcome.user,
        outcome.access_token,
        outcome.refresh_token,
    )))
}

/// 토큰 갱신 핸들러
/// Refresh token handler
///
/// `Authorization: Bearer <refresh_token>` 으로 새 Access Token 발급.
/// Refresh Token 자체는 교체되지 않음.
#[utoipa::path(
    post,
    path = "/api/refresh",
    responses(
        (status = 200, description = "Token refreshed successfully", body = RefreshTokenResponse),
        (status = 401, description = "Missing, unknown, revoked or expired refresh token"),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("BearerAuth" = [])
    ),
    tag = "Auth"
)]
pub async fn refresh(
    State(app_state): State<AppState>,
    BearerToken(refresh_token): BearerToken,
) -> Result<Json<RefreshTokenResponse>, ErrorResponse> {
    let token = app_state
        .auth_state
        .authenticator
        .authenticate_via_refresh(&refresh_token)
        .await
        .map_err(|e: AuthError| -> ErrorResponse { e.into() })?;

    Ok(Json(RefreshTokenResponse { token }))
}

/// 토큰 폐기 핸들러
/// Revoke handler
///
/// 이미 폐기됐거나 없는 토큰도 204 (멱등)
#[utoipa::path(
    post,
    path = "/api/revoke",
    responses(
        (status = 204, description = "Refresh token revoked"),
        (status = 401, description = "Missing or malformed Authorization header"),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("BearerAuth" = [])
    ),
    tag = "Auth"
)]
pub async fn revoke(
    State(app_state): State<AppState>,
    BearerToken(refresh_token): BearerToken,
) -> Result<StatusCode, ErrorResponse> {
    app_state
        .auth_state
        .refresh_tokens
        .revoke(&refresh_token)
        .await
        .map_err(|e: AuthError| -> ErrorResponse { e.into() })?;

    Ok(StatusCode::NO_CONTENT)
}
