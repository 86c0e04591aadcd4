use crate::domains::auth::models::{UserCredentialsRequest, UserResponse};
use crate::shared::services::AppState;
use crate::shared::errors::{AuthError, ErrorResponse};
use crate::shared::middleware::auth::AuthenticatedUser;
use axum::{extract::State, http::StatusCode, Json};

#[utoipa::path(
    post,
    path = "/api/users",
    request_body = UserCredentialsRequest,
    responses(
        (status = 201, description = "User created successfully", body = UserResponse),
        (status = 400, description = "Bad request (invalid input or email already exists)"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Users"
)]
pub async fn create_user(
    State(app_state): State<AppState>,
    Json(request): Json<UserCredentialsRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ErrorResponse> {
    let user = app_state
        .auth_state
        .auth_service
        .signup(request)
        .await
        .map_err(|e: AuthError| -> ErrorResponse { e.into() })?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// 본인 계정 정보 수정
/// Update the authenticated user's email and password
#[utoipa::path(
    put,
    path = "/api/users",
    request_body = UserCredentialsRequest,
    responses(
        (status = 200, description = "User updated successfully", body = UserResponse),
        (status = 400, description = "Bad request"),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("BearerAuth" = [])
    ),
    tag = "Users"
)]
pub async fn update_user(
    State(app_state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    Json(request): Json<UserCredentialsRequest>,
) -> Result<Json<UserResponse>, ErrorResponse> {
    let user = app_state
        .auth_state
        .auth_service
        .update_credentials(authenticated_user.user_id, request)
        .await
        .map_err(|e: AuthError| -> ErrorResponse { e.into() })?;

    Ok(Json(user.into()))
}
