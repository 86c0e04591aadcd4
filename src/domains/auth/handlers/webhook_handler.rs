use crate::domains::auth::models::PolkaWebhookRequest;
use crate::shared::services::AppState;
use crate::shared::errors::{AuthError, ErrorResponse};
use crate::shared::middleware::auth::PaymentProviderKey;
use axum::{extract::State, http::StatusCode, Json};

/// 결제 서비스 웹훅
/// Payment provider webhook (`Authorization: ApiKey <key>`)
#[utoipa::path(
    post,
    path = "/api/polka/webhooks",
    request_body = PolkaWebhookRequest,
    responses(
        (status = 204, description = "Event accepted"),
        (status = 400, description = "Malformed payload (only after the API key is accepted)"),
        (status = 401, description = "Missing or wrong API key"),
        (status = 404, description = "User not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Webhooks"
)]
pub async fn polka_webhook(
    State(app_state): State<AppState>,
    _key: PaymentProviderKey,
    Json(request): Json<PolkaWebhookRequest>,
) -> Result<StatusCode, ErrorResponse> {
    app_state
        .auth_state
        .auth_service
        .apply_payment_event(request)
        .await
        .map_err(|e: AuthError| -> ErrorResponse { e.into() })?;

    Ok(StatusCode::NO_CONTENT)
}
