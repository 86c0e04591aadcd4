use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// 프리미엄 승급 이벤트 이름
pub const USER_UPGRADED_EVENT: &str = "user.upgraded";

/// 결제 서비스(Polka) 웹훅 요청
/// Payment provider webhook payload
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(as = PolkaWebhookRequest)]
pub struct PolkaWebhookRequest {
    #[schema(example = "user.upgraded")]
    pub event: String,

    pub data: PolkaWebhookData,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(as = PolkaWebhookData)]
pub struct PolkaWebhookData {
    pub user_id: Uuid,
}
