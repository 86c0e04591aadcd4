// Auth domain state
// 인증 도메인 상태
use crate::shared::config::AppConfig;
use crate::shared::database::Storage;
use crate::shared::middleware::auth::SessionAuthenticator;
use crate::domains::auth::services::{AccessTokenCodec, AuthService, RefreshTokenStore};

/// Auth domain state
/// 인증 도메인에서 필요한 서비스들을 포함하는 상태
#[derive(Clone)]
pub struct AuthState {
    pub auth_service: AuthService,
    pub authenticator: SessionAuthenticator,
    pub refresh_tokens: RefreshTokenStore,
}

impl AuthState {
    /// 설정은 참조로 받아 각 서비스 생성자에 전달
    pub fn new(config: &AppConfig, storage: &Storage) -> Self {
        let codec = AccessTokenCodec::new(config);
        let refresh_tokens = RefreshTokenStore::new(storage.refresh_tokens.clone(), config);

        Self {
            auth_service: AuthService::new(storage.users.clone(), codec, refresh_tokens.clone()),
            authenticator: SessionAuthenticator::new(config, refresh_tokens.clone()),
            refresh_tokens,
        }
    }
}
