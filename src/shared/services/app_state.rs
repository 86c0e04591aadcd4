use std::sync::Arc;
use crate::shared::config::AppConfig;
use crate::shared::database::Storage;
use crate::domains::auth::services::state::AuthState;
use crate::domains::posts::services::state::PostState;

/// Application state (combines all domain states)
/// 애플리케이션 상태 (모든 도메인 상태를 조합)
///
/// 각 도메인의 State를 조합하여 전체 애플리케이션 상태를 관리
#[derive(Clone)]
pub struct AppState {
    /// 설정 (공유, 읽기 전용)
    /// Shared read-only configuration
    pub config: Arc<AppConfig>,
    pub auth_state: AuthState,
    pub post_state: PostState,
}

impl AppState {
    /// 모든 도메인 State를 초기화하고 조합
    pub fn new(config: Arc<AppConfig>, storage: Storage) -> Self {
        let auth_state = AuthState::new(&config, &storage);
        let post_state = PostState::new(&storage);

        Self {
            config,
            auth_state,
            post_state,
        }
    }
}
