use std::sync::Arc;
use anyhow::{Context, Result};
use tokio::net::TcpListener;

use post_api::routes::build_app;
use post_api::shared::config::AppConfig;
use post_api::shared::database::Storage;
use post_api::shared::services::AppState;
use post_api::shared::utils::logging;

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();

    // 설정 로드 (.env + 환경 변수)
    let config = Arc::new(AppConfig::from_env()?);

    // 저장소 선택 (PostgreSQL 또는 in-memory)
    let storage = Storage::from_config(&config).await?;

    // AppState 생성 (모든 Service 초기화)
    let app_state = AppState::new(config.clone(), storage);

    // Router 생성
    let app = build_app(app_state);

    let listener = TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;

    tracing::info!(addr = %config.bind_addr, "server listening");
    tracing::info!("Swagger UI available at http://{}/docs", config.bind_addr);

    // 서버 실행
    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
