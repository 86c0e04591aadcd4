use anyhow::{bail, Context, Result};
use std::str::FromStr;
use std::time::Duration;

/// 애플리케이션 설정
/// Application configuration
///
/// 시작 시 한 번 로드되어 `AppState`를 통해 참조로 전달됩니다.
/// 전역 변수(static)로 비밀값을 읽지 않습니다.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// PostgreSQL 연결 문자열 (없으면 in-memory 저장소 사용)
    /// PostgreSQL URL (in-memory storage when absent)
    pub database_url: Option<String>,

    /// 서버 바인딩 주소
    pub bind_addr: String,

    /// Access Token 서명 키 (HMAC)
    pub jwt_secret: String,

    /// Access Token `iss` 값
    pub jwt_issuer: String,

    /// Access Token 수명
    pub access_token_ttl: Duration,

    /// Refresh Token 수명
    pub refresh_token_ttl: Duration,

    /// 결제 웹훅 API Key
    pub polka_key: String,

    /// 요청 단위 타임아웃 (스토리지 호출 포함)
    pub request_timeout: Duration,

    pub db_max_connections: u32,

    pub cors_origin: Option<String>,
}

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_ISSUER: &str = "post_api";
pub const DEFAULT_ACCESS_TOKEN_TTL_SECS: u64 = 60 * 60;
pub const DEFAULT_REFRESH_TOKEN_TTL_DAYS: u64 = 60;

/// 허용 상한 (만료 시각 계산이 chrono 범위를 넘지 않도록)
pub const MAX_ACCESS_TOKEN_TTL_SECS: u64 = 7 * 24 * 60 * 60;
pub const MAX_REFRESH_TOKEN_TTL_DAYS: u64 = 10 * 365;

const SECS_PER_DAY: u64 = 24 * 60 * 60;

impl AppConfig {
    /// 환경 변수에서 설정 로드 (.env 파일이 있으면 먼저 읽음)
    /// Load configuration from the environment
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();

        let jwt_secret = std::env::var("JWT_SECRET").context("JWT_SECRET must be set")?;
        if jwt_secret.trim().is_empty() {
            bail!("JWT_SECRET must not be empty");
        }

        let access_secs: u64 = env_or("ACCESS_TOKEN_TTL_SECS", DEFAULT_ACCESS_TOKEN_TTL_SECS)?;
        let refresh_days: u64 = env_or("REFRESH_TOKEN_TTL_DAYS", DEFAULT_REFRESH_TOKEN_TTL_DAYS)?;
        let (access_token_ttl, refresh_token_ttl) = token_lifetimes(access_secs, refresh_days)?;
        let timeout_secs: u64 = env_or("REQUEST_TIMEOUT_SECS", 10)?;

        let polka_key = std::env::var("POLKA_KEY").unwrap_or_default();
        if polka_key.is_empty() {
            tracing::warn!("POLKA_KEY not set; payment webhooks will be rejected");
        }

        Ok(Self {
            database_url: std::env::var("DATABASE_URL").ok().filter(|v| !v.is_empty()),
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string()),
            jwt_secret,
            jwt_issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| DEFAULT_ISSUER.to_string()),
            access_token_ttl,
            refresh_token_ttl,
            polka_key,
            request_timeout: Duration::from_secs(timeout_secs),
            db_max_connections: env_or("DB_MAX_CONNECTIONS", 10)?,
            cors_origin: std::env::var("CORS_ORIGIN").ok().filter(|v| !v.is_empty()),
        })
    }

    /// 테스트용 설정 (환경 변수를 읽지 않음)
    /// Config for tests, never reads the environment
    pub fn for_tests(jwt_secret: &str) -> Self {
        Self {
            database_url: None,
            bind_addr: "127.0.0.1:0".to_string(),
            jwt_secret: jwt_secret.to_string(),
            jwt_issuer: DEFAULT_ISSUER.to_string(),
            access_token_ttl: Duration::from_secs(DEFAULT_ACCESS_TOKEN_TTL_SECS),
            refresh_token_ttl: Duration::from_secs(DEFAULT_REFRESH_TOKEN_TTL_DAYS * SECS_PER_DAY),
            polka_key: "test-polka-key".to_string(),
            request_timeout: Duration::from_secs(10),
            db_max_connections: 1,
            cors_origin: None,
        }
    }
}

/// 토큰 수명 검증 (0 또는 상한 초과 시 시작 실패)
/// Validate token lifetimes and convert them to durations
fn token_lifetimes(access_secs: u64, refresh_days: u64) -> Result<(Duration, Duration)> {
    if access_secs == 0 || access_secs > MAX_ACCESS_TOKEN_TTL_SECS {
        bail!(
            "ACCESS_TOKEN_TTL_SECS must be between 1 and {}, got {}",
            MAX_ACCESS_TOKEN_TTL_SECS,
            access_secs
        );
    }
    if refresh_days == 0 || refresh_days > MAX_REFRESH_TOKEN_TTL_DAYS {
        bail!(
            "REFRESH_TOKEN_TTL_DAYS must be between 1 and {}, got {}",
            MAX_REFRESH_TOKEN_TTL_DAYS,
            refresh_days
        );
    }

    let refresh_secs = refresh_days
        .checked_mul(SECS_PER_DAY)
        .context("REFRESH_TOKEN_TTL_DAYS overflows")?;

    Ok((Duration::from_secs(access_secs), Duration::from_secs(refresh_secs)))
}

fn env_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("invalid {}={:?}: {}", key, raw, e)),
        Err(_) => Ok(default),
    }
}
