use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};
use uuid::Uuid;
use crate::domains::auth::services::{AccessTokenCodec, RefreshTokenStore};
use crate::shared::config::AppConfig;
use crate::shared::errors::{AuthError, ErrorResponse};
use crate::shared::services::AppState;

const BEARER_SCHEME: &str = "Bearer";
const API_KEY_SCHEME: &str = "ApiKey";

/// 세션 인증기
/// Resolves a bearer credential to a principal (or a typed failure)
///
/// 상태 전이: NoCredential → extract_bearer → HasCredential
/// → authenticate_access | authenticate_via_refresh → Authenticated(user_id) | Rejected
/// 두 결과 모두 최종 상태이며 이 계층에서 재시도하지 않음.
#[derive(Clone)]
pub struct SessionAuthenticator {
    codec: AccessTokenCodec,
    refresh_tokens: RefreshTokenStore,
}

impl SessionAuthenticator {
    pub fn new(config: &AppConfig, refresh_tokens: RefreshTokenStore) -> Self {
        Self {
            codec: AccessTokenCodec::new(config),
            refresh_tokens,
        }
    }

    /// `Authorization: Bearer <token>` 에서 토큰 추출
    ///
    /// 공백으로 나눈 필드가 정확히 2개이고 scheme이 대소문자까지 `Bearer`여야 함
    pub fn extract_bearer(headers: &HeaderMap) -> Result<&str, AuthError> {
        extract_credential(headers, BEARER_SCHEME)
    }

    /// `Authorization: ApiKey <key>` 에서 키 추출 (결제 웹훅용)
    pub fn extract_api_key(headers: &HeaderMap) -> Result<&str, AuthError> {
        extract_credential(headers, API_KEY_SCHEME)
    }

    /// Access Token 검증. 실패 원인은 `InvalidToken` 안에만 남음
    pub fn authenticate_access(&self, token: &str) -> Result<Uuid, AuthError> {
        self.codec.verify(token).map_err(AuthError::InvalidToken)
    }

    /// Refresh Token으로 새 Access Token 발급 (비밀번호 없이 발급되는 유일한 경로)
    /// Mint a fresh access token for the refresh token's owner
    pub async fn authenticate_via_refresh(&self, token: &str) -> Result<String, AuthError> {
        let user_id = self.refresh_tokens.lookup_active_user(token).await?;
        self.codec.issue(user_id)
    }
}

fn extract_credential<'a>(headers: &'a HeaderMap, scheme: &str) -> Result<&'a str, AuthError> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or(AuthError::MissingToken)?
        .to_str()
        .map_err(|_| AuthError::MissingToken)?;

    let fields: Vec<&str> = value.split(' ').collect();
    match fields.as_slice() {
        [found, credential] if *found == scheme && !credential.is_empty() => Ok(*credential),
        _ => Err(AuthError::MissingToken),
    }
}

/// 인증된 사용자 정보 (Access Token에서 추출)
/// Authenticated principal extracted from the access token
///
/// 사용법:
/// ```ignore
/// pub async fn create_post(
///     State(app_state): State<AppState>,
///     authenticated_user: AuthenticatedUser,
/// ) -> Result<...> {
///     let user_id = authenticated_user.user_id;
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
}

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = ErrorResponse;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = SessionAuthenticator::extract_bearer(&parts.headers)?;

        let user_id = state
            .auth_state
            .authenticator
            .authenticate_access(token)?;

        Ok(AuthenticatedUser { user_id })
    }
}

/// 검증 전 Bearer 토큰 원문 (refresh / revoke 엔드포인트용)
/// Raw bearer credential, for endpoints that take a refresh token
#[derive(Debug, Clone)]
pub struct BearerToken(pub String);

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for BearerToken {
    type Rejection = ErrorResponse;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let token = SessionAuthenticator::extract_bearer(&parts.headers)?;
        Ok(BearerToken(token.to_string()))
    }
}

/// 결제 서비스 웹훅 인증 (`Authorization: ApiKey <key>`)
/// Payment provider credential, checked before the request body is read
///
/// Json 추출기보다 앞에 두어 키가 없거나 틀리면 본문 형식과 무관하게 401
#[derive(Debug, Clone, Copy)]
pub struct PaymentProviderKey;

#[async_trait]
impl FromRequestParts<AppState> for PaymentProviderKey {
    type Rejection = ErrorResponse;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let api_key = SessionAuthenticator::extract_api_key(&parts.headers)
            .map_err(|_| AuthError::InvalidApiKey)?;

        let expected = &state.config.polka_key;
        if expected.is_empty() || api_key != expected {
            return Err(AuthError::InvalidApiKey.into());
        }

        Ok(PaymentProviderKey)
    }
}
