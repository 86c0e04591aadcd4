use std::sync::Arc;
use uuid::Uuid;
use crate::shared::database::{DuplicateEmail, UserRepository};
use crate::domains::auth::models::{
    LoginRequest, PolkaWebhookRequest, User, UserCredentialsRequest, USER_UPGRADED_EVENT,
};
use crate::domains::auth::services::{AccessTokenCodec, PasswordVault, RefreshTokenStore};
use crate::shared::errors::AuthError;

// 인증 서비스
// AuthService: handles account and login business logic
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    codec: AccessTokenCodec,
    refresh_tokens: RefreshTokenStore,
}

/// 로그인 결과 (사용자 + Access Token + Refresh Token)
pub struct LoginOutcome {
    pub user: User,
    pub access_token: String,
    pub refresh_token: String,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        codec: AccessTokenCodec,
        refresh_tokens: RefreshTokenStore,
    ) -> Self {
        Self {
            users,
            codec,
            refresh_tokens,
        }
    }

    // 회원가입 (비즈니스 로직)
    pub async fn signup(&self, request: UserCredentialsRequest) -> Result<User, AuthError> {
        validate_credentials(&request)?;

        // 1. 이메일 중복 확인
        let existing_user = self
            .users
            .get_user_by_email(&request.email)
            .await
            .map_err(|e| AuthError::DatabaseError(format!("Failed to check email existence: {:#}", e)))?;

        if existing_user.is_some() {
            return Err(AuthError::EmailAlreadyExists { email: request.email });
        }

        // 2. 비밀번호 해싱
        let password_hash = PasswordVault::hash(&request.password)?;

        // 3. 사용자 생성
        let user = self
            .users
            .create_user(&request.email, &password_hash)
            .await
            .map_err(|e| user_write_error(e, &request.email, "Failed to create user"))?;

        tracing::info!(user_id = %user.id, "user created");
        Ok(user)
    }

    // 로그인
    // 비밀번호 검증이 끝나기 전에는 어떤 토큰도 발급/저장하지 않음
    pub async fn login(&self, request: LoginRequest) -> Result<LoginOutcome, AuthError> {
        // 1. 이메일로 사용자 조회 (없는 이메일과 틀린 비밀번호는 같은 에러)
        let user = self
            .users
            .get_user_by_email(&request.email)
            .await
            .map_err(|e| AuthError::DatabaseError(format!("Failed to fetch user: {:#}", e)))?
            .ok_or(AuthError::InvalidCredentials)?;

        // 2. 비밀번호 검증
        PasswordVault::verify(&user.password_hash, &request.password)?;

        // 3. Access Token + Refresh Token 발급
        let access_token = self.codec.issue(user.id)?;
        let refresh_token = self.refresh_tokens.issue(user.id).await?;

        tracing::info!(user_id = %user.id, "login succeeded");
        Ok(LoginOutcome {
            user,
            access_token,
            refresh_token,
        })
    }

    /// 본인 이메일/비밀번호 변경
    /// Update the principal's own email and password
    pub async fn update_credentials(
        &self,
        user_id: Uuid,
        request: UserCredentialsRequest,
    ) -> Result<User, AuthError> {
        validate_credentials(&request)?;

        let existing = self
            .users
            .get_user_by_email(&request.email)
            .await
            .map_err(|e| AuthError::DatabaseError(format!("Failed to check email existence: {:#}", e)))?;

        if existing.is_some_and(|u| u.id != user_id) {
            return Err(AuthError::EmailAlreadyExists { email: request.email });
        }

        let password_hash = PasswordVault::hash(&request.password)?;

        self.users
            .update_credentials(user_id, &request.email, &password_hash)
            .await
            .map_err(|e| user_write_error(e, &request.email, "Failed to update user"))?
            .ok_or(AuthError::UserNotFound { id: user_id })
    }

    /// 결제 웹훅 처리. `user.upgraded` 외 이벤트는 무시
    /// Apply a payment webhook; unknown events are ignored
    pub async fn apply_payment_event(&self, request: PolkaWebhookRequest) -> Result<(), AuthError> {
        if request.event != USER_UPGRADED_EVENT {
            tracing::debug!(event = %request.event, "ignoring payment webhook event");
            return Ok(());
        }

        let user_id = request.data.user_id;
        let user = self
            .users
            .get_user_by_id(user_id)
            .await
            .map_err(|e| AuthError::DatabaseError(format!("Failed to fetch user: {:#}", e)))?
            .ok_or(AuthError::UserNotFound { id: user_id })?;

        // 재전송된 이벤트는 쓰기 없이 성공
        if user.is_premium {
            tracing::debug!(user_id = %user_id, "user already premium; webhook replay ignored");
            return Ok(());
        }

        self.users
            .set_premium(user_id, true)
            .await
            .map_err(|e| AuthError::DatabaseError(format!("Failed to upgrade user: {:#}", e)))?
            .ok_or(AuthError::UserNotFound { id: user_id })?;

        tracing::info!(user_id = %user_id, "user upgraded to premium");
        Ok(())
    }
}

/// 저장소 쓰기 에러 변환. 동시 요청으로 UNIQUE 제약에 걸린 경우도 400
fn user_write_error(err: anyhow::Error, email: &str, action: &str) -> AuthError {
    if err.downcast_ref::<DuplicateEmail>().is_some() {
        return AuthError::EmailAlreadyExists { email: email.to_string() };
    }
    AuthError::DatabaseError(format!("{}: {:#}", action, err))
}

fn validate_credentials(request: &UserCredentialsRequest) -> Result<(), AuthError> {
    let email = request.email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(AuthError::InvalidInput("email must be a valid address".to_string()));
    }
    if request.password.is_empty() {
        return Err(AuthError::InvalidInput("password must not be empty".to_string()));
    }
    Ok(())
}
