use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use argon2::password_hash::{rand_core::OsRng, Error as PasswordHashError, SaltString};
use crate::shared::errors::AuthError;

/// 비밀번호 해싱/검증 (Argon2id, 랜덤 salt)
/// One-way password hashing and constant-time verification
pub struct PasswordVault;

impl PasswordVault {
    /// 비밀번호 해싱. 실패는 내부 에러(500)
    pub fn hash(password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);

        let password_hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AuthError::PasswordHashingFailed(format!("Failed to hash password: {}", e)))?
            .to_string();

        Ok(password_hash)
    }

    /// 비밀번호 검증
    ///
    /// - 불일치 → `InvalidCredentials` (401, 정상적인 인증 실패)
    /// - 저장된 해시 파싱 실패 → `PasswordVerificationFailed` (500)
    pub fn verify(password_hash: &str, password: &str) -> Result<(), AuthError> {
        let parsed_hash = PasswordHash::new(password_hash)
            .map_err(|e| AuthError::PasswordVerificationFailed(format!("Invalid password hash: {}", e)))?;

        match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(()),
            Err(PasswordHashError::Password) => Err(AuthError::InvalidCredentials),
            Err(e) => Err(AuthError::PasswordVerificationFailed(e.to_string())),
        }
    }
}
