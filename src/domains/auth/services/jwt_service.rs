// src/domains/auth/services/jwt_service.rs
use crate::shared::config::{AppConfig, MAX_ACCESS_TOKEN_TTL_SECS};
use crate::shared::errors::{AuthError, TokenError};
use crate::domains::auth::models::jwt::{Claims, UnverifiedClaims};
use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, decode_header, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

/// 허용되는 서명 알고리즘 (HMAC 계열만)
/// Only the HMAC family is accepted; anything else is an algorithm-confusion attempt
const HMAC_ALGORITHMS: [Algorithm; 3] = [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];

/// 시계 오차 허용 범위 (초)
/// Clock-skew leeway in seconds
pub const CLOCK_SKEW_LEEWAY_SECS: u64 = 5;

/// Access Token 코덱 (발급/검증, 저장 상태 없음)
/// Access token codec: issues and verifies signed, self-contained tokens
#[derive(Clone)]
pub struct AccessTokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
    ttl: Duration,
}

impl AccessTokenCodec {
    /// 설정에서 생성
    /// Create from configuration
    pub fn new(config: &AppConfig) -> Self {
        Self::from_secret(
            &config.jwt_secret,
            &config.jwt_issuer,
            Duration::from_std(config.access_token_ttl)
                .unwrap_or_else(|_| Duration::seconds(MAX_ACCESS_TOKEN_TTL_SECS as i64)),
        )
    }

    pub fn from_secret(secret: &str, issuer: &str, ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            issuer: issuer.to_string(),
            ttl,
        }
    }

    /// Access Token 발급 (설정된 수명)
    /// Issue an access token with the configured lifetime
    pub fn issue(&self, subject: Uuid) -> Result<String, AuthError> {
        self.issue_with_ttl(subject, self.ttl)
    }

    /// 수명을 지정해서 발급 (음수면 이미 만료된 토큰)
    pub fn issue_with_ttl(&self, subject: Uuid, ttl: Duration) -> Result<String, AuthError> {
        let claims = Claims::new(subject, &self.issuer, Utc::now().timestamp(), ttl.num_seconds());

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Internal(format!("Failed to generate access token: {}", e)))
    }

    /// Access Token 검증
    ///
    /// 순서: (1) 알고리즘 (2) 서명 (3) iat/exp + leeway (4) subject
    pub fn verify(&self, token: &str) -> Result<Uuid, TokenError> {
        let header = decode_header(token).map_err(|_| TokenError::Malformed)?;
        if !HMAC_ALGORITHMS.contains(&header.alg) {
            return Err(TokenError::UnexpectedAlgorithm);
        }

        let mut validation = Validation::new(header.alg);
        validation.algorithms = HMAC_ALGORITHMS.to_vec();
        validation.leeway = CLOCK_SKEW_LEEWAY_SECS;
        validation.validate_exp = true;
        validation.validate_aud = false;

        let claims = decode::<UnverifiedClaims>(token, &self.decoding_key, &validation)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature => TokenError::BadSignature,
                ErrorKind::ExpiredSignature | ErrorKind::ImmatureSignature => TokenError::Expired,
                ErrorKind::InvalidAlgorithm => TokenError::UnexpectedAlgorithm,
                _ => TokenError::Malformed,
            })?
            .claims;

        // 미래에 발급된 토큰 거부 (leeway 초과). iat 누락/비정수는 Malformed
        let iat = claims
            .iat
            .as_ref()
            .and_then(|v| v.as_i64())
            .ok_or(TokenError::Malformed)?;
        let now = Utc::now().timestamp();
        if iat > now + CLOCK_SKEW_LEEWAY_SECS as i64 {
            return Err(TokenError::Expired);
        }

        let subject = claims
            .sub
            .as_ref()
            .and_then(|v| v.as_str())
            .filter(|s| !s.is_empty())
            .ok_or(TokenError::MalformedSubject)?;

        Uuid::parse_str(subject).map_err(|_| TokenError::MalformedSubject)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::Engine as _;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;

    const SECRET: &str = "a-secure-secret-for-tests";

    fn codec() -> AccessTokenCodec {
        AccessTokenCodec::from_secret(SECRET, "post_api", Duration::hours(1))
    }

    fn sign_raw(claims: &serde_json::Value) -> String {
        encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap()
    }

    fn swap_header(token: &str, header_json: &str) -> String {
        let mut parts: Vec<&str> = token.split('.').collect();
        let forged = URL_SAFE_NO_PAD.encode(header_json);
        parts[0] = &forged;
        parts.join(".")
    }

    #[test]
    fn issue_then_verify_returns_subject() {
        let codec = codec();
        for _ in 0..50 {
            let subject = Uuid::new_v4();
            let token = codec.issue(subject).unwrap();
            assert_eq!(codec.verify(&token).unwrap(), subject);
        }
    }

    #[test]
    fn wire_format_is_three_base64url_segments_with_registered_claims() {
        let subject = Uuid::new_v4();
        let token = codec().issue(subject).unwrap();

        let parts: Vec<&str> = token.split('.').collect();
        assert_eq!(parts.len(), 3);

        let payload: serde_json::Value =
            serde_json::from_slice(&URL_SAFE_NO_PAD.decode(parts[1]).unwrap()).unwrap();
        assert_eq!(payload["sub"], subject.to_string());
        assert_eq!(payload["iss"], "post_api");
        let iat = payload["iat"].as_i64().unwrap();
        let exp = payload["exp"].as_i64().unwrap();
        assert_eq!(exp - iat, 3600);
    }

    #[test]
    fn wrong_secret_is_bad_signature() {
        let token = codec().issue(Uuid::new_v4()).unwrap();
        let other = AccessTokenCodec::from_secret("another-secret", "post_api", Duration::hours(1));
        assert_eq!(other.verify(&token), Err(TokenError::BadSignature));
    }

    #[test]
    fn expired_beyond_leeway_fails() {
        let codec = codec();
        let token = codec.issue_with_ttl(Uuid::new_v4(), Duration::seconds(-30)).unwrap();
        assert_eq!(codec.verify(&token), Err(TokenError::Expired));
    }

    #[test]
    fn expired_within_leeway_still_verifies() {
        let codec = codec();
        let subject = Uuid::new_v4();
        let token = codec.issue_with_ttl(subject, Duration::seconds(-2)).unwrap();
        assert_eq!(codec.verify(&token), Ok(subject));
    }

    #[test]
    fn non_hmac_algorithm_is_rejected_before_signature_check() {
        let token = codec().issue(Uuid::new_v4()).unwrap();
        let forged = swap_header(&token, r#"{"alg":"RS256","typ":"JWT"}"#);
        assert_eq!(codec().verify(&forged), Err(TokenError::UnexpectedAlgorithm));
    }

    #[test]
    fn alg_none_is_rejected() {
        let token = codec().issue(Uuid::new_v4()).unwrap();
        let forged = swap_header(&token, r#"{"alg":"none","typ":"JWT"}"#);
        let unsigned = format!("{}.", forged.rsplit_once('.').unwrap().0);
        assert!(codec().verify(&unsigned).is_err());
    }

    #[test]
    fn missing_subject_is_malformed_subject() {
        let now = Utc::now().timestamp();
        let token = sign_raw(&serde_json::json!({ "iat": now, "exp": now + 60, "iss": "post_api" }));
        assert_eq!(codec().verify(&token), Err(TokenError::MalformedSubject));
    }

    #[test]
    fn non_uuid_subject_is_malformed_subject() {
        let now = Utc::now().timestamp();
        let token = sign_raw(&serde_json::json!({ "sub": "42", "iat": now, "exp": now + 60 }));
        assert_eq!(codec().verify(&token), Err(TokenError::MalformedSubject));
    }

    #[test]
    fn issued_in_the_future_is_rejected() {
        let now = Utc::now().timestamp();
        let token = sign_raw(&serde_json::json!({
            "sub": Uuid::new_v4().to_string(),
            "iat": now + 3600,
            "exp": now + 7200,
        }));
        assert_eq!(codec().verify(&token), Err(TokenError::Expired));
    }

    #[test]
    fn expired_token_reports_expiry_before_claim_shape() {
        let past = Utc::now().timestamp() - 3600;
        let no_iat = sign_raw(&serde_json::json!({ "sub": Uuid::new_v4().to_string(), "exp": past }));
        let numeric_sub = sign_raw(&serde_json::json!({ "sub": 42, "iat": past - 60, "exp": past }));

        assert_eq!(codec().verify(&no_iat), Err(TokenError::Expired));
        assert_eq!(codec().verify(&numeric_sub), Err(TokenError::Expired));
    }

    #[test]
    fn live_token_with_numeric_subject_is_malformed_subject() {
        let now = Utc::now().timestamp();
        let token = sign_raw(&serde_json::json!({ "sub": 42, "iat": now, "exp": now + 60 }));
        assert_eq!(codec().verify(&token), Err(TokenError::MalformedSubject));
    }

    #[test]
    fn live_token_without_iat_is_malformed() {
        let now = Utc::now().timestamp();
        let token = sign_raw(&serde_json::json!({ "sub": Uuid::new_v4().to_string(), "exp": now + 60 }));
        assert_eq!(codec().verify(&token), Err(TokenError::Malformed));
    }

    #[test]
    fn oversized_configured_lifetime_is_clamped() {
        let mut config = AppConfig::for_tests(SECRET);
        config.access_token_ttl = std::time::Duration::from_secs(u64::MAX);
        let codec = AccessTokenCodec::new(&config);

        let subject = Uuid::new_v4();
        let token = codec.issue(subject).unwrap();
        assert_eq!(codec.verify(&token), Ok(subject));
    }

    #[test]
    fn garbage_is_malformed() {
        assert_eq!(codec().verify("abc"), Err(TokenError::Malformed));
        assert_eq!(codec().verify(""), Err(TokenError::Malformed));
    }
}
