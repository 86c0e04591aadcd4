// =====================================================
// 인증 흐름 통합 테스트 (login / refresh / revoke)
// =====================================================

mod common;
use common::*;
use axum::http::{Method, StatusCode};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::Duration;
use post_api::domains::auth::services::AccessTokenCodec;
use post_api::shared::database::RefreshTokenRepository;
use serde_json::json;

/// 테스트: 헬스 체크
#[tokio::test]
async fn test_healthz() {
    let app = setup_test();
    let (status, body) = app.send(Method::GET, "/api/healthz", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "OK");
}

/// 테스트: 로그인 성공 시 사용자 정보 + 두 토큰 반환
#[tokio::test]
async fn test_login_returns_user_and_tokens() {
    let app = setup_test();
    let id = app.signup("alice@example.com").await;

    let (status, body) = app.login("alice@example.com", TEST_PASSWORD).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], id.to_string());
    assert_eq!(body["email"], "alice@example.com");
    assert_eq!(body["is_premium"], false);
    assert!(body.get("password_hash").is_none());

    let token = body["token"].as_str().unwrap();
    assert_eq!(token.split('.').count(), 3);

    let refresh = body["refresh_token"].as_str().unwrap();
    assert_eq!(refresh.len(), 64);
    assert!(refresh.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f')));

    assert_eq!(app.refresh_tokens.count(), 1);
}

/// 테스트: 틀린 비밀번호 → 401, Refresh Token 행 생성 안 됨
#[tokio::test]
async fn test_wrong_password_creates_no_refresh_token() {
    let app = setup_test();
    app.signup("bob@example.com").await;

    let (status, wrong_password) = app.login("bob@example.com", "not-the-password").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, unknown_email) = app.login("nobody@example.com", TEST_PASSWORD).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // 없는 이메일과 틀린 비밀번호는 구분되지 않음
    assert_eq!(wrong_password, unknown_email);
    assert_eq!(app.refresh_tokens.count(), 0);
}

/// 테스트: 같은 Refresh Token으로 여러 번 갱신 가능
#[tokio::test]
async fn test_refresh_token_exchanges_more_than_once() {
    let app = setup_test();
    let user = app.signup_and_login("carol@example.com").await;
    let codec = AccessTokenCodec::new(&app.config);

    for _ in 0..2 {
        let (status, body) = app
            .send(Method::POST, "/api/refresh", Some(&bearer(&user.refresh_token)), None)
            .await;
        assert_eq!(status, StatusCode::OK);

        let token = body["token"].as_str().unwrap();
        assert_eq!(codec.verify(token).unwrap(), user.id);
    }
}

/// 테스트: 같은 Refresh Token으로 동시에 갱신해도 둘 다 성공
#[tokio::test]
async fn test_concurrent_refresh_exchanges_both_succeed() {
    let app = setup_test();
    let user = app.signup_and_login("concurrent@example.com").await;
    let codec = AccessTokenCodec::new(&app.config);
    let auth = bearer(&user.refresh_token);

    let (first, second) = tokio::join!(
        app.send(Method::POST, "/api/refresh", Some(&auth), None),
        app.send(Method::POST, "/api/refresh", Some(&auth), None),
    );

    for (status, body) in [first, second] {
        assert_eq!(status, StatusCode::OK);
        let token = body["token"].as_str().unwrap();
        assert_eq!(codec.verify(token).unwrap(), user.id);
    }

    let row = app
        .refresh_tokens
        .find_by_token(&user.refresh_token)
        .await
        .unwrap()
        .unwrap();
    assert!(row.revoked_at.is_none());
}

/// 테스트: 폐기 후 갱신 불가, 폐기는 멱등
#[tokio::test]
async fn test_revoke_blocks_refresh_and_is_idempotent() {
    let app = setup_test();
    let user = app.signup_and_login("dave@example.com").await;
    let auth = bearer(&user.refresh_token);

    let (status, body) = app.send(Method::POST, "/api/revoke", Some(&auth), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_null());

    let row = app
        .refresh_tokens
        .find_by_token(&user.refresh_token)
        .await
        .unwrap()
        .unwrap();
    assert!(row.revoked_at.is_some());

    let (status, _) = app.send(Method::POST, "/api/refresh", Some(&auth), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app.send(Method::POST, "/api/revoke", Some(&auth), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    // 존재하지 않는 토큰도 204
    let (status, _) = app
        .send(Method::POST, "/api/revoke", Some(&bearer(&"0".repeat(64))), None)
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

/// 테스트: 알 수 없는 Refresh Token, Access Token을 Refresh로 사용 → 401
#[tokio::test]
async fn test_refresh_rejects_unknown_tokens() {
    let app = setup_test();
    let user = app.signup_and_login("erin@example.com").await;

    let (status, _) = app
        .send(Method::POST, "/api/refresh", Some(&bearer(&"f".repeat(64))), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app
        .send(Method::POST, "/api/refresh", Some(&bearer(&user.token)), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

/// 테스트: Authorization 헤더 누락/형식 오류 → 401
#[tokio::test]
async fn test_missing_or_malformed_authorization_header() {
    let app = setup_test();
    let user = app.signup_and_login("frank@example.com").await;
    let post = Some(json!({ "body": "hello" }));

    let (status, _) = app.send(Method::POST, "/api/posts", None, post.clone()).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let malformed = [
        format!("bearer {}", user.token),
        format!("Basic {}", user.token),
        "Bearer".to_string(),
        format!("Bearer {} extra", user.token),
    ];
    for header in malformed {
        let (status, _) = app.send(Method::POST, "/api/posts", Some(&header), post.clone()).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "accepted {:?}", header);
    }

    let (status, _) = app.send(Method::POST, "/api/revoke", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

/// 테스트: 만료/위조 토큰은 같은 일반 메시지로 401
#[tokio::test]
async fn test_expired_and_forged_tokens_share_generic_error() {
    let app = setup_test();
    let user = app.signup_and_login("grace@example.com").await;
    let post = Some(json!({ "body": "hello" }));

    let expired = AccessTokenCodec::new(&app.config)
        .issue_with_ttl(user.id, Duration::seconds(-60))
        .unwrap();

    let wrong_secret = AccessTokenCodec::from_secret("some-other-secret", "post_api", Duration::hours(1))
        .issue(user.id)
        .unwrap();

    // 서명은 그대로 두고 헤더의 alg만 none으로 바꾼 토큰
    let mut parts = user.token.split('.');
    let _header = parts.next().unwrap();
    let payload = parts.next().unwrap();
    let none_header = URL_SAFE_NO_PAD.encode(r#"{"alg":"none","typ":"JWT"}"#);
    let alg_none = format!("{}.{}.", none_header, payload);

    for token in [expired, wrong_secret, alg_none, "garbage".to_string()] {
        let (status, body) = app
            .send(Method::POST, "/api/posts", Some(&bearer(&token)), post.clone())
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Invalid or expired token");
    }

    assert_eq!(app.posts.count(), 0);
}
