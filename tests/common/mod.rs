// =====================================================
// 통합 테스트 공통 헬퍼
// =====================================================
// 목적: in-memory 저장소 위에 전체 Router를 구성하고
// oneshot으로 요청을 보내는 헬퍼 제공
//
// 사용법:
// ```rust
// mod common;
// use common::*;
//
// #[tokio::test]
// async fn test_something() {
//     let app = setup_test();
//     let (status, body) = app.send(Method::GET, "/api/healthz", None, None).await;
// }
// ```
// =====================================================
#![allow(dead_code)]

use std::sync::Arc;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use post_api::routes::build_app;
use post_api::shared::config::AppConfig;
use post_api::shared::database::{
    InMemoryPostRepository, InMemoryRefreshTokenRepository, InMemoryUserRepository, Storage,
};
use post_api::shared::services::AppState;

// 테스트용 상수
pub const TEST_JWT_SECRET: &str = "integration-test-secret";
pub const TEST_PASSWORD: &str = "correct horse battery staple";

/// 테스트 앱 (Router + 직접 검사할 수 있는 저장소 핸들)
pub struct TestApp {
    pub router: Router,
    pub config: Arc<AppConfig>,
    pub users: Arc<InMemoryUserRepository>,
    pub refresh_tokens: Arc<InMemoryRefreshTokenRepository>,
    pub posts: Arc<InMemoryPostRepository>,
}

/// 로그인까지 마친 사용자
pub struct LoggedInUser {
    pub id: Uuid,
    pub email: String,
    pub token: String,
    pub refresh_token: String,
}

/// 테스트 전 초기화 (매 테스트마다 독립된 저장소)
pub fn setup_test() -> TestApp {
    let config = Arc::new(AppConfig::for_tests(TEST_JWT_SECRET));
    let users = Arc::new(InMemoryUserRepository::new());
    let refresh_tokens = Arc::new(InMemoryRefreshTokenRepository::new());
    let posts = Arc::new(InMemoryPostRepository::new());

    let storage = Storage {
        users: users.clone(),
        refresh_tokens: refresh_tokens.clone(),
        posts: posts.clone(),
    };

    let router = build_app(AppState::new(config.clone(), storage));

    TestApp {
        router,
        config,
        users,
        refresh_tokens,
        posts,
    }
}

impl TestApp {
    /// 요청 전송 후 (상태 코드, JSON 본문) 반환. 본문이 비어 있으면 Value::Null
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        authorization: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        match body {
            Some(json) => {
                self.send_raw(method, uri, authorization, Some("application/json"), json.to_string())
                    .await
            }
            None => self.send_raw(method, uri, authorization, None, String::new()).await,
        }
    }

    /// 본문을 그대로 전송 (잘못된 JSON, content-type 누락 등)
    pub async fn send_raw(
        &self,
        method: Method,
        uri: &str,
        authorization: Option<&str>,
        content_type: Option<&str>,
        body: String,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(value) = authorization {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        if let Some(value) = content_type {
            builder = builder.header(header::CONTENT_TYPE, value);
        }

        let request = builder.body(Body::from(body)).unwrap();

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();

        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };

        (status, value)
    }

    pub async fn signup(&self, email: &str) -> Uuid {
        let (status, body) = self
            .send(
                Method::POST,
                "/api/users",
                None,
                Some(json!({ "email": email, "password": TEST_PASSWORD })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "signup failed: {}", body);
        body["id"].as_str().unwrap().parse().unwrap()
    }

    pub async fn login(&self, email: &str, password: &str) -> (StatusCode, Value) {
        self.send(
            Method::POST,
            "/api/login",
            None,
            Some(json!({ "email": email, "password": password })),
        )
        .await
    }

    pub async fn signup_and_login(&self, email: &str) -> LoggedInUser {
        let id = self.signup(email).await;
        let (status, body) = self.login(email, TEST_PASSWORD).await;
        assert_eq!(status, StatusCode::OK, "login failed: {}", body);

        LoggedInUser {
            id,
            email: email.to_string(),
            token: body["token"].as_str().unwrap().to_string(),
            refresh_token: body["refresh_token"].as_str().unwrap().to_string(),
        }
    }
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}
