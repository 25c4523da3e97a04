#![allow(dead_code)]

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, HeaderMap, Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use movies_api::app::{router, AppState};
use movies_api::auth::{generate_jwt, Claims, API_KEY_HEADER};
use movies_api::config::AppConfig;
use movies_api::database::models::Movie;
use movies_api::testing::InMemoryStore;

/// How a test request identifies itself
pub enum Caller {
    Anonymous,
    Bearer(String),
    ApiKey(String),
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestResponse {
    pub fn data(&self) -> &Value {
        &self.body["data"]
    }

    pub fn served_from_cache(&self) -> bool {
        self.headers.contains_key("x-output-cache")
    }
}

/// The full router over in-memory repositories, with development settings
pub struct TestApp {
    pub router: Router,
    pub store: InMemoryStore,
    pub config: AppConfig,
}

impl TestApp {
    pub fn new() -> Self {
        let config = AppConfig::development();
        let store = InMemoryStore::new();
        let state = AppState::new(config.clone(), Arc::new(store.clone()), Arc::new(store.clone()));
        Self {
            router: router(state),
            store,
            config,
        }
    }

    pub fn token(&self, user_id: Uuid, admin: bool, trusted_member: bool) -> String {
        let claims = Claims::new(user_id, "tester@example.com", &self.config.security, chrono::Duration::hours(1))
            .admin(admin)
            .trusted_member(trusted_member);
        generate_jwt(&claims, &self.config.security).expect("mint token")
    }

    pub fn admin(&self) -> Caller {
        Caller::Bearer(self.token(Uuid::new_v4(), true, true))
    }

    pub fn member(&self) -> Caller {
        Caller::Bearer(self.token(Uuid::new_v4(), false, true))
    }

    pub fn api_key(&self) -> Caller {
        Caller::ApiKey(self.config.security.api_key.clone())
    }

    pub async fn seed(&self, title: &str, year: i32, genres: &[&str]) -> Movie {
        let movie = Movie::new(
            Uuid::new_v4(),
            title,
            year,
            genres.iter().map(|g| g.to_string()).collect(),
        );
        self.store.insert(movie.clone()).await;
        movie
    }

    pub async fn send(&self, method: Method, uri: &str, caller: &Caller, body: Option<Value>) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        builder = match caller {
            Caller::Anonymous => builder,
            Caller::Bearer(token) => builder.header(header::AUTHORIZATION, format!("Bearer {}", token)),
            Caller::ApiKey(key) => builder.header(API_KEY_HEADER, key.as_str()),
        };

        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .expect("build request"),
            None => builder.body(Body::empty()).expect("build request"),
        };

        let response = self.router.clone().oneshot(request).await.expect("router is infallible");
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("read body");
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse { status, headers, body }
    }

    pub async fn get(&self, uri: &str, caller: &Caller) -> TestResponse {
        self.send(Method::GET, uri, caller, None).await
    }
}
