mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;
use uuid::Uuid;

use common::{Caller, TestApp};

fn heat() -> serde_json::Value {
    json!({ "title": "Heat", "yearOfRelease": 1995, "genres": ["Crime", "Drama"] })
}

#[tokio::test]
async fn anonymous_write_is_unauthorized() {
    let app = TestApp::new();

    let res = app.send(Method::POST, "/api/movies", &Caller::Anonymous, Some(heat())).await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    assert_eq!(res.body["code"], "UNAUTHORIZED");
    assert_eq!(app.store.movie_count().await, 0);
}

#[tokio::test]
async fn unusable_bearer_reads_as_anonymous() {
    let app = TestApp::new();
    let movie = app.seed("Heat", 1995, &["Crime"]).await;
    let broken = Caller::Bearer("not.a.token".to_string());

    let list = app.get("/api/movies", &broken).await;
    assert_eq!(list.status, StatusCode::OK);
    assert_eq!(list.data()["total"], 1);

    let one = app.get(&format!("/api/movies/{}", movie.id), &broken).await;
    assert_eq!(one.status, StatusCode::OK);
    assert!(one.data()["userRating"].is_null());
}

#[tokio::test]
async fn unusable_bearer_cannot_write() {
    let app = TestApp::new();
    let broken = Caller::Bearer("not.a.token".to_string());

    let res = app.send(Method::POST, "/api/movies", &broken, Some(heat())).await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    assert_eq!(res.body["message"], "Authentication required");

    let res = app.get("/api/ratings/me", &broken).await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn expired_token_reads_as_anonymous() {
    let app = TestApp::new();
    let claims = movies_api::auth::Claims::new(
        Uuid::new_v4(),
        "x@example.com",
        &app.config.security,
        chrono::Duration::hours(-2),
    )
    .admin(true)
    .trusted_member(true);
    let expired = Caller::Bearer(movies_api::auth::generate_jwt(&claims, &app.config.security).unwrap());

    assert_eq!(app.get("/api/movies", &expired).await.status, StatusCode::OK);
    let res = app.send(Method::POST, "/api/movies", &expired, Some(heat())).await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn token_from_another_issuer_is_rejected() {
    let app = TestApp::new();
    let mut security = app.config.security.clone();
    security.jwt_issuer = "https://elsewhere.example.com".to_string();
    let claims = movies_api::auth::Claims::new(Uuid::new_v4(), "x@example.com", &security, chrono::Duration::hours(1))
        .admin(true)
        .trusted_member(true);
    let token = movies_api::auth::generate_jwt(&claims, &security).unwrap();

    let res = app.send(Method::POST, "/api/movies", &Caller::Bearer(token), Some(heat())).await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn trusted_member_may_create_but_not_delete() {
    let app = TestApp::new();
    let member = app.member();

    let created = app.send(Method::POST, "/api/movies", &member, Some(heat())).await;
    assert_eq!(created.status, StatusCode::CREATED);
    let id = created.data()["id"].as_str().unwrap().to_string();

    let res = app.send(Method::DELETE, &format!("/api/movies/{}", id), &member, None).await;
    assert_eq!(res.status, StatusCode::FORBIDDEN);
    assert_eq!(app.store.movie_count().await, 1);

    let res = app.send(Method::DELETE, &format!("/api/movies/{}", id), &app.admin(), None).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(app.store.movie_count().await, 0);
}

#[tokio::test]
async fn authenticated_caller_without_claims_is_forbidden_to_write() {
    let app = TestApp::new();
    let plain = Caller::Bearer(app.token(Uuid::new_v4(), false, false));

    let res = app.send(Method::POST, "/api/movies", &plain, Some(heat())).await;
    assert_eq!(res.status, StatusCode::FORBIDDEN);
    assert_eq!(res.body["code"], "FORBIDDEN");
}

#[tokio::test]
async fn api_key_admits_and_attributes_the_caller() {
    let app = TestApp::new();

    let created = app.send(Method::POST, "/api/movies", &app.api_key(), Some(heat())).await;
    assert_eq!(created.status, StatusCode::CREATED);
    let id = created.data()["id"].as_str().unwrap().to_string();

    let rated = app
        .send(
            Method::PUT,
            &format!("/api/movies/{}/ratings", id),
            &app.api_key(),
            Some(json!({ "rating": 4 })),
        )
        .await;
    assert_eq!(rated.status, StatusCode::OK);

    // The rating belongs to the configured key user, visible through their own token
    let key_user = Caller::Bearer(app.token(app.config.security.api_key_user_id, false, false));
    let mine = app.get("/api/ratings/me", &key_user).await;
    assert_eq!(mine.status, StatusCode::OK);
    assert_eq!(mine.data()[0]["movieId"], id.as_str());
    assert_eq!(mine.data()[0]["rating"], 4);
    assert_eq!(mine.data()[0]["slug"], "heat-1995");
}

#[tokio::test]
async fn wrong_api_key_is_unauthorized() {
    let app = TestApp::new();

    let res = app
        .send(Method::POST, "/api/movies", &Caller::ApiKey("guess".to_string()), Some(heat()))
        .await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    assert_eq!(res.body["message"], "Invalid API Key");
    assert_eq!(app.store.movie_count().await, 0);
}

#[tokio::test]
async fn ratings_require_a_caller() {
    let app = TestApp::new();
    let movie = app.seed("Up", 2009, &["Animation"]).await;

    let res = app
        .send(
            Method::PUT,
            &format!("/api/movies/{}/ratings", movie.id),
            &Caller::Anonymous,
            Some(json!({ "rating": 5 })),
        )
        .await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);

    let res = app.get("/api/ratings/me", &Caller::Anonymous).await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    assert_eq!(app.store.rating_count().await, 0);
}
