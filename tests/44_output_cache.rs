mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::{Caller, TestApp};

#[tokio::test]
async fn repeated_anonymous_read_is_served_from_cache() {
    let app = TestApp::new();
    let movie = app.seed("Heat", 1995, &["Crime"]).await;
    let uri = format!("/api/movies/{}", movie.id);

    let first = app.get(&uri, &Caller::Anonymous).await;
    assert_eq!(first.status, StatusCode::OK);
    assert!(!first.served_from_cache());

    let second = app.get(&uri, &Caller::Anonymous).await;
    assert_eq!(second.status, StatusCode::OK);
    assert!(second.served_from_cache());
    assert_eq!(second.body, first.body);
}

#[tokio::test]
async fn not_found_is_never_cached() {
    let app = TestApp::new();

    app.get("/api/movies/heat-1995", &Caller::Anonymous).await;
    app.seed("Heat", 1995, &["Crime"]).await;

    let res = app.get("/api/movies/heat-1995", &Caller::Anonymous).await;
    assert_eq!(res.status, StatusCode::OK);
    assert!(!res.served_from_cache());
}

#[tokio::test]
async fn writes_evict_cached_reads() {
    let app = TestApp::new();
    app.seed("Heat", 1995, &["Crime"]).await;

    app.get("/api/movies", &Caller::Anonymous).await;
    assert!(app.get("/api/movies", &Caller::Anonymous).await.served_from_cache());

    let created = app
        .send(
            Method::POST,
            "/api/movies",
            &app.member(),
            Some(json!({ "title": "Up", "yearOfRelease": 2009, "genres": ["Animation"] })),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);

    let after = app.get("/api/movies", &Caller::Anonymous).await;
    assert!(!after.served_from_cache());
    assert_eq!(after.data()["total"], 2);
}

#[tokio::test]
async fn credentialed_reads_bypass_the_cache() {
    let app = TestApp::new();
    let movie = app.seed("Heat", 1995, &["Crime"]).await;
    let uri = format!("/api/movies/{}", movie.id);
    let member = app.member();

    app.get(&uri, &member).await;
    let again = app.get(&uri, &member).await;
    assert_eq!(again.status, StatusCode::OK);
    assert!(!again.served_from_cache());

    // and an authenticated read does not fill the store for anonymous callers
    assert!(!app.get(&uri, &Caller::Anonymous).await.served_from_cache());
}
