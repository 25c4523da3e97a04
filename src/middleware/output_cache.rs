use axum::{
    body::{to_bytes, Body},
    extract::{Request, State},
    http::{header, HeaderMap, Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::{debug, error};

use crate::app::AppState;
use crate::auth::API_KEY_HEADER;
use crate::cache::{CachedResponse, MOVIES_TAG};
use crate::error::ApiError;

/// Upper bound on a response body kept in the store
const MAX_CACHED_BODY_BYTES: usize = 4 * 1024 * 1024;

/// Serves anonymous GET reads from the output cache, filling it on 200s.
///
/// Requests carrying credentials bypass the store entirely, since their
/// responses include caller-scoped ratings.
pub async fn output_cache(State(state): State<AppState>, request: Request, next: Next) -> Response {
    if request.method() != Method::GET || carries_credentials(request.headers()) {
        return next.run(request).await;
    }

    let key = format!("{} {}", request.method(), request.uri());
    if let Some(hit) = state.cache.get(&key).await {
        debug!("Output cache hit: {}", key);
        return hit.into_response();
    }

    let response = next.run(request).await;
    if response.status() != StatusCode::OK {
        return response;
    }

    let (parts, body) = response.into_parts();
    let bytes = match to_bytes(body, MAX_CACHED_BODY_BYTES).await {
        Ok(bytes) => bytes,
        Err(e) => {
            error!("Failed to buffer response for caching: {}", e);
            return ApiError::internal_server_error("Failed to format response").into_response();
        }
    };

    state
        .cache
        .set(
            key,
            &[MOVIES_TAG],
            CachedResponse {
                status: parts.status,
                content_type: parts.headers.get(header::CONTENT_TYPE).cloned(),
                body: bytes.clone(),
            },
        )
        .await;

    Response::from_parts(parts, Body::from(bytes))
}

fn carries_credentials(headers: &HeaderMap) -> bool {
    headers.contains_key(header::AUTHORIZATION) || headers.contains_key(API_KEY_HEADER)
}
