use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::{debug, warn};

use crate::app::AppState;
use crate::auth::{evaluate, validate_jwt, AuthDecision, DenyReason, Identity, Policy, API_KEY_HEADER};
use crate::error::ApiError;

/// Establishes the caller identity from an optional bearer token.
///
/// A missing, malformed or invalid token leaves the caller anonymous; the
/// route-level policies decide whether that is enough.
pub async fn authenticate(State(state): State<AppState>, mut request: Request, next: Next) -> Response {
    let identity = match extract_bearer(request.headers()) {
        Ok(None) => Identity::anonymous(),
        Ok(Some(token)) => match validate_jwt(token, &state.config.security) {
            Ok(claims) => Identity::from(claims),
            Err(e) => {
                warn!("Ignoring bearer token: {}", e);
                Identity::anonymous()
            }
        },
        Err(msg) => {
            warn!("Ignoring Authorization header: {}", msg);
            Identity::anonymous()
        }
    };

    request.extensions_mut().insert(identity);
    next.run(request).await
}

fn extract_bearer(headers: &HeaderMap) -> Result<Option<&str>, &'static str> {
    let Some(value) = headers.get(header::AUTHORIZATION) else {
        return Ok(None);
    };

    let auth_str = value
        .to_str()
        .map_err(|_| "Invalid Authorization header format")?;

    match auth_str.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => Ok(Some(token.trim())),
        Some(_) => Err("Empty JWT token"),
        None => Err("Authorization header must use Bearer token format"),
    }
}

pub async fn require_admin(state: State<AppState>, request: Request, next: Next) -> Response {
    authorize(Policy::Admin, state, request, next).await
}

pub async fn require_trusted_member(state: State<AppState>, request: Request, next: Next) -> Response {
    authorize(Policy::TrustedMember, state, request, next).await
}

pub async fn require_authenticated(state: State<AppState>, request: Request, next: Next) -> Response {
    authorize(Policy::Authenticated, state, request, next).await
}

async fn authorize(policy: Policy, State(state): State<AppState>, mut request: Request, next: Next) -> Response {
    let identity = request
        .extensions()
        .get::<Identity>()
        .cloned()
        .unwrap_or_default();

    let api_key = request.headers().get(API_KEY_HEADER).map(|v| v.as_bytes());

    match evaluate(policy, &identity, api_key, &state.config.security) {
        AuthDecision::Allow { attributed_user_id } => {
            if let Some(user_id) = attributed_user_id {
                debug!("API key accepted for {:?}; attributing request to {}", policy, user_id);
                request.extensions_mut().insert(identity.attributed_to(user_id));
            }
            next.run(request).await
        }
        AuthDecision::Deny(reason) => {
            warn!("Authorization for {:?} denied: {:?}", policy, reason);
            match reason {
                DenyReason::Unauthenticated => ApiError::unauthorized("Authentication required"),
                DenyReason::InvalidApiKey => ApiError::unauthorized("Invalid API Key"),
                DenyReason::MissingClaim => ApiError::forbidden("Insufficient permissions"),
            }
            .into_response()
        }
    }
}
