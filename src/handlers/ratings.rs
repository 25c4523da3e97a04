use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    Extension, Json,
};
use uuid::Uuid;

use crate::api::{MovieRatingResponse, RateMovieRequest, RateMovieResponse};
use crate::app::AppState;
use crate::auth::Identity;
use crate::cache::MOVIES_TAG;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};

fn caller(identity: &Identity) -> Result<Uuid, ApiError> {
    identity
        .user_id
        .ok_or_else(|| ApiError::unauthorized("Caller has no user id"))
}

/// PUT /api/movies/:id/ratings - upsert the caller's rating
pub async fn rate_movie(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    path: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<RateMovieRequest>, JsonRejection>,
) -> ApiResult<RateMovieResponse> {
    let Path(id) = path?;
    let Json(request) = payload?;
    let user_id = caller(&identity)?;

    if !state.ratings.rate_movie(id, request.rating, user_id).await? {
        return Err(ApiError::not_found(format!("Movie '{}' not found", id)));
    }
    state.cache.evict_by_tag(MOVIES_TAG).await;

    Ok(ApiResponse::success(RateMovieResponse {
        movie_id: id,
        rating: request.rating,
    }))
}

/// GET /api/ratings/me
pub async fn get_user_ratings(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> ApiResult<Vec<MovieRatingResponse>> {
    let user_id = caller(&identity)?;
    let ratings = state.ratings.get_ratings_for_user(user_id).await?;

    Ok(ApiResponse::success(
        ratings.into_iter().map(MovieRatingResponse::from).collect(),
    ))
}
