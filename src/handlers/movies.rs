use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    Extension, Json,
};
use tracing::info;
use uuid::Uuid;

use crate::api::{CreateMovieRequest, DeletedResponse, GetAllMoviesRequest, MovieResponse, MoviesResponse, UpdateMovieRequest};
use crate::app::AppState;
use crate::auth::Identity;
use crate::cache::MOVIES_TAG;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::OptionsValidator;

/// POST /api/movies - create a movie, 201 with Location
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CreateMovieRequest>, JsonRejection>,
) -> ApiResult<MovieResponse> {
    let Json(request) = payload?;
    let movie = request.into_movie();

    if !state.movies.create(&movie).await? {
        return Err(ApiError::internal_server_error("Movie could not be created"));
    }
    state.cache.evict_by_tag(MOVIES_TAG).await;

    info!("Created movie {} ({})", movie.id, movie.slug());
    let location = format!("/api/movies/{}", movie.id);
    Ok(ApiResponse::created(MovieResponse::from(movie), location))
}

/// GET /api/movies/:idOrSlug - a UUID is looked up by id, anything else by slug
pub async fn get(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id_or_slug): Path<String>,
) -> ApiResult<MovieResponse> {
    let movie = match Uuid::parse_str(&id_or_slug) {
        Ok(id) => state.movies.get_by_id(id, identity.user_id).await?,
        Err(_) => state.movies.get_by_slug(&id_or_slug, identity.user_id).await?,
    };

    movie
        .map(|m| ApiResponse::success(MovieResponse::from(m)))
        .ok_or_else(|| ApiError::not_found(format!("Movie '{}' not found", id_or_slug)))
}

/// GET /api/movies - filtered, sorted, paged listing
pub async fn get_all(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    query: Result<Query<GetAllMoviesRequest>, QueryRejection>,
) -> ApiResult<MoviesResponse> {
    let Query(request) = query?;
    let api = &state.config.api;
    let options = OptionsValidator::build(
        request.title,
        request.year,
        request.sort_by.as_deref(),
        request.page,
        request.page_size,
        api.default_page_size,
        api.max_page_size,
    )?
    .with_user_id(identity.user_id);

    let movies = state.movies.get_all(&options).await?;
    let total = state
        .movies
        .get_count(options.title.as_deref(), options.year_of_release)
        .await?;

    Ok(ApiResponse::success(MoviesResponse::from_page(
        movies,
        options.page,
        options.page_size,
        total,
    )))
}

/// PUT /api/movies/:id - full replace; never creates
pub async fn update(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    path: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<UpdateMovieRequest>, JsonRejection>,
) -> ApiResult<MovieResponse> {
    let Path(id) = path?;
    let Json(request) = payload?;
    let movie = request.into_movie(id);

    let Some(updated) = state.movies.update(&movie, identity.user_id).await? else {
        return Err(ApiError::not_found(format!("Movie '{}' not found", id)));
    };
    state.cache.evict_by_tag(MOVIES_TAG).await;

    Ok(ApiResponse::success(MovieResponse::from(updated)))
}

/// DELETE /api/movies/:id
pub async fn delete(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<DeletedResponse> {
    let Path(id) = path?;
    if !state.movies.delete_by_id(id).await? {
        return Err(ApiError::not_found(format!("Movie '{}' not found", id)));
    }
    state.cache.evict_by_tag(MOVIES_TAG).await;

    info!("Deleted movie {}", id);
    Ok(ApiResponse::success(DeletedResponse { id }))
}
