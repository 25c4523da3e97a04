use std::sync::Arc;
use std::time::Duration;

use axum::{
    middleware::from_fn_with_state,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::cache::OutputCacheStore;
use crate::config::AppConfig;
use crate::database::{MovieRepository, RatingRepository};
use crate::handlers::{health, movies, ratings};
use crate::middleware::{authenticate, output_cache, require_admin, require_authenticated, require_trusted_member};
use crate::services::{MovieService, RatingService};

/// Shared, cheaply clonable handler state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub movies: MovieService,
    pub ratings: RatingService,
    pub cache: OutputCacheStore,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        movie_repository: Arc<dyn MovieRepository>,
        rating_repository: Arc<dyn RatingRepository>,
    ) -> Self {
        let cache = OutputCacheStore::new(Duration::from_secs(config.api.output_cache_ttl_secs));
        Self {
            movies: MovieService::new(movie_repository.clone()),
            ratings: RatingService::new(rating_repository, movie_repository),
            cache,
            config: Arc::new(config),
        }
    }
}

pub fn router(state: AppState) -> Router {
    let enable_cors = state.config.security.enable_cors;

    let app = Router::new()
        .route("/health", get(health::health))
        .merge(movie_read_routes(state.clone()))
        .merge(movie_write_routes(state.clone()))
        .merge(movie_admin_routes(state.clone()))
        .merge(rating_routes(state.clone()))
        // Identity must be established before any route-level authorization
        .layer(from_fn_with_state(state.clone(), authenticate))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    if enable_cors {
        app.layer(CorsLayer::permissive())
    } else {
        app
    }
}

fn movie_read_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/api/movies", get(movies::get_all))
        .route("/api/movies/:id", get(movies::get))
        .route_layer(from_fn_with_state(state, output_cache))
}

fn movie_write_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/api/movies", post(movies::create))
        .route("/api/movies/:id", put(movies::update))
        .route_layer(from_fn_with_state(state, require_trusted_member))
}

fn movie_admin_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/api/movies/:id", delete(movies::delete))
        .route_layer(from_fn_with_state(state, require_admin))
}

fn rating_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/api/movies/:id/ratings", put(ratings::rate_movie))
        .route("/api/ratings/me", get(ratings::get_user_ratings))
        .route_layer(from_fn_with_state(state, require_authenticated))
}
