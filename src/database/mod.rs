pub mod manager;
pub mod models;
pub mod movie_repository;
pub mod query_builder;
pub mod rating_repository;

pub use manager::{DatabaseError, DatabaseManager};
pub use movie_repository::{MovieRepository, PgMovieRepository};
pub use rating_repository::{PgRatingRepository, RatingRepository};
