pub mod movie_service;
pub mod rating_service;
pub mod validation;

pub use movie_service::MovieService;
pub use rating_service::RatingService;
pub use validation::{MovieValidator, OptionsValidator, ValidationErrors};

use thiserror::Error;

use crate::database::DatabaseError;

/// Failures surfaced by the service layer. Absence is not among them.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    #[error(transparent)]
    Database(#[from] DatabaseError),
}
