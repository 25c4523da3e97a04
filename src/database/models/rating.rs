use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One of the caller's ratings, joined with the rated movie's slug
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct MovieRating {
    #[sqlx(rename = "movieid")]
    pub movie_id: Uuid,
    pub slug: String,
    pub rating: i32,
}
