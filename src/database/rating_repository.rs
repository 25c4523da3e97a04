use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::MovieRating;

#[async_trait]
pub trait RatingRepository: Send + Sync {
    /// Insert or overwrite the rating keyed by (movie, user)
    async fn rate_movie(&self, movie_id: Uuid, rating: i32, user_id: Uuid) -> Result<bool, DatabaseError>;

    async fn get_ratings_for_user(&self, user_id: Uuid) -> Result<Vec<MovieRating>, DatabaseError>;
}

pub struct PgRatingRepository {
    pool: PgPool,
}

impl PgRatingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RatingRepository for PgRatingRepository {
    async fn rate_movie(&self, movie_id: Uuid, rating: i32, user_id: Uuid) -> Result<bool, DatabaseError> {
        let result = sqlx::query(
            r#"
            INSERT INTO ratings (userid, movieid, rating)
            VALUES ($1, $2, $3)
            ON CONFLICT (userid, movieid) DO UPDATE
                SET rating = EXCLUDED.rating
            "#,
        )
        .bind(user_id)
        .bind(movie_id)
        .bind(rating)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn get_ratings_for_user(&self, user_id: Uuid) -> Result<Vec<MovieRating>, DatabaseError> {
        let ratings = sqlx::query_as::<_, MovieRating>(
            r#"
            SELECT r.rating, r.movieid, m.slug
            FROM ratings r
            INNER JOIN movies m ON r.movieid = m.id
            WHERE r.userid = $1
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(ratings)
    }
}
