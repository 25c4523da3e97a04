use std::sync::Arc;

use uuid::Uuid;

use crate::database::models::MovieRating;
use crate::database::{MovieRepository, RatingRepository};

use super::validation::validate_rating;
use super::ServiceError;

#[derive(Clone)]
pub struct RatingService {
    ratings: Arc<dyn RatingRepository>,
    movies: Arc<dyn MovieRepository>,
}

impl RatingService {
    pub fn new(ratings: Arc<dyn RatingRepository>, movies: Arc<dyn MovieRepository>) -> Self {
        Self { ratings, movies }
    }

    /// Upserts the caller's rating. `Ok(false)` when the movie does not exist.
    pub async fn rate_movie(&self, movie_id: Uuid, rating: i32, user_id: Uuid) -> Result<bool, ServiceError> {
        validate_rating(rating)?;

        if !self.movies.exists_by_id(movie_id).await? {
            return Ok(false);
        }

        Ok(self.ratings.rate_movie(movie_id, rating, user_id).await?)
    }

    pub async fn get_ratings_for_user(&self, user_id: Uuid) -> Result<Vec<MovieRating>, ServiceError> {
        Ok(self.ratings.get_ratings_for_user(user_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::Movie;
    use crate::testing::InMemoryStore;

    async fn seeded() -> (RatingService, InMemoryStore, Uuid) {
        let store = InMemoryStore::new();
        let movie = Movie::new(Uuid::new_v4(), "Up", 2009, vec!["Animation".to_string()]);
        store.insert(movie.clone()).await;
        let service = RatingService::new(Arc::new(store.clone()), Arc::new(store.clone()));
        (service, store, movie.id)
    }

    #[tokio::test]
    async fn valid_ratings_are_readable_back() {
        let (service, store, movie_id) = seeded().await;
        let user = Uuid::new_v4();

        for r in 1..=5 {
            assert!(service.rate_movie(movie_id, r, user).await.unwrap());
            let movie = store.get_by_id(movie_id, Some(user)).await.unwrap().unwrap();
            assert_eq!(movie.user_rating, Some(r));
        }
        assert_eq!(store.rating_count().await, 1);
    }

    #[tokio::test]
    async fn out_of_range_rating_is_rejected_without_writing() {
        let (service, store, movie_id) = seeded().await;

        for r in [0, 6, -3] {
            let err = service.rate_movie(movie_id, r, Uuid::new_v4()).await.unwrap_err();
            assert!(matches!(err, ServiceError::Validation(ref e) if e.contains("rating")));
        }
        assert_eq!(store.rating_count().await, 0);
    }

    #[tokio::test]
    async fn rating_missing_movie_returns_false() {
        let (service, store, _) = seeded().await;

        assert!(!service.rate_movie(Uuid::new_v4(), 4, Uuid::new_v4()).await.unwrap());
        assert_eq!(store.rating_count().await, 0);
    }

    #[tokio::test]
    async fn concurrent_ratings_converge_to_one_row() {
        let (service, store, movie_id) = seeded().await;
        let user = Uuid::new_v4();

        let handles: Vec<_> = (1..=5)
            .map(|r| {
                let service = service.clone();
                tokio::spawn(async move { service.rate_movie(movie_id, r, user).await })
            })
            .collect();
        for handle in handles {
            assert!(handle.await.unwrap().unwrap());
        }

        assert_eq!(store.rating_count().await, 1);
        let ratings = service.get_ratings_for_user(user).await.unwrap();
        assert_eq!(ratings.len(), 1);
        assert!((1..=5).contains(&ratings[0].rating));
        assert_eq!(ratings[0].slug, "up-2009");
    }

    #[tokio::test]
    async fn aggregate_rating_is_average_rounded() {
        let (service, store, movie_id) = seeded().await;
        for r in [5, 4, 4] {
            service.rate_movie(movie_id, r, Uuid::new_v4()).await.unwrap();
        }
        let movie = store.get_by_id(movie_id, None).await.unwrap().unwrap();
        assert_eq!(movie.rating, Some(4.3));
        assert_eq!(movie.user_rating, None);
    }
}
