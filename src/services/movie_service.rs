use std::sync::Arc;

use uuid::Uuid;

use crate::database::models::Movie;
use crate::database::MovieRepository;
use crate::filter::GetAllMoviesOptions;

use super::validation::MovieValidator;
use super::ServiceError;

/// Orchestrates validation and existence checks over the movie repository
#[derive(Clone)]
pub struct MovieService {
    repository: Arc<dyn MovieRepository>,
}

impl MovieService {
    pub fn new(repository: Arc<dyn MovieRepository>) -> Self {
        Self { repository }
    }

    pub async fn create(&self, movie: &Movie) -> Result<bool, ServiceError> {
        MovieValidator::validate(movie, self.repository.as_ref()).await?;
        Ok(self.repository.create(movie).await?)
    }

    pub async fn get_by_id(&self, id: Uuid, user_id: Option<Uuid>) -> Result<Option<Movie>, ServiceError> {
        Ok(self.repository.get_by_id(id, user_id).await?)
    }

    pub async fn get_by_slug(&self, slug: &str, user_id: Option<Uuid>) -> Result<Option<Movie>, ServiceError> {
        Ok(self.repository.get_by_slug(slug, user_id).await?)
    }

    pub async fn get_all(&self, options: &GetAllMoviesOptions) -> Result<Vec<Movie>, ServiceError> {
        Ok(self.repository.get_all(options).await?)
    }

    pub async fn get_count(&self, title: Option<&str>, year_of_release: Option<i32>) -> Result<i64, ServiceError> {
        Ok(self.repository.get_count(title, year_of_release).await?)
    }

    /// Replaces the movie. Returns `None` when it does not exist; never creates.
    pub async fn update(&self, movie: &Movie, user_id: Option<Uuid>) -> Result<Option<Movie>, ServiceError> {
        MovieValidator::validate(movie, self.repository.as_ref()).await?;

        if !self.repository.exists_by_id(movie.id).await? {
            return Ok(None);
        }

        if !self.repository.update(movie).await? {
            return Ok(None);
        }

        // Re-read so the derived ratings reflect the caller
        Ok(self.repository.get_by_id(movie.id, user_id).await?)
    }

    pub async fn delete_by_id(&self, id: Uuid) -> Result<bool, ServiceError> {
        Ok(self.repository.delete_by_id(id).await?)
    }

    pub async fn health_check(&self) -> Result<(), ServiceError> {
        Ok(self.repository.health_check().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::InMemoryStore;

    fn service() -> (MovieService, InMemoryStore) {
        let store = InMemoryStore::new();
        (MovieService::new(Arc::new(store.clone())), store)
    }

    fn movie(title: &str, genres: &[&str]) -> Movie {
        Movie::new(Uuid::new_v4(), title, 2001, genres.iter().map(|g| g.to_string()).collect())
    }

    #[tokio::test]
    async fn create_then_get_round_trips() {
        let (service, _) = service();
        let m = movie("Donnie Darko", &["Drama", "Sci-Fi"]);

        assert!(service.create(&m).await.unwrap());

        let stored = service.get_by_id(m.id, None).await.unwrap().unwrap();
        assert_eq!(stored.title, m.title);
        assert_eq!(stored.year_of_release, m.year_of_release);
        let mut genres = stored.genres.clone();
        genres.sort();
        assert_eq!(genres, vec!["Drama", "Sci-Fi"]);

        let by_slug = service.get_by_slug("donnie-darko-2001", None).await.unwrap();
        assert_eq!(by_slug.map(|m| m.id), Some(m.id));
    }

    #[tokio::test]
    async fn create_rejects_invalid_movie_without_writing() {
        let (service, store) = service();
        let m = movie("", &[]);

        let err = service.create(&m).await.unwrap_err();
        match err {
            ServiceError::Validation(errors) => {
                assert!(errors.contains("title"));
                assert!(errors.contains("genres"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
        assert_eq!(store.movie_count().await, 0);
    }

    #[tokio::test]
    async fn create_rejects_taken_slug() {
        let (service, _) = service();
        service.create(&movie("Memento", &["Thriller"])).await.unwrap();

        let err = service.create(&movie("Memento", &["Mystery"])).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(ref e) if e.contains("slug")));
    }

    #[tokio::test]
    async fn update_missing_movie_is_absent_and_writes_nothing() {
        let (service, store) = service();
        let m = movie("Amelie", &["Romance"]);

        assert!(service.update(&m, None).await.unwrap().is_none());
        assert_eq!(store.movie_count().await, 0);
        assert!(store.genres_of(m.id).await.is_empty());
    }

    #[tokio::test]
    async fn update_replaces_scalars_and_genres() {
        let (service, store) = service();
        let mut m = movie("Alien", &["Horror", "Sci-Fi"]);
        service.create(&m).await.unwrap();

        m.title = "Aliens".to_string();
        m.year_of_release = 1986;
        m.genres = vec!["Action".to_string()];
        let updated = service.update(&m, None).await.unwrap().unwrap();

        assert_eq!(updated.title, "Aliens");
        assert_eq!(store.genres_of(m.id).await, vec!["Action"]);
        assert!(service.get_by_slug("aliens-1986", None).await.unwrap().is_some());
        assert!(service.get_by_slug("alien-2001", None).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_keeps_own_slug() {
        let (service, _) = service();
        let mut m = movie("Heat", &["Crime"]);
        service.create(&m).await.unwrap();

        m.genres.push("Drama".to_string());
        assert!(service.update(&m, None).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn delete_twice_returns_true_then_false() {
        let (service, store) = service();
        let m = movie("Fargo", &["Crime"]);
        service.create(&m).await.unwrap();

        assert!(service.delete_by_id(m.id).await.unwrap());
        assert!(store.genres_of(m.id).await.is_empty());
        assert!(!service.delete_by_id(m.id).await.unwrap());
    }
}
