//! In-memory repositories mirroring the Postgres semantics, for tests that
//! should not need a database.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::database::models::{Movie, MovieRating};
use crate::database::{DatabaseError, MovieRepository, RatingRepository};
use crate::filter::{GetAllMoviesOptions, SortDirection, SortField};

#[derive(Debug, Clone)]
struct MovieRecord {
    id: Uuid,
    slug: String,
    title: String,
    year_of_release: i32,
}

#[derive(Default)]
struct Tables {
    // Vec keeps insertion order for unsorted listings
    movies: Vec<MovieRecord>,
    genres: Vec<(Uuid, String)>,
    ratings: HashMap<(Uuid, Uuid), i32>,
}

impl Tables {
    fn assemble(&self, record: &MovieRecord, user_id: Option<Uuid>) -> Movie {
        let genres = self
            .genres
            .iter()
            .filter(|(movie_id, _)| *movie_id == record.id)
            .map(|(_, name)| name.clone())
            .collect();

        let values: Vec<i32> = self
            .ratings
            .iter()
            .filter(|((movie_id, _), _)| *movie_id == record.id)
            .map(|(_, rating)| *rating)
            .collect();
        let rating = if values.is_empty() {
            None
        } else {
            let avg = values.iter().map(|v| f64::from(*v)).sum::<f64>() / values.len() as f64;
            Some(((avg * 10.0).round() / 10.0) as f32)
        };

        let user_rating = user_id.and_then(|user| self.ratings.get(&(record.id, user)).copied());

        Movie {
            id: record.id,
            title: record.title.clone(),
            year_of_release: record.year_of_release,
            genres,
            rating,
            user_rating,
        }
    }

    fn matching(&self, title: Option<&str>, year: Option<i32>) -> Vec<&MovieRecord> {
        let needle = title.map(str::to_lowercase);
        self.movies
            .iter()
            .filter(|m| needle.as_deref().map_or(true, |n| m.title.to_lowercase().contains(n)))
            .filter(|m| year.map_or(true, |y| m.year_of_release == y))
            .collect()
    }
}

/// Shared handle; clones see the same tables
#[derive(Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a movie directly, bypassing validation
    pub async fn insert(&self, movie: Movie) {
        let mut tables = self.tables.write().await;
        for genre in &movie.genres {
            tables.genres.push((movie.id, genre.clone()));
        }
        tables.movies.push(MovieRecord {
            id: movie.id,
            slug: movie.slug(),
            title: movie.title,
            year_of_release: movie.year_of_release,
        });
    }

    pub async fn movie_count(&self) -> usize {
        self.tables.read().await.movies.len()
    }

    pub async fn rating_count(&self) -> usize {
        self.tables.read().await.ratings.len()
    }

    pub async fn genres_of(&self, movie_id: Uuid) -> Vec<String> {
        self.tables
            .read()
            .await
            .genres
            .iter()
            .filter(|(id, _)| *id == movie_id)
            .map(|(_, name)| name.clone())
            .collect()
    }
}

#[async_trait]
impl MovieRepository for InMemoryStore {
    async fn create(&self, movie: &Movie) -> Result<bool, DatabaseError> {
        let mut tables = self.tables.write().await;
        let slug = movie.slug();
        if tables.movies.iter().any(|m| m.id == movie.id || m.slug == slug) {
            return Err(DatabaseError::Duplicate(format!("movie {} / {}", movie.id, slug)));
        }
        tables.movies.push(MovieRecord {
            id: movie.id,
            slug,
            title: movie.title.clone(),
            year_of_release: movie.year_of_release,
        });
        for genre in &movie.genres {
            tables.genres.push((movie.id, genre.clone()));
        }
        Ok(true)
    }

    async fn get_by_id(&self, id: Uuid, user_id: Option<Uuid>) -> Result<Option<Movie>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables
            .movies
            .iter()
            .find(|m| m.id == id)
            .map(|m| tables.assemble(m, user_id)))
    }

    async fn get_by_slug(&self, slug: &str, user_id: Option<Uuid>) -> Result<Option<Movie>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables
            .movies
            .iter()
            .find(|m| m.slug == slug)
            .map(|m| tables.assemble(m, user_id)))
    }

    async fn get_all(&self, options: &GetAllMoviesOptions) -> Result<Vec<Movie>, DatabaseError> {
        let tables = self.tables.read().await;
        let mut records = tables.matching(options.title.as_deref(), options.year_of_release);

        if let Some(sort) = options.sort {
            records.sort_by(|a, b| {
                let ordering = match sort.field {
                    SortField::Title => a.title.cmp(&b.title),
                    SortField::YearOfRelease => a.year_of_release.cmp(&b.year_of_release),
                };
                match sort.direction {
                    SortDirection::Asc => ordering,
                    SortDirection::Desc => ordering.reverse(),
                }
            });
        }

        Ok(records
            .into_iter()
            .skip(options.offset() as usize)
            .take(options.limit() as usize)
            .map(|m| tables.assemble(m, options.user_id))
            .collect())
    }

    async fn get_count(&self, title: Option<&str>, year_of_release: Option<i32>) -> Result<i64, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables.matching(title, year_of_release).len() as i64)
    }

    async fn update(&self, movie: &Movie) -> Result<bool, DatabaseError> {
        let mut tables = self.tables.write().await;
        let Some(index) = tables.movies.iter().position(|m| m.id == movie.id) else {
            return Ok(false);
        };

        tables.genres.retain(|(id, _)| *id != movie.id);
        for genre in &movie.genres {
            tables.genres.push((movie.id, genre.clone()));
        }
        tables.movies[index] = MovieRecord {
            id: movie.id,
            slug: movie.slug(),
            title: movie.title.clone(),
            year_of_release: movie.year_of_release,
        };
        Ok(true)
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool, DatabaseError> {
        let mut tables = self.tables.write().await;
        tables.genres.retain(|(movie_id, _)| *movie_id != id);
        tables.ratings.retain(|(movie_id, _), _| *movie_id != id);
        let before = tables.movies.len();
        tables.movies.retain(|m| m.id != id);
        Ok(tables.movies.len() < before)
    }

    async fn exists_by_id(&self, id: Uuid) -> Result<bool, DatabaseError> {
        Ok(self.tables.read().await.movies.iter().any(|m| m.id == id))
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}

#[async_trait]
impl RatingRepository for InMemoryStore {
    async fn rate_movie(&self, movie_id: Uuid, rating: i32, user_id: Uuid) -> Result<bool, DatabaseError> {
        let mut tables = self.tables.write().await;
        tables.ratings.insert((movie_id, user_id), rating);
        Ok(true)
    }

    async fn get_ratings_for_user(&self, user_id: Uuid) -> Result<Vec<MovieRating>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables
            .ratings
            .iter()
            .filter(|((_, user), _)| *user == user_id)
            .filter_map(|((movie_id, _), rating)| {
                tables.movies.iter().find(|m| m.id == *movie_id).map(|m| MovieRating {
                    movie_id: *movie_id,
                    slug: m.slug.clone(),
                    rating: *rating,
                })
            })
            .collect())
    }
}
