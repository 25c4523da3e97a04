use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::{Movie, MovieListRow, MovieRow};
use crate::database::query_builder::QueryBuilder;
use crate::filter::GetAllMoviesOptions;

/// Data access for movies and their genre rows.
///
/// Absence is never an error: lookups return `None`, writes return `false`.
#[async_trait]
pub trait MovieRepository: Send + Sync {
    async fn create(&self, movie: &Movie) -> Result<bool, DatabaseError>;

    async fn get_by_id(&self, id: Uuid, user_id: Option<Uuid>) -> Result<Option<Movie>, DatabaseError>;

    async fn get_by_slug(&self, slug: &str, user_id: Option<Uuid>) -> Result<Option<Movie>, DatabaseError>;

    async fn get_all(&self, options: &GetAllMoviesOptions) -> Result<Vec<Movie>, DatabaseError>;

    async fn get_count(&self, title: Option<&str>, year_of_release: Option<i32>) -> Result<i64, DatabaseError>;

    async fn update(&self, movie: &Movie) -> Result<bool, DatabaseError>;

    async fn delete_by_id(&self, id: Uuid) -> Result<bool, DatabaseError>;

    async fn exists_by_id(&self, id: Uuid) -> Result<bool, DatabaseError>;

    async fn health_check(&self) -> Result<(), DatabaseError>;
}

pub struct PgMovieRepository {
    pool: PgPool,
}

impl PgMovieRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn get_by(&self, key_column: &str, key: KeyParam<'_>, user_id: Option<Uuid>) -> Result<Option<Movie>, DatabaseError> {
        let mut conn = self.pool.acquire().await?;

        let sql = QueryBuilder::select_one(key_column);
        let query = sqlx::query_as::<_, MovieRow>(&sql).bind(user_id);
        let row = match key {
            KeyParam::Id(id) => query.bind(id),
            KeyParam::Slug(slug) => query.bind(slug),
        }
        .fetch_optional(&mut *conn)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let genres: Vec<String> = sqlx::query_scalar(QueryBuilder::select_genres())
            .bind(row.id)
            .fetch_all(&mut *conn)
            .await?;

        Ok(Some(row.into_movie(genres)))
    }
}

/// Genre rows in list order; `position` preserves it for reads
async fn insert_genres(tx: &mut Transaction<'_, Postgres>, movie: &Movie) -> Result<(), DatabaseError> {
    for (position, genre) in movie.genres.iter().enumerate() {
        sqlx::query("INSERT INTO genres (movieid, name, position) VALUES ($1, $2, $3)")
            .bind(movie.id)
            .bind(genre)
            .bind(position as i32)
            .execute(&mut **tx)
            .await?;
    }
    Ok(())
}

enum KeyParam<'a> {
    Id(Uuid),
    Slug(&'a str),
}

#[async_trait]
impl MovieRepository for PgMovieRepository {
    async fn create(&self, movie: &Movie) -> Result<bool, DatabaseError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            "INSERT INTO movies (id, slug, title, yearofrelease) VALUES ($1, $2, $3, $4)",
        )
        .bind(movie.id)
        .bind(movie.slug())
        .bind(&movie.title)
        .bind(movie.year_of_release)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() != 1 {
            tx.rollback().await?;
            return Ok(false);
        }

        insert_genres(&mut tx, movie).await?;

        tx.commit().await?;
        Ok(true)
    }

    async fn get_by_id(&self, id: Uuid, user_id: Option<Uuid>) -> Result<Option<Movie>, DatabaseError> {
        self.get_by("id", KeyParam::Id(id), user_id).await
    }

    async fn get_by_slug(&self, slug: &str, user_id: Option<Uuid>) -> Result<Option<Movie>, DatabaseError> {
        self.get_by("slug", KeyParam::Slug(slug), user_id).await
    }

    async fn get_all(&self, options: &GetAllMoviesOptions) -> Result<Vec<Movie>, DatabaseError> {
        let sql = QueryBuilder::select_all(options);
        let rows = sqlx::query_as::<_, MovieListRow>(&sql)
            .bind(options.user_id)
            .bind(options.title.as_deref())
            .bind(options.year_of_release)
            .bind(options.limit())
            .bind(options.offset())
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Movie::from).collect())
    }

    async fn get_count(&self, title: Option<&str>, year_of_release: Option<i32>) -> Result<i64, DatabaseError> {
        let sql = QueryBuilder::count();
        let count: i64 = sqlx::query_scalar(&sql)
            .bind(title)
            .bind(year_of_release)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn update(&self, movie: &Movie) -> Result<bool, DatabaseError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM genres WHERE movieid = $1")
            .bind(movie.id)
            .execute(&mut *tx)
            .await?;

        insert_genres(&mut tx, movie).await?;

        let result = sqlx::query(
            "UPDATE movies SET slug = $1, title = $2, yearofrelease = $3 WHERE id = $4",
        )
        .bind(movie.slug())
        .bind(&movie.title)
        .bind(movie.year_of_release)
        .bind(movie.id)
        .execute(&mut *tx)
        .await?;

        // Genre rewrite must not outlive a scalar update that matched nothing
        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(false);
        }

        tx.commit().await?;
        Ok(true)
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool, DatabaseError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM genres WHERE movieid = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        // Ratings reference the movie row as well
        sqlx::query("DELETE FROM ratings WHERE movieid = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM movies WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }

    async fn exists_by_id(&self, id: Uuid) -> Result<bool, DatabaseError> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM movies WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        DatabaseManager::health_check(&self.pool).await
    }
}
