use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Catalog entry as seen by the service layer.
///
/// `rating` and `user_rating` are derived by the store on read and are
/// ignored on write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub id: Uuid,
    pub title: String,
    pub year_of_release: i32,
    pub genres: Vec<String>,
    pub rating: Option<f32>,
    pub user_rating: Option<i32>,
}

impl Movie {
    pub fn new(id: Uuid, title: impl Into<String>, year_of_release: i32, genres: Vec<String>) -> Self {
        Self {
            id,
            title: title.into(),
            year_of_release,
            genres,
            rating: None,
            user_rating: None,
        }
    }

    /// URL-safe alternate key: title stripped to `[0-9A-Za-z _-]`, lowercased,
    /// spaces turned into dashes, suffixed with the release year.
    pub fn slug(&self) -> String {
        let cleaned: String = self
            .title
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || matches!(c, ' ' | '_' | '-'))
            .collect();
        format!("{}-{}", cleaned.to_ascii_lowercase().replace(' ', "-"), self.year_of_release)
    }
}

/// Single-movie query shape: scalar columns plus aggregate and caller rating.
#[derive(Debug, Clone, FromRow)]
pub struct MovieRow {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub yearofrelease: i32,
    pub rating: Option<f32>,
    pub userrating: Option<i32>,
}

impl MovieRow {
    pub fn into_movie(self, genres: Vec<String>) -> Movie {
        Movie {
            id: self.id,
            title: self.title,
            year_of_release: self.yearofrelease,
            genres,
            rating: self.rating,
            user_rating: self.userrating,
        }
    }
}

/// List query shape: genres arrive as one comma-joined aggregate.
#[derive(Debug, Clone, FromRow)]
pub struct MovieListRow {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub yearofrelease: i32,
    pub genres: Option<String>,
    pub rating: Option<f32>,
    pub userrating: Option<i32>,
}

impl From<MovieListRow> for Movie {
    fn from(row: MovieListRow) -> Self {
        Movie {
            id: row.id,
            title: row.title,
            year_of_release: row.yearofrelease,
            genres: split_genres(row.genres.as_deref()),
            rating: row.rating,
            user_rating: row.userrating,
        }
    }
}

/// Splits a comma-joined genre aggregate. A movie without genres yields an
/// empty list, never a list holding one empty name.
pub fn split_genres(aggregate: Option<&str>) -> Vec<String> {
    match aggregate {
        None => Vec::new(),
        Some(s) => s
            .split(',')
            .map(str::trim)
            .filter(|g| !g.is_empty())
            .map(str::to_string)
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_strips_punctuation_and_appends_year() {
        let movie = Movie::new(Uuid::new_v4(), "The Mark of Zorro!", 1940, vec![]);
        assert_eq!(movie.slug(), "the-mark-of-zorro-1940");
    }

    #[test]
    fn slug_keeps_dashes_and_underscores() {
        let movie = Movie::new(Uuid::new_v4(), "Spider-Man: No_Way Home", 2021, vec![]);
        assert_eq!(movie.slug(), "spider-man-no_way-home-2021");
    }

    #[test]
    fn split_genres_of_missing_aggregate_is_empty() {
        assert!(split_genres(None).is_empty());
    }

    #[test]
    fn split_genres_of_empty_aggregate_is_empty() {
        assert!(split_genres(Some("")).is_empty());
    }

    #[test]
    fn split_genres_preserves_order() {
        assert_eq!(split_genres(Some("Action,Drama,Thriller")), vec!["Action", "Drama", "Thriller"]);
    }

    #[test]
    fn list_row_converts_to_movie() {
        let id = Uuid::new_v4();
        let movie: Movie = MovieListRow {
            id,
            slug: "nick-the-greek-2023".to_string(),
            title: "Nick the Greek".to_string(),
            yearofrelease: 2023,
            genres: None,
            rating: Some(4.5),
            userrating: None,
        }
        .into();

        assert_eq!(movie.id, id);
        assert_eq!(movie.year_of_release, 2023);
        assert!(movie.genres.is_empty());
        assert_eq!(movie.rating, Some(4.5));
    }
}
