use std::collections::{BTreeMap, HashSet};

use chrono::{Datelike, Utc};
use thiserror::Error;

use crate::database::models::Movie;
use crate::database::MovieRepository;
use crate::filter::{FilterOrder, GetAllMoviesOptions, SortField};

use super::ServiceError;

/// Earliest release year accepted for a catalog entry
pub const FIRST_RELEASE_YEAR: i32 = 1888;

/// Field-level validation failures, one message per failing field
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("One or more validation errors occurred")]
pub struct ValidationErrors {
    field_errors: BTreeMap<String, String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    /// Keeps the first message recorded for a field
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.field_errors
            .entry(field.to_string())
            .or_insert_with(|| message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.field_errors.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.field_errors.contains_key(field)
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.field_errors.get(field).map(String::as_str)
    }

    pub fn field_errors(&self) -> &BTreeMap<String, String> {
        &self.field_errors
    }

    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

fn current_year() -> i32 {
    Utc::now().year()
}

pub struct MovieValidator;

impl MovieValidator {
    /// Checks that need no storage access
    pub fn validate_fields(movie: &Movie, current_year: i32) -> ValidationErrors {
        let mut errors = ValidationErrors::new();

        if movie.id.is_nil() {
            errors.add("id", "'Id' must not be empty.");
        }

        if movie.title.trim().is_empty() {
            errors.add("title", "'Title' must not be empty.");
        }

        if movie.year_of_release > current_year {
            errors.add(
                "yearOfRelease",
                format!("'Year Of Release' must be less than or equal to '{}'.", current_year),
            );
        } else if movie.year_of_release < FIRST_RELEASE_YEAR {
            errors.add(
                "yearOfRelease",
                format!("'Year Of Release' must be greater than or equal to '{}'.", FIRST_RELEASE_YEAR),
            );
        }

        if movie.genres.is_empty() {
            errors.add("genres", "'Genres' must not be empty.");
        } else {
            let mut seen = HashSet::new();
            for genre in &movie.genres {
                if genre.trim().is_empty() {
                    errors.add("genres", "Genre names must not be empty.");
                } else if genre.contains(',') {
                    errors.add("genres", format!("Genre '{}' must not contain a comma.", genre));
                } else if !seen.insert(genre.as_str()) {
                    errors.add("genres", format!("Genre '{}' is listed more than once.", genre));
                }
            }
        }

        errors
    }

    /// Full validation, including slug uniqueness against stored movies
    pub async fn validate(movie: &Movie, repository: &dyn MovieRepository) -> Result<(), ServiceError> {
        let mut errors = Self::validate_fields(movie, current_year());

        if let Some(existing) = repository.get_by_slug(&movie.slug(), None).await? {
            if existing.id != movie.id {
                errors.add("slug", "This movie already exists in the system");
            }
        }

        errors.into_result()?;
        Ok(())
    }
}

pub struct OptionsValidator;

impl OptionsValidator {
    /// Builds listing options from raw query values, reporting every bad field
    pub fn build(
        title: Option<String>,
        year: Option<i32>,
        sort_by: Option<&str>,
        page: Option<i64>,
        page_size: Option<i64>,
        default_page_size: u32,
        max_page_size: u32,
    ) -> Result<GetAllMoviesOptions, ValidationErrors> {
        Self::build_for_year(title, year, sort_by, page, page_size, default_page_size, max_page_size, current_year())
    }

    #[allow(clippy::too_many_arguments)]
    fn build_for_year(
        title: Option<String>,
        year: Option<i32>,
        sort_by: Option<&str>,
        page: Option<i64>,
        page_size: Option<i64>,
        default_page_size: u32,
        max_page_size: u32,
        current_year: i32,
    ) -> Result<GetAllMoviesOptions, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if let Some(y) = year {
            if y > current_year {
                errors.add(
                    "year",
                    format!("'Year' must be less than or equal to '{}'.", current_year),
                );
            }
        }

        let sort = match sort_by.filter(|s| !s.trim().is_empty()) {
            None => None,
            Some(s) => match FilterOrder::parse(s) {
                Ok(sort) => Some(sort),
                Err(_) => {
                    errors.add(
                        "sortBy",
                        format!("You can only sort by {}", SortField::ACCEPTED.join(" or ")),
                    );
                    None
                }
            },
        };

        let page = page.unwrap_or(1);
        if page < 1 {
            errors.add("page", "'Page' must be greater than or equal to '1'.");
        }

        let page_size = page_size.unwrap_or(i64::from(default_page_size));
        if page_size < 1 || page_size > i64::from(max_page_size) {
            errors.add(
                "pageSize",
                format!("You can get between 1 and {} movies per page", max_page_size),
            );
        }

        errors.into_result()?;

        Ok(GetAllMoviesOptions {
            title: title.filter(|t| !t.trim().is_empty()),
            year_of_release: year,
            sort,
            page: page as u32,
            page_size: page_size as u32,
            user_id: None,
        })
    }
}

/// Ratings are whole stars from 1 to 5
pub fn validate_rating(rating: i32) -> Result<(), ValidationErrors> {
    if (1..=5).contains(&rating) {
        Ok(())
    } else {
        Err(ValidationErrors::single("rating", "Rating must be between 1 and 5"))
    }
}
