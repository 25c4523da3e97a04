use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn to_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// Columns a movie listing may be ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortField {
    Title,
    YearOfRelease,
}

impl SortField {
    pub const ACCEPTED: [&'static str; 2] = ["title", "yearofrelease"];

    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "title" => Some(SortField::Title),
            "yearofrelease" => Some(SortField::YearOfRelease),
            _ => None,
        }
    }

    pub fn column(&self) -> &'static str {
        match self {
            SortField::Title => "title",
            SortField::YearOfRelease => "yearofrelease",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieSort {
    pub field: SortField,
    pub direction: SortDirection,
}

/// Filter, ordering and paging for a movie listing, scoped to a caller.
#[derive(Debug, Clone, PartialEq)]
pub struct GetAllMoviesOptions {
    pub title: Option<String>,
    pub year_of_release: Option<i32>,
    pub sort: Option<MovieSort>,
    pub page: u32,
    pub page_size: u32,
    pub user_id: Option<Uuid>,
}

impl Default for GetAllMoviesOptions {
    fn default() -> Self {
        Self {
            title: None,
            year_of_release: None,
            sort: None,
            page: 1,
            page_size: 10,
            user_id: None,
        }
    }
}

impl GetAllMoviesOptions {
    pub fn with_user_id(mut self, user_id: Option<Uuid>) -> Self {
        self.user_id = user_id;
        self
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.page_size)
    }

    pub fn offset(&self) -> i64 {
        i64::from(self.page.saturating_sub(1)) * i64::from(self.page_size)
    }
}
