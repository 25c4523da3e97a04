use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum FilterError {
    #[error("You can only sort by 'title' or 'yearofrelease'")]
    InvalidSortField(String),

    #[error("Invalid sort expression: {0}")]
    InvalidSortExpression(String),
}
