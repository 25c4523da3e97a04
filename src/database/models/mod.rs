pub mod movie;
pub mod rating;

pub use movie::{split_genres, Movie, MovieListRow, MovieRow};
pub use rating::MovieRating;
