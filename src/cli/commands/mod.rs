pub mod movies;
pub mod ratings;
