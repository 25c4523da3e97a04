use uuid::Uuid;

use crate::database::models::{Movie, MovieRating};

use super::contracts::{
    CreateMovieRequest, MovieRatingResponse, MovieResponse, MoviesResponse, UpdateMovieRequest,
};

impl CreateMovieRequest {
    /// Identity is assigned here, never by storage
    pub fn into_movie(self) -> Movie {
        Movie::new(Uuid::new_v4(), self.title, self.year_of_release, self.genres)
    }
}

impl UpdateMovieRequest {
    pub fn into_movie(self, id: Uuid) -> Movie {
        Movie::new(id, self.title, self.year_of_release, self.genres)
    }
}

impl From<Movie> for MovieResponse {
    fn from(movie: Movie) -> Self {
        Self {
            slug: movie.slug(),
            id: movie.id,
            title: movie.title,
            rating: movie.rating,
            user_rating: movie.user_rating,
            year_of_release: movie.year_of_release,
            genres: movie.genres,
        }
    }
}

impl MoviesResponse {
    pub fn from_page(movies: Vec<Movie>, page: u32, page_size: u32, total: i64) -> Self {
        Self {
            items: movies.into_iter().map(MovieResponse::from).collect(),
            page,
            page_size,
            total,
            has_next_page: total > i64::from(page) * i64::from(page_size),
        }
    }
}

impl From<MovieRating> for MovieRatingResponse {
    fn from(rating: MovieRating) -> Self {
        Self {
            movie_id: rating.movie_id,
            slug: rating.slug,
            rating: rating.rating,
        }
    }
}
