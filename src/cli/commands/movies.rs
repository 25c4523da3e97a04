use uuid::Uuid;

use crate::api::{CreateMovieRequest, GetAllMoviesRequest, UpdateMovieRequest};
use crate::cli::utils::{output_error, output_movie, output_movies, output_success};
use crate::cli::OutputFormat;
use crate::sdk::MoviesApiClient;

pub async fn get(client: &MoviesApiClient, id_or_slug: &str, output_format: OutputFormat) -> anyhow::Result<()> {
    match client.get_movie(id_or_slug).await? {
        Some(movie) => output_movie(&output_format, &movie),
        None => output_error(&output_format, &format!("Movie '{}' not found", id_or_slug), Some("NOT_FOUND")),
    }
}

pub async fn list(client: &MoviesApiClient, query: &GetAllMoviesRequest, output_format: OutputFormat) -> anyhow::Result<()> {
    let page = client.get_movies(query).await?;
    output_movies(&output_format, &page)
}

pub async fn create(
    client: &MoviesApiClient,
    title: String,
    year_of_release: i32,
    genres: Vec<String>,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    let request = CreateMovieRequest {
        title,
        year_of_release,
        genres,
    };
    let movie = client.create_movie(&request).await?;
    output_movie(&output_format, &movie)
}

pub async fn update(
    client: &MoviesApiClient,
    id: Uuid,
    title: String,
    year_of_release: i32,
    genres: Vec<String>,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    let request = UpdateMovieRequest {
        title,
        year_of_release,
        genres,
    };
    match client.update_movie(id, &request).await? {
        Some(movie) => output_movie(&output_format, &movie),
        None => output_error(&output_format, &format!("Movie '{}' not found", id), Some("NOT_FOUND")),
    }
}

pub async fn delete(client: &MoviesApiClient, id: Uuid, output_format: OutputFormat) -> anyhow::Result<()> {
    if client.delete_movie(id).await? {
        output_success(&output_format, &format!("Deleted movie {}", id))
    } else {
        output_error(&output_format, &format!("Movie '{}' not found", id), Some("NOT_FOUND"))
    }
}
