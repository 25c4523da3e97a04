use uuid::Uuid;

use crate::cli::utils::{output_error, output_ratings, output_success};
use crate::cli::OutputFormat;
use crate::sdk::MoviesApiClient;

pub async fn rate(client: &MoviesApiClient, id: Uuid, rating: i32, output_format: OutputFormat) -> anyhow::Result<()> {
    if client.rate_movie(id, rating).await? {
        output_success(&output_format, &format!("Rated movie {} with {}", id, rating))
    } else {
        output_error(&output_format, &format!("Movie '{}' not found", id), Some("NOT_FOUND"))
    }
}

pub async fn mine(client: &MoviesApiClient, output_format: OutputFormat) -> anyhow::Result<()> {
    let ratings = client.get_user_ratings().await?;
    output_ratings(&output_format, &ratings)
}
