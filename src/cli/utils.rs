use serde::Serialize;
use serde_json::json;

use crate::api::{MovieRatingResponse, MovieResponse, MoviesResponse};
use crate::cli::OutputFormat;

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Output a success message in the appropriate format
pub fn output_success(output_format: &OutputFormat, message: &str) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => print_json(&json!({
            "success": true,
            "message": message
        })),
        OutputFormat::Text => {
            println!("✓ {}", message);
            Ok(())
        }
    }
}

/// Output an error message in the appropriate format
pub fn output_error(output_format: &OutputFormat, message: &str, error_code: Option<&str>) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": false,
                "error": message
            });

            if let Some(code) = error_code {
                response["error_code"] = json!(code);
            }

            print_json(&response)
        }
        OutputFormat::Text => {
            eprintln!("Error: {}", message);
            Ok(())
        }
    }
}

pub fn format_movie(movie: &MovieResponse) -> String {
    let rating = movie
        .rating
        .map(|r| format!("{:.1}", r))
        .unwrap_or_else(|| "-".to_string());
    let mut line = format!(
        "{} ({}) [{}] {} rating: {}",
        movie.title,
        movie.year_of_release,
        movie.genres.join(", "),
        movie.id,
        rating
    );
    if let Some(mine) = movie.user_rating {
        line.push_str(&format!(" yours: {}", mine));
    }
    line
}

pub fn output_movie(output_format: &OutputFormat, movie: &MovieResponse) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => print_json(movie),
        OutputFormat::Text => {
            println!("{}", format_movie(movie));
            println!("  slug: {}", movie.slug);
            Ok(())
        }
    }
}

pub fn output_movies(output_format: &OutputFormat, page: &MoviesResponse) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => print_json(page),
        OutputFormat::Text => {
            if page.items.is_empty() {
                println!("No movies found");
            }
            for movie in &page.items {
                println!("{}", format_movie(movie));
            }
            println!(
                "Page {} ({} per page), {} total{}",
                page.page,
                page.page_size,
                page.total,
                if page.has_next_page { ", more available" } else { "" }
            );
            Ok(())
        }
    }
}

pub fn output_ratings(output_format: &OutputFormat, ratings: &[MovieRatingResponse]) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => print_json(&ratings),
        OutputFormat::Text => {
            if ratings.is_empty() {
                println!("No ratings yet");
            }
            for rating in ratings {
                println!("{} {} {}", rating.rating, rating.slug, rating.movie_id);
            }
            Ok(())
        }
    }
}
