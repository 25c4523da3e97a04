pub mod commands;
pub mod utils;

use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::sdk::{AuthTokenProvider, MoviesApiClient, DEFAULT_TOKEN_URL};

#[derive(Parser)]
#[command(name = "movies")]
#[command(about = "Movies CLI - command-line client for the Movies API")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, env = "MOVIES_API_URL", default_value = "http://localhost:5001", help = "Movies API base URL")]
    pub base_url: String,

    #[arg(long, global = true, env = "MOVIES_TOKEN_URL", default_value = DEFAULT_TOKEN_URL, help = "Identity endpoint issuing bearer tokens")]
    pub token_url: String,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Show a movie by id or slug")]
    Get {
        #[arg(help = "Movie id or slug")]
        id_or_slug: String,
    },

    #[command(about = "List movies with filtering, sorting and paging")]
    List {
        #[arg(long, help = "Case-insensitive title substring")]
        title: Option<String>,
        #[arg(long, help = "Exact year of release")]
        year: Option<i32>,
        #[arg(long, allow_hyphen_values = true, help = "title or yearofrelease, prefix with - for descending")]
        sort_by: Option<String>,
        #[arg(long)]
        page: Option<i64>,
        #[arg(long)]
        page_size: Option<i64>,
    },

    #[command(about = "Create a movie")]
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        year: i32,
        #[arg(long = "genre", help = "Genre name, repeat for several")]
        genres: Vec<String>,
    },

    #[command(about = "Replace a movie's title, year and genres")]
    Update {
        id: Uuid,
        #[arg(long)]
        title: String,
        #[arg(long)]
        year: i32,
        #[arg(long = "genre", help = "Genre name, repeat for several")]
        genres: Vec<String>,
    },

    #[command(about = "Delete a movie")]
    Delete { id: Uuid },

    #[command(about = "Rate a movie from 1 to 5")]
    Rate { id: Uuid, rating: i32 },

    #[command(about = "List your own ratings")]
    MyRatings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);

    let http = reqwest::Client::new();
    let tokens = Arc::new(AuthTokenProvider::new(http.clone(), cli.token_url));
    let client = MoviesApiClient::new(http, cli.base_url).with_token_provider(tokens);

    match cli.command {
        Commands::Get { id_or_slug } => commands::movies::get(&client, &id_or_slug, output_format).await,
        Commands::List {
            title,
            year,
            sort_by,
            page,
            page_size,
        } => {
            let query = crate::api::GetAllMoviesRequest {
                title,
                year,
                sort_by,
                page,
                page_size,
            };
            commands::movies::list(&client, &query, output_format).await
        }
        Commands::Create { title, year, genres } => {
            commands::movies::create(&client, title, year, genres, output_format).await
        }
        Commands::Update { id, title, year, genres } => {
            commands::movies::update(&client, id, title, year, genres, output_format).await
        }
        Commands::Delete { id } => commands::movies::delete(&client, id, output_format).await,
        Commands::Rate { id, rating } => commands::ratings::rate(&client, id, rating, output_format).await,
        Commands::MyRatings => commands::ratings::mine(&client, output_format).await,
    }
}
