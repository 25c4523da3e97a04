//! HTTP client for the Movies API, plus the bearer token provider it uses.

pub mod client;
pub mod token;

pub use client::MoviesApiClient;
pub use token::{AuthTokenProvider, DEFAULT_TOKEN_URL};

use std::collections::BTreeMap;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SdkError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API returned {status}: {message}")]
    Api {
        status: u16,
        message: String,
        field_errors: BTreeMap<String, String>,
    },

    #[error("Token endpoint returned {0}")]
    TokenEndpoint(u16),

    #[error("Token could not be decoded: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),
}
