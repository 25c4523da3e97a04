use std::collections::BTreeMap;
use std::sync::Arc;

use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use super::{AuthTokenProvider, SdkError};
use crate::api::{
    CreateMovieRequest, DeletedResponse, GetAllMoviesRequest, MovieRatingResponse, MovieResponse, MoviesResponse,
    RateMovieRequest, RateMovieResponse, UpdateMovieRequest,
};

#[derive(Deserialize)]
struct Envelope<T> {
    data: T,
}

/// Typed client over the `/api` surface
#[derive(Clone)]
pub struct MoviesApiClient {
    http: reqwest::Client,
    base_url: String,
    tokens: Option<Arc<AuthTokenProvider>>,
}

impl MoviesApiClient {
    /// Without a token provider, write endpoints will answer 401
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            tokens: None,
        }
    }

    pub fn with_token_provider(mut self, tokens: Arc<AuthTokenProvider>) -> Self {
        self.tokens = Some(tokens);
        self
    }

    pub async fn get_movie(&self, id_or_slug: &str) -> Result<Option<MovieResponse>, SdkError> {
        let request = self.request(Method::GET, &format!("/api/movies/{}", id_or_slug));
        send(request).await
    }

    pub async fn get_movies(&self, query: &GetAllMoviesRequest) -> Result<MoviesResponse, SdkError> {
        let request = self.request(Method::GET, "/api/movies").query(query);
        send(request).await?.ok_or_else(|| not_found("/api/movies"))
    }

    pub async fn create_movie(&self, movie: &CreateMovieRequest) -> Result<MovieResponse, SdkError> {
        let request = self.authorized(Method::POST, "/api/movies").await?.json(movie);
        send(request).await?.ok_or_else(|| not_found("/api/movies"))
    }

    /// `None` when no movie has the id; update never creates
    pub async fn update_movie(&self, id: Uuid, movie: &UpdateMovieRequest) -> Result<Option<MovieResponse>, SdkError> {
        let request = self.authorized(Method::PUT, &format!("/api/movies/{}", id)).await?.json(movie);
        send(request).await
    }

    pub async fn delete_movie(&self, id: Uuid) -> Result<bool, SdkError> {
        let request = self.authorized(Method::DELETE, &format!("/api/movies/{}", id)).await?;
        Ok(send::<DeletedResponse>(request).await?.is_some())
    }

    pub async fn rate_movie(&self, id: Uuid, rating: i32) -> Result<bool, SdkError> {
        let request = self
            .authorized(Method::PUT, &format!("/api/movies/{}/ratings", id))
            .await?
            .json(&RateMovieRequest { rating });
        Ok(send::<RateMovieResponse>(request).await?.is_some())
    }

    pub async fn get_user_ratings(&self) -> Result<Vec<MovieRatingResponse>, SdkError> {
        let request = self.authorized(Method::GET, "/api/ratings/me").await?;
        send(request).await?.ok_or_else(|| not_found("/api/ratings/me"))
    }

    /// Catalog reads go out anonymously so they stay cacheable and do not
    /// depend on the token endpoint
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http.request(method, format!("{}{}", self.base_url, path))
    }

    async fn authorized(&self, method: Method, path: &str) -> Result<RequestBuilder, SdkError> {
        let builder = self.request(method, path);
        match &self.tokens {
            Some(tokens) => Ok(builder.bearer_auth(tokens.get_token().await?)),
            None => Ok(builder),
        }
    }
}

/// Unwraps the success envelope. 404 becomes `Ok(None)`.
async fn send<T: DeserializeOwned>(request: RequestBuilder) -> Result<Option<T>, SdkError> {
    let response = request.send().await?;
    let status = response.status();

    if status == StatusCode::NOT_FOUND {
        return Ok(None);
    }

    if !status.is_success() {
        let body: Value = response.json().await.unwrap_or(Value::Null);
        return Err(api_error(status.as_u16(), &body));
    }

    let envelope: Envelope<T> = response.json().await?;
    Ok(Some(envelope.data))
}

fn api_error(status: u16, body: &Value) -> SdkError {
    let message = body["message"]
        .as_str()
        .unwrap_or("request failed")
        .to_string();

    let field_errors = body["field_errors"]
        .as_object()
        .map(|fields| {
            fields
                .iter()
                .map(|(field, msg)| (field.clone(), msg.as_str().unwrap_or_default().to_string()))
                .collect()
        })
        .unwrap_or_default();

    SdkError::Api {
        status,
        message,
        field_errors,
    }
}

fn not_found(path: &str) -> SdkError {
    SdkError::Api {
        status: 404,
        message: format!("{} not found", path),
        field_errors: BTreeMap::new(),
    }
}
