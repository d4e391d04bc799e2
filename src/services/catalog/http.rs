//! HTTP catalog client for the ML recommendation service
//!
//! Every operation is a plain GET through one shared `reqwest::Client`, so
//! every call gets the same timeout.

use std::time::Duration;

use reqwest::{Client as HttpClient, Url};
use serde::de::DeserializeOwned;

use crate::{
    config::Config,
    error::{AppError, AppResult},
    models::{Genre, GenreListPayload, MovieListPayload, MovieSummary, RawRecommendResponse},
    services::catalog::CatalogClient,
};

#[derive(Clone)]
pub struct HttpCatalogClient {
    http_client: HttpClient,
    api_url: String,
    image_base_url: String,
}

impl HttpCatalogClient {
    pub fn new(api_url: String, image_base_url: String, timeout: Duration) -> AppResult<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            api_url,
            image_base_url,
        })
    }

    pub fn from_config(config: &Config) -> AppResult<Self> {
        Self::new(
            config.catalog_api_url.clone(),
            config.image_base_url.clone(),
            config.request_timeout(),
        )
    }

    /// Builds an endpoint URL; parameters are form-encoded
    fn endpoint(&self, path: &str, params: &[(&str, &str)]) -> AppResult<Url> {
        let raw = format!("{}/{}", self.api_url.trim_end_matches('/'), path);
        let mut url = Url::parse(&raw)
            .map_err(|e| AppError::Internal(format!("Invalid catalog URL {}: {}", raw, e)))?;

        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params.iter());
        }

        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> AppResult<T> {
        tracing::debug!(url = %url, "Calling catalog API");

        let response = self.http_client.get(url.clone()).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(
                url = %url,
                status = %status,
                body = %body,
                "Catalog API request failed"
            );
            return Err(AppError::Transport(format!(
                "Catalog API returned status {}: {}",
                status, body
            )));
        }

        Ok(response.json().await?)
    }
}

#[async_trait::async_trait]
impl CatalogClient for HttpCatalogClient {
    async fn list_by_genre(&self, genre_id: u32) -> AppResult<Vec<MovieSummary>> {
        let genre = genre_id.to_string();
        let url = self.endpoint("movies-by-genre", &[("genre_id", genre.as_str())])?;

        let payload: MovieListPayload = self.get_json(url).await?;
        let movies = payload.into_summaries(&self.image_base_url);

        tracing::info!(
            genre_id = genre_id,
            results = movies.len(),
            "Genre listing completed"
        );

        Ok(movies)
    }

    async fn list_genres(&self) -> AppResult<Vec<Genre>> {
        let url = self.endpoint("genres", &[])?;

        let payload: GenreListPayload = self.get_json(url).await?;
        let genres: Vec<Genre> = payload.into();

        tracing::info!(results = genres.len(), "Genre list fetched");

        Ok(genres)
    }

    async fn recommend(&self, query: &str) -> AppResult<RawRecommendResponse> {
        let url = self.endpoint("recommend", &[("movie", query)])?;

        let response: RawRecommendResponse = self.get_json(url).await?;

        tracing::info!(
            query = %query,
            matched = response.input_movie.is_some(),
            recommendations = response.recommendations.len(),
            "Recommendation query completed"
        );

        Ok(response)
    }
}
