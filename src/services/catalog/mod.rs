//! Remote catalog abstraction
//!
//! The catalog is the external ML service that lists movies by genre, lists
//! genres and answers recommendation queries. Callers depend on the trait so
//! the resolver and view controller can run against fakes in tests.

use crate::{
    error::AppResult,
    models::{Genre, MovieSummary, RawRecommendResponse},
};

pub mod http;

pub use http::HttpCatalogClient;

/// Genre used for the "popular" listing, the service has no dedicated endpoint
pub const POPULAR_GENRE_ID: u32 = 28;

/// Trait for catalog clients
///
/// Every operation is one request. Any network failure, timeout, non-2xx status
/// or unreadable body is reported as `AppError::Transport`.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CatalogClient: Send + Sync {
    /// List the movies of one genre, normalized
    async fn list_by_genre(&self, genre_id: u32) -> AppResult<Vec<MovieSummary>>;

    /// List the genres the service knows
    async fn list_genres(&self) -> AppResult<Vec<Genre>>;

    /// Ask for recommendations for a movie name
    ///
    /// A response whose `input_movie` is `None` is a successful "no match"
    /// answer, not an error.
    async fn recommend(&self, query: &str) -> AppResult<RawRecommendResponse>;
}
