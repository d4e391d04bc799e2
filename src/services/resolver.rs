use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::{MovieSummary, ResolutionOutcome},
    services::catalog::CatalogClient,
};

/// Upper bound on recommended titles looked up per query; the rest are dropped
pub const MAX_RECOMMENDATIONS: usize = 10;

/// Turns a free-text query into a primary movie plus resolved recommendations
///
/// Stateless: every call goes back to the catalog, nothing is cached.
#[derive(Clone)]
pub struct Resolver {
    client: Arc<dyn CatalogClient>,
    image_base_url: String,
}

impl Resolver {
    pub fn new(client: Arc<dyn CatalogClient>, image_base_url: String) -> Self {
        Self {
            client,
            image_base_url,
        }
    }

    /// Resolves a query
    ///
    /// Errors:
    /// - `InvalidInput` for a blank query, without touching the network
    /// - `NotFound` when the catalog has no match for the query
    /// - `Transport` when the primary lookup fails
    ///
    /// Failed recommendation lookups never fail the call; they are left out.
    pub async fn resolve(&self, query: &str) -> AppResult<ResolutionOutcome> {
        let query = query.trim();
        if query.is_empty() {
            return Err(AppError::InvalidInput(
                "Search query cannot be empty".to_string(),
            ));
        }

        let response = self.client.recommend(query).await?;
        let search = response
            .into_search_result(&self.image_base_url)
            .ok_or_else(|| AppError::NotFound(format!("No results found for \"{}\"", query)))?;

        let titles: Vec<String> = search
            .recommended_titles
            .into_iter()
            .take(MAX_RECOMMENDATIONS)
            .collect();

        let recommendations = if titles.is_empty() {
            Vec::new()
        } else {
            self.fetch_recommendation_details(titles).await
        };

        tracing::info!(
            query = %query,
            primary = %search.primary.title,
            recommendations = recommendations.len(),
            "Query resolved"
        );

        Ok(ResolutionOutcome {
            primary: search.primary,
            recommendations,
        })
    }

    /// Looks up every title concurrently and keeps the ones that resolved
    ///
    /// Waits for all lookups to settle. Results come back in input order no
    /// matter which lookup finishes first.
    async fn fetch_recommendation_details(&self, titles: Vec<String>) -> Vec<MovieSummary> {
        let requested = titles.len();
        let mut tasks = Vec::with_capacity(requested);

        for title in titles {
            let client = Arc::clone(&self.client);
            let image_base_url = self.image_base_url.clone();
            let task = tokio::spawn(async move {
                let response = client.recommend(&title).await?;
                response
                    .into_search_result(&image_base_url)
                    .map(|search| search.primary)
                    .ok_or_else(|| AppError::NotFound(title))
            });
            tasks.push(task);
        }

        let mut results = Vec::with_capacity(requested);
        let mut dropped = 0;

        for task in tasks {
            match task.await {
                Ok(Ok(movie)) => results.push(movie),
                Ok(Err(e)) => {
                    tracing::debug!(error = %e, "Recommendation lookup dropped");
                    dropped += 1;
                }
                Err(e) => {
                    tracing::error!(error = %e, "Recommendation lookup task failed");
                    dropped += 1;
                }
            }
        }

        if dropped > 0 {
            tracing::warn!(
                success_count = results.len(),
                dropped_count = dropped,
                "Partial recommendation lookup failure"
            );
        }

        results
    }
}
