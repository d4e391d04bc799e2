use std::sync::Arc;

use crate::{
    models::{Genre, GenreListing, GenreSource},
    services::catalog::CatalogClient,
};

/// Genres offered when the catalog service cannot be reached
pub fn fallback_genres() -> Vec<Genre> {
    vec![
        Genre::new(28, "Action"),
        Genre::new(35, "Comedy"),
        Genre::new(18, "Drama"),
        Genre::new(27, "Horror"),
        Genre::new(10749, "Romance"),
        Genre::new(878, "Sci-Fi"),
    ]
}

/// Lists genres, trading freshness for availability
#[derive(Clone)]
pub struct GenreCatalog {
    client: Arc<dyn CatalogClient>,
}

impl GenreCatalog {
    pub fn new(client: Arc<dyn CatalogClient>) -> Self {
        Self { client }
    }

    /// Remote genres, or the static fallback list on transport failure
    pub async fn list(&self) -> GenreListing {
        match self.client.list_genres().await {
            Ok(genres) => GenreListing {
                genres,
                source: GenreSource::Remote,
            },
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    fallback = true,
                    "Genre list unavailable, serving fallback genres"
                );
                GenreListing {
                    genres: fallback_genres(),
                    source: GenreSource::Fallback,
                }
            }
        }
    }
}
