use std::sync::Arc;

use crate::{
    config::{Config, ImageSettings},
    db::{JsonFileStore, KeyValueStore, MemoryStore},
    error::AppResult,
    services::{
        AuthService, CatalogClient, GenreCatalog, HttpCatalogClient, Resolver, ViewController,
    },
};

/// Shared application state
///
/// One process serves one session: the view controller is shared by every
/// request, mirroring a single browser tab.
#[derive(Clone)]
pub struct AppState {
    pub resolver: Resolver,
    pub genres: GenreCatalog,
    pub view: Arc<ViewController>,
    pub auth: AuthService,
}

impl AppState {
    pub fn new(
        catalog: Arc<dyn CatalogClient>,
        store: Arc<dyn KeyValueStore>,
        images: ImageSettings,
    ) -> Self {
        Self {
            resolver: Resolver::new(Arc::clone(&catalog), images.base_url.clone()),
            genres: GenreCatalog::new(Arc::clone(&catalog)),
            view: Arc::new(ViewController::new(catalog, images)),
            auth: AuthService::new(store),
        }
    }

    /// Wires the HTTP catalog client and the configured credential store
    pub fn from_config(config: &Config) -> AppResult<Self> {
        let catalog: Arc<dyn CatalogClient> = Arc::new(HttpCatalogClient::from_config(config)?);

        let store: Arc<dyn KeyValueStore> = match &config.credential_store_path {
            Some(path) => {
                tracing::info!(path = %path.display(), "Using file credential store");
                Arc::new(JsonFileStore::new(path.clone()))
            }
            None => {
                tracing::info!("Using in-memory credential store");
                Arc::new(MemoryStore::new())
            }
        };

        Ok(Self::new(catalog, store, config.images()))
    }
}
