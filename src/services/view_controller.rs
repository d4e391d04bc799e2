use std::sync::Arc;

use tokio::sync::RwLock;

use crate::{
    config::ImageSettings,
    error::AppError,
    models::{
        DisplayMode, Genre, GenreListing, MovieCard, MovieSummary, Notice, ResolutionOutcome,
        SearchPanel, SectionState, ViewSnapshot,
    },
    services::{
        catalog::{CatalogClient, POPULAR_GENRE_ID},
        genres::GenreCatalog,
        resolver::Resolver,
    },
};

const POPULAR_PAGE_TITLE: &str = "Popular Action Movies";

/// UI-facing state of one session
///
/// Each section carries a generation counter. A request remembers the
/// generation it started under and may only write its result while that
/// generation is still current.
#[derive(Debug, Clone)]
pub struct ViewState {
    pub mode: DisplayMode,
    pub page_title: String,
    pub genres: GenreListing,
    pub catalog: SectionState<Vec<MovieSummary>>,
    pub search: SectionState<ResolutionOutcome>,
    pub notice: Option<Notice>,
    genres_generation: u64,
    catalog_generation: u64,
    search_generation: u64,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            mode: DisplayMode::default(),
            page_title: "Popular Movies".to_string(),
            genres: GenreListing::default(),
            catalog: SectionState::Idle,
            search: SectionState::Idle,
            notice: None,
            genres_generation: 0,
            catalog_generation: 0,
            search_generation: 0,
        }
    }
}

/// Drives the catalog grid and search panel from user triggers
///
/// The controller is the only writer of `ViewState`. Triggers may run
/// concurrently; the newest trigger for a section always wins.
pub struct ViewController {
    client: Arc<dyn CatalogClient>,
    resolver: Resolver,
    genre_catalog: GenreCatalog,
    images: ImageSettings,
    state: RwLock<ViewState>,
}

impl ViewController {
    pub fn new(client: Arc<dyn CatalogClient>, images: ImageSettings) -> Self {
        Self {
            resolver: Resolver::new(Arc::clone(&client), images.base_url.clone()),
            genre_catalog: GenreCatalog::new(Arc::clone(&client)),
            client,
            images,
            state: RwLock::new(ViewState::default()),
        }
    }

    /// Loads genres and the popular listing side by side
    pub async fn initialize(&self) {
        tokio::join!(self.load_genres(), self.load_popular());
    }

    pub async fn load_genres(&self) {
        let generation = {
            let mut state = self.state.write().await;
            state.genres_generation += 1;
            state.genres_generation
        };

        let listing = self.genre_catalog.list().await;

        let mut state = self.state.write().await;
        if state.genres_generation != generation {
            tracing::debug!("Discarding superseded genre list");
            return;
        }
        state.genres = listing;
    }

    pub async fn load_popular(&self) {
        self.load_catalog(None).await;
    }

    pub async fn load_genre(&self, genre_id: u32) {
        let genre = {
            let state = self.state.read().await;
            state
                .genres
                .find(genre_id)
                .cloned()
                .unwrap_or_else(|| Genre::new(genre_id, format!("Genre {}", genre_id)))
        };

        self.load_catalog(Some(genre)).await;
    }

    /// Fills the catalog grid; `None` means the popular listing
    ///
    /// Switches back to browsing and supersedes any in-flight search.
    async fn load_catalog(&self, genre: Option<Genre>) {
        let genre_id = genre.as_ref().map_or(POPULAR_GENRE_ID, |g| g.id);
        let (page_title, failure_notice) = match &genre {
            Some(g) => (
                format!("{} Movies", g.name),
                format!("Failed to load {} movies", g.name),
            ),
            None => (
                POPULAR_PAGE_TITLE.to_string(),
                "Failed to load popular movies".to_string(),
            ),
        };

        let generation = {
            let mut state = self.state.write().await;
            state.catalog_generation += 1;
            state.search_generation += 1;
            state.catalog = SectionState::Loading;
            state.search = SectionState::Idle;
            state.mode = DisplayMode::Browse { genre };
            state.page_title = page_title;
            state.notice = None;
            state.catalog_generation
        };

        let result = self.client.list_by_genre(genre_id).await;

        let mut state = self.state.write().await;
        if state.catalog_generation != generation {
            tracing::debug!(genre_id = genre_id, "Discarding superseded catalog result");
            return;
        }

        match result {
            Ok(movies) => {
                tracing::debug!(genre_id = genre_id, count = movies.len(), "Catalog loaded");
                state.catalog = SectionState::Loaded(movies);
            }
            Err(e) => {
                tracing::error!(genre_id = genre_id, error = %e, "Catalog load failed");
                state.catalog = SectionState::Failed(e.to_string());
                state.notice = Some(Notice::error(failure_notice));
            }
        }
    }

    /// Resolves a query into the search panel
    pub async fn search(&self, query: &str) {
        let query = query.trim().to_string();
        if query.is_empty() {
            self.reject_search("Please enter a movie name").await;
            return;
        }

        let (generation, previous) = {
            let mut state = self.state.write().await;
            state.search_generation += 1;
            state.notice = None;
            let previous = std::mem::replace(&mut state.search, SectionState::Loading);
            (state.search_generation, previous)
        };

        let result = self.resolver.resolve(&query).await;

        let mut state = self.state.write().await;
        if state.search_generation != generation {
            tracing::debug!(query = %query, "Discarding superseded search result");
            return;
        }

        match result {
            Ok(outcome) => {
                state.search = SectionState::Loaded(outcome);
                state.page_title = format!("Search Results for \"{}\"", query);
                state.mode = DisplayMode::SearchResults { query };
                // The grid is inactive until `clear`; drop whatever it was loading
                state.catalog_generation += 1;
                state.catalog = SectionState::Idle;
            }
            Err(e @ (AppError::InvalidInput(_) | AppError::NotFound(_))) => {
                tracing::info!(query = %query, reason = %e, "Search found nothing");
                state.search = match previous {
                    SectionState::Loading => SectionState::Idle,
                    other => other,
                };
                state.notice = Some(Notice::error(match e {
                    AppError::InvalidInput(_) => "Please enter a movie name".to_string(),
                    _ => format!("No results found for \"{}\"", query),
                }));
            }
            Err(e) => {
                tracing::error!(query = %query, error = %e, "Search failed");
                state.search = SectionState::Failed(e.to_string());
                state.notice = Some(Notice::error(format!(
                    "Failed to search for \"{}\". Please try another movie.",
                    query
                )));
            }
        }
    }

    /// Re-resolves from a recommendation card's title
    ///
    /// The card's own poster and overview are not reused.
    pub async fn select_recommendation(&self, movie: &MovieSummary) {
        if movie.title.trim().is_empty() {
            self.reject_search("Invalid movie").await;
            return;
        }

        self.search(&movie.title).await;
    }

    /// Handles a trigger refused before any lookup
    ///
    /// Still counts as the newest search: an in-flight one is superseded and
    /// its `Loading` section goes back to `Idle`. Loaded results stay.
    async fn reject_search(&self, message: &str) {
        let mut state = self.state.write().await;
        state.search_generation += 1;
        if state.search.is_loading() {
            state.search = SectionState::Idle;
        }
        state.notice = Some(Notice::error(message));
    }

    /// Leaves search mode and reloads the popular listing
    pub async fn clear(&self) {
        {
            let mut state = self.state.write().await;
            state.search_generation += 1;
            state.search = SectionState::Idle;
            state.mode = DisplayMode::default();
        }

        self.load_popular().await;
    }

    pub async fn state(&self) -> ViewState {
        self.state.read().await.clone()
    }

    /// Renders the current state into cards
    pub async fn snapshot(&self) -> ViewSnapshot {
        let state = self.state.read().await;

        ViewSnapshot {
            mode: state.mode.clone(),
            page_title: state.page_title.clone(),
            genres: state.genres.clone(),
            catalog: state.catalog.map(|movies| {
                movies
                    .iter()
                    .map(|movie| MovieCard::render(movie, &self.images))
                    .collect()
            }),
            search: state
                .search
                .map(|outcome| SearchPanel::render(outcome, &self.images)),
            notice: state.notice.clone(),
        }
    }
}
