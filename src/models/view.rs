use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Genre, GenreListing, MovieSummary, ResolutionOutcome};
use crate::config::ImageSettings;

/// Lifecycle of one UI section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(tag = "status", content = "data", rename_all = "snake_case")]
pub enum SectionState<T> {
    #[default]
    Idle,
    Loading,
    Loaded(T),
    Failed(String),
}

impl<T> SectionState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, SectionState::Loading)
    }

    pub fn loaded(&self) -> Option<&T> {
        match self {
            SectionState::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn map<U>(&self, f: impl FnOnce(&T) -> U) -> SectionState<U> {
        match self {
            SectionState::Idle => SectionState::Idle,
            SectionState::Loading => SectionState::Loading,
            SectionState::Loaded(value) => SectionState::Loaded(f(value)),
            SectionState::Failed(reason) => SectionState::Failed(reason.clone()),
        }
    }
}

/// Which part of the page is active
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum DisplayMode {
    /// Catalog grid, optionally filtered to one genre (`None` = popular)
    Browse { genre: Option<Genre> },
    /// Searched movie and its recommendations; the catalog grid is inactive
    SearchResults { query: String },
}

impl Default for DisplayMode {
    fn default() -> Self {
        DisplayMode::Browse { genre: None }
    }
}

/// A transient error message for the user (toast)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Notice {
    pub message: String,
    pub raised_at: DateTime<Utc>,
}

impl Notice {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            raised_at: Utc::now(),
        }
    }
}

/// Render-ready movie card
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieCard {
    pub id: String,
    pub title: String,
    pub poster_url: String,
    /// Release year, or "N/A"
    pub release_year_label: String,
    /// Rating with one decimal, or "N/A"
    pub rating_label: String,
    pub overview: Option<String>,
}

impl MovieCard {
    pub fn render(movie: &MovieSummary, images: &ImageSettings) -> Self {
        Self {
            id: movie.id.clone(),
            title: movie.title.clone(),
            poster_url: images.poster_url(movie.poster_path.as_deref()),
            release_year_label: movie
                .release_year
                .map(|year| year.to_string())
                .unwrap_or_else(|| "N/A".to_string()),
            rating_label: movie
                .rating
                .map(|rating| format!("{:.1}", rating))
                .unwrap_or_else(|| "N/A".to_string()),
            overview: movie.overview.clone(),
        }
    }
}

/// The searched movie with its recommendation cards
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchPanel {
    pub primary: MovieCard,
    pub recommendations: Vec<MovieCard>,
}

impl SearchPanel {
    pub fn render(outcome: &ResolutionOutcome, images: &ImageSettings) -> Self {
        Self {
            primary: MovieCard::render(&outcome.primary, images),
            recommendations: outcome
                .recommendations
                .iter()
                .map(|movie| MovieCard::render(movie, images))
                .collect(),
        }
    }
}

/// Everything a presentational layer needs to draw the page
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ViewSnapshot {
    pub mode: DisplayMode,
    pub page_title: String,
    pub genres: GenreListing,
    pub catalog: SectionState<Vec<MovieCard>>,
    pub search: SectionState<SearchPanel>,
    pub notice: Option<Notice>,
}
