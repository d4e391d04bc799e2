use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};

pub mod genre;
pub mod movie;
pub mod user;
pub mod view;

pub use genre::{Genre, GenreListing, GenreSource};
pub use movie::{slugify, strip_image_base, MovieSummary};
pub use user::{AuthSession, PublicUser, User};
pub use view::{
    DisplayMode, MovieCard, Notice, SearchPanel, SectionState, ViewSnapshot,
};

/// A primary movie plus the recommended titles the ML service returned for it
///
/// Titles are plain names, not yet resolved into summaries.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub primary: MovieSummary,
    pub recommended_titles: Vec<String>,
}

/// The resolved primary movie and the recommendations that could be looked up
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResolutionOutcome {
    pub primary: MovieSummary,
    /// Successful lookups only, in the order the titles were recommended
    pub recommendations: Vec<MovieSummary>,
}

// ============================================================================
// Catalog API Types
// ============================================================================

/// Raw response of the `/recommend` endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RawRecommendResponse {
    /// Matched title; `None` means the service knows no such movie
    #[serde(default)]
    pub input_movie: Option<String>,
    #[serde(default)]
    pub poster: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub recommendations: Vec<String>,
}

impl RawRecommendResponse {
    /// Derives the primary movie from the response
    ///
    /// Returns `None` when the service reported no match.
    pub fn into_search_result(self, image_base: &str) -> Option<SearchResult> {
        let title = movie::non_blank(self.input_movie)?;

        let primary = MovieSummary {
            id: slugify(&title),
            title,
            poster_path: strip_image_base(self.poster, image_base),
            overview: movie::non_blank(self.description),
            release_year: None,
            rating: None,
        };

        Some(SearchResult {
            primary,
            recommended_titles: self.recommendations,
        })
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Numbers and numeric strings are accepted; anything else reads as absent
fn lenient_number(value: Option<serde_json::Value>) -> Option<f64> {
    let number = match value? {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|n| n.is_finite())
}

fn lenient_year<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let year = lenient_number(Option::deserialize(deserializer)?)
        .filter(|n| n.fract() == 0.0 && *n >= i32::MIN as f64 && *n <= i32::MAX as f64)
        .map(|n| n as i32);
    Ok(year)
}

fn lenient_rating<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_number(Option::deserialize(deserializer)?))
}

/// Movie id as sent by the catalog, which uses both numbers and strings
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum RawMovieId {
    Number(i64),
    Text(String),
}

/// Loosely typed movie entry of the `/movies-by-genre` endpoint
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawMovie {
    #[serde(default)]
    pub id: Option<RawMovieId>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub poster: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default, deserialize_with = "lenient_year")]
    pub release_year: Option<i32>,
    #[serde(default, deserialize_with = "lenient_rating")]
    pub vote_average: Option<f64>,
}

impl RawMovie {
    /// Normalizes the entry, or `None` when it carries no usable title
    ///
    /// Defaults: `title` falls back to `name`, `poster_path` to `poster`, a
    /// missing id to the title slug, the year to the one in `release_date`,
    /// and a missing rating stays `None`.
    pub fn into_summary(self, image_base: &str) -> Option<MovieSummary> {
        let title = movie::non_blank(self.title).or_else(|| movie::non_blank(self.name))?;
        let title = title.trim().to_string();

        let id = match self.id {
            Some(RawMovieId::Number(n)) => n.to_string(),
            Some(RawMovieId::Text(s)) if !s.trim().is_empty() => s,
            _ => slugify(&title),
        };

        let poster = movie::non_blank(self.poster_path).or(self.poster);
        let release_year = self
            .release_year
            .or_else(|| self.release_date.as_deref().and_then(parse_release_year));

        Some(MovieSummary {
            id,
            title,
            poster_path: strip_image_base(poster, image_base),
            overview: movie::non_blank(self.overview),
            release_year,
            rating: self.vote_average,
        })
    }
}

/// Extracts the year from `YYYY-MM-DD`, or from a bare leading year
fn parse_release_year(date: &str) -> Option<i32> {
    let date = date.trim();
    if let Ok(parsed) = NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        return Some(parsed.year());
    }

    date.get(..4)
        .filter(|prefix| prefix.chars().all(|c| c.is_ascii_digit()))
        .and_then(|prefix| prefix.parse().ok())
}

/// Body of `/movies-by-genre`: `{ "movies": [...] }`, `{ "results": [...] }` or a bare array
///
/// Entries stay untyped so one malformed movie does not fail the whole page.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum MovieListPayload {
    Bare(Vec<serde_json::Value>),
    Wrapped {
        #[serde(default)]
        movies: Option<Vec<serde_json::Value>>,
        #[serde(default)]
        results: Option<Vec<serde_json::Value>>,
    },
}

impl MovieListPayload {
    pub fn into_summaries(self, image_base: &str) -> Vec<MovieSummary> {
        let entries = match self {
            MovieListPayload::Bare(entries) => entries,
            MovieListPayload::Wrapped { movies, results } => {
                movies.or(results).unwrap_or_default()
            }
        };

        entries
            .into_iter()
            .filter_map(|entry| {
                serde_json::from_value::<RawMovie>(entry)
                    .ok()
                    .and_then(|raw| raw.into_summary(image_base))
            })
            .collect()
    }
}

/// Body of `/genres`: `{ "genres": [...] }` or a bare array
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum GenreListPayload {
    Bare(Vec<Genre>),
    Wrapped { genres: Vec<Genre> },
}

impl From<GenreListPayload> for Vec<Genre> {
    fn from(payload: GenreListPayload) -> Self {
        match payload {
            GenreListPayload::Bare(genres) => genres,
            GenreListPayload::Wrapped { genres } => genres,
        }
    }
}
