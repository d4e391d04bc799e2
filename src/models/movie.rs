use serde::{Deserialize, Serialize};

/// A movie normalized into the fixed shape every view consumes
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieSummary {
    /// External id, or the slug of the title when the source has none
    pub id: String,
    pub title: String,
    /// Path relative to the image base, or an absolute URL the base did not cover
    pub poster_path: Option<String>,
    pub overview: Option<String>,
    pub release_year: Option<i32>,
    /// Average vote; `None` when the source has no rating
    pub rating: Option<f64>,
}

impl MovieSummary {
    /// Builds a summary whose id is derived from its title
    pub fn from_title(title: impl Into<String>) -> Self {
        let title = title.into();
        Self {
            id: slugify(&title),
            title,
            poster_path: None,
            overview: None,
            release_year: None,
            rating: None,
        }
    }
}

/// Lowercases a title and joins its words with single hyphens
///
/// Leading and trailing whitespace is dropped and internal runs of whitespace
/// collapse to one separator, so "The  Dark Knight " becomes "the-dark-knight".
pub fn slugify(title: &str) -> String {
    title
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// Removes the image base prefix from a poster reference
///
/// Renderers always prepend the base themselves, so a poster that already
/// embeds it is reduced to its path. Blank references become `None`.
pub fn strip_image_base(poster: Option<String>, image_base: &str) -> Option<String> {
    let poster = non_blank(poster)?;
    let base = image_base.trim_end_matches('/');

    let stripped = poster
        .strip_prefix(base)
        .filter(|path| !base.is_empty() && path.starts_with('/'))
        .map(str::to_string);

    Some(stripped.unwrap_or(poster))
}

pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
