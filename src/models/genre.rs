use serde::{Deserialize, Serialize};

/// A movie genre as identified by the catalog service
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Genre {
    pub id: u32,
    pub name: String,
}

impl Genre {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Where a genre list came from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum GenreSource {
    /// Returned by the catalog service
    #[default]
    Remote,
    /// Static list used because the catalog service was unreachable
    Fallback,
}

/// Genres ready for display, tagged with their origin
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct GenreListing {
    pub genres: Vec<Genre>,
    pub source: GenreSource,
}

impl GenreListing {
    pub fn find(&self, genre_id: u32) -> Option<&Genre> {
        self.genres.iter().find(|g| g.id == genre_id)
    }
}
