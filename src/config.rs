use serde::Deserialize;
use std::{path::PathBuf, time::Duration};

/// Lower bound applied to every outbound request timeout
pub const MIN_REQUEST_TIMEOUT_SECS: u64 = 15;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Base URL of the external recommendation/genre service
    #[serde(default = "default_catalog_api_url")]
    pub catalog_api_url: String,

    /// Prefix that turns a poster path into an image URL
    #[serde(default = "default_image_base_url")]
    pub image_base_url: String,

    /// Image shown when a movie has no poster
    #[serde(default = "default_placeholder_image_url")]
    pub placeholder_image_url: String,

    /// Timeout for each outbound request, in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// JSON file backing the credential store; in-memory when unset
    #[serde(default)]
    pub credential_store_path: Option<PathBuf>,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_catalog_api_url() -> String {
    "https://movie-recommendation-using-ml-1.onrender.com".to_string()
}

fn default_image_base_url() -> String {
    "https://image.tmdb.org/t/p/w500".to_string()
}

fn default_placeholder_image_url() -> String {
    "https://via.placeholder.com/500x750?text=No+Image".to_string()
}

fn default_request_timeout_secs() -> u64 {
    MIN_REQUEST_TIMEOUT_SECS
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_api_url: default_catalog_api_url(),
            image_base_url: default_image_base_url(),
            placeholder_image_url: default_placeholder_image_url(),
            request_timeout_secs: default_request_timeout_secs(),
            credential_store_path: None,
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Outbound request timeout, never below the 15 second floor
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(MIN_REQUEST_TIMEOUT_SECS))
    }

    pub fn images(&self) -> ImageSettings {
        ImageSettings {
            base_url: self.image_base_url.clone(),
            placeholder_url: self.placeholder_image_url.clone(),
        }
    }
}

/// Where poster images live and what to show when there is none
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSettings {
    pub base_url: String,
    pub placeholder_url: String,
}

impl ImageSettings {
    /// Builds the displayable URL for an optional poster path
    pub fn poster_url(&self, poster_path: Option<&str>) -> String {
        match poster_path {
            Some(path) if path.starts_with("http://") || path.starts_with("https://") => {
                path.to_string()
            }
            Some(path) => format!("{}{}", self.base_url, path),
            None => self.placeholder_url.clone(),
        }
    }
}

impl Default for ImageSettings {
    fn default() -> Self {
        Config::default().images()
    }
}
