use serde::Deserialize;
use std::path::PathBuf;

use crate::store::ArtifactPaths;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Catalog table (`movie_id` / `title` rows, aligned with the similarity matrix)
    #[serde(default = "default_catalog_path")]
    pub catalog_path: PathBuf,

    /// Square similarity matrix in catalog row order
    #[serde(default = "default_similarity_path")]
    pub similarity_path: PathBuf,

    /// Detail table keyed by `movie_id`
    #[serde(default = "default_details_path")]
    pub details_path: PathBuf,

    /// TMDB API key used for poster lookups. Posters are disabled when unset.
    #[serde(default)]
    pub tmdb_api_key: Option<String>,

    /// TMDB API base URL
    #[serde(default = "default_tmdb_api_url")]
    pub tmdb_api_url: String,

    /// Prefix joined with a TMDB `poster_path`
    #[serde(default = "default_tmdb_image_base_url")]
    pub tmdb_image_base_url: String,

    /// Number of neighbors returned per recommendation request
    #[serde(default = "default_recommendation_count")]
    pub recommendation_count: usize,

    /// Default page size for title listings
    #[serde(default = "default_title_list_limit")]
    pub title_list_limit: usize,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_catalog_path() -> PathBuf {
    PathBuf::from("data/movies.json")
}

fn default_similarity_path() -> PathBuf {
    PathBuf::from("data/similarity.json")
}

fn default_details_path() -> PathBuf {
    PathBuf::from("data/details.json")
}

fn default_tmdb_api_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_tmdb_image_base_url() -> String {
    "https://image.tmdb.org/t/p/w500".to_string()
}

fn default_recommendation_count() -> usize {
    10
}

fn default_title_list_limit() -> usize {
    50
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let config = envy::from_env::<Config>()
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.recommendation_count == 0 {
            anyhow::bail!("RECOMMENDATION_COUNT must be at least 1");
        }
        Ok(())
    }

    pub fn artifact_paths(&self) -> ArtifactPaths {
        ArtifactPaths {
            catalog: self.catalog_path.clone(),
            similarity: self.similarity_path.clone(),
            details: self.details_path.clone(),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
