//! Poster image providers
//!
//! Every implementation answers with either an image URL or one of the
//! sentinel strings below, never an error.

pub mod tmdb;

pub use tmdb::TmdbPosterResolver;

/// Returned when the upstream lookup does not succeed
pub const POSTER_NOT_FOUND: &str = "Poster not found";

/// Returned when the lookup succeeds but the movie has no poster
pub const POSTER_NOT_AVAILABLE: &str = "Poster not available";

/// Trait for poster image sources
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait PosterResolver: Send + Sync {
    /// Returns an image URL for `movie_id`, or a sentinel string
    async fn fetch_poster(&self, movie_id: i64) -> String;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Resolver used when no poster API is configured
#[derive(Debug, Clone, Default)]
pub struct StaticPosterResolver;

#[async_trait::async_trait]
impl PosterResolver for StaticPosterResolver {
    async fn fetch_poster(&self, _movie_id: i64) -> String {
        POSTER_NOT_AVAILABLE.to_string()
    }

    fn name(&self) -> &'static str {
        "static"
    }
}
