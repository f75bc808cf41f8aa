//! TMDB poster provider
//!
//! Looks up `/movie/{id}` and joins the returned `poster_path` onto the image
//! CDN prefix. Any failure degrades to a sentinel string.

use reqwest::Client as HttpClient;
use serde::Deserialize;

use super::{PosterResolver, POSTER_NOT_AVAILABLE, POSTER_NOT_FOUND};

const LANGUAGE: &str = "en-US";

#[derive(Debug, Deserialize)]
struct TmdbMovie {
    #[serde(default)]
    poster_path: Option<String>,
}

#[derive(Clone)]
pub struct TmdbPosterResolver {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    image_base_url: String,
}

impl TmdbPosterResolver {
    pub fn new(api_key: String, api_url: String, image_base_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url,
            image_base_url,
        }
    }

    fn movie_url(&self, movie_id: i64) -> String {
        format!("{}/movie/{}", self.api_url.trim_end_matches('/'), movie_id)
    }

    fn poster_url(&self, movie: TmdbMovie) -> String {
        match movie.poster_path {
            Some(path) if !path.is_empty() => format!("{}{}", self.image_base_url, path),
            _ => POSTER_NOT_AVAILABLE.to_string(),
        }
    }
}

#[async_trait::async_trait]
impl PosterResolver for TmdbPosterResolver {
    async fn fetch_poster(&self, movie_id: i64) -> String {
        let response = self
            .http_client
            .get(self.movie_url(movie_id))
            .query(&[("api_key", self.api_key.as_str()), ("language", LANGUAGE)])
            .send()
            .await;

        let response = match response {
            Ok(response) if response.status().is_success() => response,
            Ok(response) => {
                tracing::warn!(
                    movie_id,
                    status = %response.status(),
                    provider = "tmdb",
                    "Poster lookup returned non-success status"
                );
                return POSTER_NOT_FOUND.to_string();
            }
            Err(e) => {
                tracing::warn!(movie_id, error = %e, provider = "tmdb", "Poster lookup failed");
                return POSTER_NOT_FOUND.to_string();
            }
        };

        match response.json::<TmdbMovie>().await {
            Ok(movie) => self.poster_url(movie),
            Err(e) => {
                tracing::warn!(
                    movie_id,
                    error = %e,
                    provider = "tmdb",
                    "Poster response undecodable"
                );
                POSTER_NOT_FOUND.to_string()
            }
        }
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver(api_url: &str) -> TmdbPosterResolver {
        TmdbPosterResolver::new(
            "test_key".to_string(),
            api_url.to_string(),
            "https://image.tmdb.org/t/p/w500".to_string(),
        )
    }

    #[test]
    fn test_movie_url() {
        assert_eq!(
            resolver("https://api.themoviedb.org/3/").movie_url(19995),
            "https://api.themoviedb.org/3/movie/19995"
        );
    }

    #[test]
    fn test_poster_url_joins_path() {
        let movie = TmdbMovie {
            poster_path: Some("/kyeqWdyUXW608qlYkRqosgbbJyK.jpg".to_string()),
        };
        assert_eq!(
            resolver("http://test.local").poster_url(movie),
            "https://image.tmdb.org/t/p/w500/kyeqWdyUXW608qlYkRqosgbbJyK.jpg"
        );
    }

    #[test]
    fn test_missing_poster_path_is_unavailable() {
        let r = resolver("http://test.local");
        assert_eq!(r.poster_url(TmdbMovie { poster_path: None }), POSTER_NOT_AVAILABLE);
        assert_eq!(
            r.poster_url(TmdbMovie { poster_path: Some(String::new()) }),
            POSTER_NOT_AVAILABLE
        );
    }

    #[test]
    fn test_tmdb_payload_without_poster_field() {
        let movie: TmdbMovie = serde_json::from_str(r#"{"id": 1, "title": "x"}"#).unwrap();
        assert_eq!(movie.poster_path, None);
    }

    #[tokio::test]
    async fn test_unreachable_upstream_is_not_found() {
        // Port 9 (discard) on localhost refuses connections in test environments
        let r = resolver("http://127.0.0.1:9");
        assert_eq!(r.fetch_poster(1).await, POSTER_NOT_FOUND);
    }
}
