use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Director placeholder used when a record has no crew
pub const UNKNOWN_DIRECTOR: &str = "Unknown Director";

/// Raw row of the detail table, as stored in the artifact.
///
/// Everything except `movie_id` is kept as an untyped JSON value because the
/// exported data mixes encodings: lists may be real arrays or Python-style list
/// text, numbers may be missing or `"NaN"`. Values are normalized on assembly.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct DetailRecord {
    pub movie_id: i64,
    #[serde(default)]
    pub title: Option<Value>,
    #[serde(default)]
    pub overview: Option<Value>,
    #[serde(default)]
    pub genres: Option<Value>,
    #[serde(default)]
    pub cast: Option<Value>,
    #[serde(default)]
    pub crew: Option<Value>,
    #[serde(default)]
    pub runtime: Option<Value>,
    #[serde(default)]
    pub vote_average: Option<Value>,
    #[serde(default)]
    pub tagline: Option<Value>,
    #[serde(default)]
    pub release_date: Option<Value>,
}

impl DetailRecord {
    /// Creates a record with only an identifier; handy for building fixtures
    pub fn new(movie_id: i64) -> Self {
        Self {
            movie_id,
            title: None,
            overview: None,
            genres: None,
            cast: None,
            crew: None,
            runtime: None,
            vote_average: None,
            tagline: None,
            release_date: None,
        }
    }
}

/// Normalized movie record returned to the client
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieDetails {
    pub movie_id: i64,
    pub title: String,
    pub overview: Option<String>,
    pub genres: Vec<String>,
    pub cast: Vec<String>,
    pub crew: Vec<String>,
    pub director: String,
    pub runtime: f64,
    pub vote_average: f64,
    pub tagline: String,
    pub year: String,
    pub poster: String,
}
