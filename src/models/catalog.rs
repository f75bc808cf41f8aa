use serde::{Deserialize, Serialize};

/// One row of the catalog table.
///
/// The row's position in the catalog is its `row_index`; that position is also
/// its row and column in the similarity matrix.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogRow {
    pub movie_id: i64,
    pub title: String,
}

/// A (row index, similarity score) pair produced by the ranker
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub row_index: usize,
    pub score: f64,
}

/// Title listing entry returned to the client
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TitleEntry {
    pub title: String,
    pub movie_id: i64,
}

/// Result of a filtered title listing
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TitleListing {
    /// Number of rows in the catalog
    pub total: usize,
    /// Number of rows matching the search, before truncation
    pub filtered_count: usize,
    pub entries: Vec<TitleEntry>,
}

/// Readiness report for the loaded artifacts
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LoadStatus {
    pub ready: bool,
    pub errors: Vec<String>,
}
