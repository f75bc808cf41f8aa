use std::collections::HashMap;
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::{CatalogRow, DetailRecord, LoadStatus},
};

/// Square matrix of pairwise similarity scores, stored row-major
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix {
    size: usize,
    scores: Vec<f64>,
}

impl SimilarityMatrix {
    /// Builds a matrix from nested rows, rejecting anything that is not square
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, String> {
        let size = rows.len();
        let mut scores = Vec::with_capacity(size * size);

        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != size {
                return Err(format!(
                    "similarity row {} has {} columns, expected {}",
                    i,
                    row.len(),
                    size
                ));
            }
            scores.extend(row);
        }

        Ok(Self { size, scores })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Scores from row `index` to every row, or `None` past the end
    pub fn row(&self, index: usize) -> Option<&[f64]> {
        if index >= self.size {
            return None;
        }
        let start = index * self.size;
        Some(&self.scores[start..start + self.size])
    }
}

/// Read-only view over the three loaded artifacts.
///
/// Built in one piece by the loader and shared behind an `Arc`; nothing mutates
/// it afterwards, so readers need no locking.
#[derive(Debug)]
pub struct CatalogStore {
    rows: Vec<CatalogRow>,
    lowercase_titles: Vec<String>,
    matrix: SimilarityMatrix,
    details: Vec<DetailRecord>,
    details_by_id: HashMap<i64, usize>,
}

impl CatalogStore {
    /// Assembles a store, checking that catalog rows and matrix rows line up
    pub fn new(
        rows: Vec<CatalogRow>,
        matrix: SimilarityMatrix,
        details: Vec<DetailRecord>,
    ) -> Result<Self, String> {
        if rows.len() != matrix.size() {
            return Err(format!(
                "catalog has {} rows but similarity matrix is {}x{}",
                rows.len(),
                matrix.size(),
                matrix.size()
            ));
        }

        let lowercase_titles = rows.iter().map(|row| row.title.to_lowercase()).collect();

        let mut details_by_id = HashMap::with_capacity(details.len());
        for (position, record) in details.iter().enumerate() {
            if details_by_id.contains_key(&record.movie_id) {
                tracing::warn!(
                    movie_id = record.movie_id,
                    position,
                    "Duplicate movie_id in detail table, keeping first occurrence"
                );
                continue;
            }
            details_by_id.insert(record.movie_id, position);
        }

        Ok(Self {
            rows,
            lowercase_titles,
            matrix,
            details,
            details_by_id,
        })
    }

    pub fn rows(&self) -> &[CatalogRow] {
        &self.rows
    }

    pub fn row(&self, row_index: usize) -> Option<&CatalogRow> {
        self.rows.get(row_index)
    }

    /// Lowercased titles, indexed by row
    pub fn lowercase_titles(&self) -> &[String] {
        &self.lowercase_titles
    }

    pub fn matrix(&self) -> &SimilarityMatrix {
        &self.matrix
    }

    pub fn detail(&self, movie_id: i64) -> Option<&DetailRecord> {
        self.details_by_id
            .get(&movie_id)
            .map(|&position| &self.details[position])
    }

    /// Detail records in table order
    pub fn details(&self) -> &[DetailRecord] {
        &self.details
    }
}

/// Process-lifetime readiness of the artifact data
#[derive(Debug, Clone)]
pub enum LoadState {
    Uninitialized,
    Ready(Arc<CatalogStore>),
    Failed(Vec<String>),
}

impl LoadState {
    /// Returns the store, or `DataUnavailable` if loading never succeeded
    pub fn store(&self) -> AppResult<&Arc<CatalogStore>> {
        match self {
            LoadState::Ready(store) => Ok(store),
            LoadState::Uninitialized => Err(AppError::DataUnavailable(
                "Movie data has not been loaded".to_string(),
            )),
            LoadState::Failed(errors) => Err(AppError::DataUnavailable(format!(
                "Movie data failed to load: {}",
                errors.join("; ")
            ))),
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, LoadState::Ready(_))
    }

    pub fn status(&self) -> LoadStatus {
        match self {
            LoadState::Ready(_) => LoadStatus {
                ready: true,
                errors: Vec::new(),
            },
            LoadState::Uninitialized => LoadStatus {
                ready: false,
                errors: Vec::new(),
            },
            LoadState::Failed(errors) => LoadStatus {
                ready: false,
                errors: errors.clone(),
            },
        }
    }
}
