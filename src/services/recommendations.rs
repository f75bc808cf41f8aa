use rand::Rng;
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::{LoadStatus, MovieDetails, TitleListing},
    services::{details, providers::PosterResolver, similarity, title_search},
    store::{CatalogStore, LoadState},
};

/// Entry point for every query against the loaded movie data.
///
/// Holds the load state produced once at startup; each operation checks it and
/// fails with `DataUnavailable` if loading did not succeed.
pub struct RecommendationService {
    state: LoadState,
    posters: Arc<dyn PosterResolver>,
    neighbor_count: usize,
}

impl RecommendationService {
    pub fn new(state: LoadState, posters: Arc<dyn PosterResolver>, neighbor_count: usize) -> Self {
        Self {
            state,
            posters,
            neighbor_count,
        }
    }

    pub fn status(&self) -> LoadStatus {
        self.state.status()
    }

    fn store(&self) -> AppResult<Arc<CatalogStore>> {
        self.state.store().cloned()
    }

    /// Resolves `query` to a catalog movie and returns its nearest neighbors
    /// with full details, most similar first.
    ///
    /// Neighbors missing from the detail table are skipped. Poster lookups
    /// run concurrently but results keep the ranker's order.
    pub async fn recommend(&self, query: &str) -> AppResult<Vec<MovieDetails>> {
        let store = self.store()?;
        let row_index = title_search::resolve_title(&store, query)?;
        let neighbors =
            similarity::rank_neighbors(store.matrix(), row_index, self.neighbor_count)?;

        tracing::info!(
            query = %query,
            row_index,
            neighbors = neighbors.len(),
            "Title resolved"
        );

        let mut tasks = Vec::with_capacity(neighbors.len());
        for neighbor in neighbors {
            let movie_id = store
                .row(neighbor.row_index)
                .map(|row| row.movie_id)
                .ok_or(AppError::IndexOutOfRange {
                    index: neighbor.row_index,
                    size: store.rows().len(),
                })?;

            let store = Arc::clone(&store);
            let posters = Arc::clone(&self.posters);
            let task = tokio::spawn(async move {
                details::assemble(&store, posters.as_ref(), movie_id).await
            });
            tasks.push((movie_id, task));
        }

        let mut results = Vec::with_capacity(tasks.len());
        for (movie_id, task) in tasks {
            match task.await {
                Ok(Some(movie)) => results.push(movie),
                Ok(None) => {
                    tracing::debug!(movie_id, "Skipping neighbor without detail record");
                }
                Err(e) => {
                    tracing::error!(movie_id, error = %e, "Detail assembly task failed");
                    return Err(AppError::Internal(format!(
                        "Detail assembly for movie {} failed: {}",
                        movie_id, e
                    )));
                }
            }
        }

        if results.is_empty() {
            return Err(AppError::NoValidRecommendations(format!(
                "No recommendations with details available for '{}'",
                query
            )));
        }

        Ok(results)
    }

    pub async fn get_detail(&self, movie_id: i64) -> AppResult<MovieDetails> {
        let store = self.store()?;
        details::assemble(&store, self.posters.as_ref(), movie_id)
            .await
            .ok_or_else(|| AppError::NotFound(format!("Movie {} not found", movie_id)))
    }

    /// Picks a detail record uniformly at random
    pub async fn get_random_detail(&self) -> AppResult<MovieDetails> {
        let store = self.store()?;
        let records = store.details();
        if records.is_empty() {
            return Err(AppError::NotFound("Detail table is empty".to_string()));
        }

        let index = rand::rng().random_range(0..records.len());
        Ok(details::assemble_record(&records[index], self.posters.as_ref()).await)
    }

    pub fn list_titles(&self, limit: usize, search: &str) -> AppResult<TitleListing> {
        let store = self.store()?;
        Ok(title_search::list_titles(&store, limit, search))
    }
}
