use crate::{
    error::{AppError, AppResult},
    models::{TitleEntry, TitleListing},
    store::CatalogStore,
};

/// Resolves a free-text title to a catalog row index.
///
/// Matching is case-insensitive substring containment. An exact title match
/// beats any partial match; among equals the lowest row index wins, so results
/// are reproducible.
pub fn resolve_title(store: &CatalogStore, query: &str) -> AppResult<usize> {
    let needle = query.to_lowercase();
    if needle.is_empty() {
        return Err(AppError::NotFound("Empty title query".to_string()));
    }

    let mut first_partial = None;
    for (row_index, title) in store.lowercase_titles().iter().enumerate() {
        if *title == needle {
            return Ok(row_index);
        }
        if first_partial.is_none() && title.contains(&needle) {
            first_partial = Some(row_index);
        }
    }

    first_partial.ok_or_else(|| AppError::NotFound(format!("No movie matching '{}'", query)))
}

/// Lists catalog titles containing `search` (case-insensitive), capped at `limit`
pub fn list_titles(store: &CatalogStore, limit: usize, search: &str) -> TitleListing {
    let needle = search.to_lowercase();

    let matches: Vec<usize> = store
        .lowercase_titles()
        .iter()
        .enumerate()
        .filter(|(_, title)| title.contains(&needle))
        .map(|(row_index, _)| row_index)
        .collect();

    let entries = matches
        .iter()
        .take(limit)
        .filter_map(|&row_index| store.row(row_index))
        .map(|row| TitleEntry {
            title: row.title.clone(),
            movie_id: row.movie_id,
        })
        .collect();

    TitleListing {
        total: store.rows().len(),
        filtered_count: matches.len(),
        entries,
    }
}
