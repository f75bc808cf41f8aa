use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::models::{CatalogRow, DetailRecord};

use super::{CatalogStore, LoadState, SimilarityMatrix};

/// Locations of the three pre-built artifacts
#[derive(Debug, Clone)]
pub struct ArtifactPaths {
    pub catalog: PathBuf,
    pub similarity: PathBuf,
    pub details: PathBuf,
}

/// Loads and validates all artifacts, producing `Ready` or `Failed`.
///
/// Every artifact is checked even after an earlier one fails so that the
/// status report lists every problem at once. The store is only published
/// when all three artifacts parse and agree on their shape.
pub fn load(paths: &ArtifactPaths) -> LoadState {
    tracing::info!(
        catalog = %paths.catalog.display(),
        similarity = %paths.similarity.display(),
        details = %paths.details.display(),
        "Loading movie artifacts"
    );

    let mut errors = Vec::new();

    let rows = read_artifact::<Vec<CatalogRow>>("catalog", &paths.catalog, &mut errors);
    let matrix = read_artifact::<Vec<Vec<f64>>>("similarity", &paths.similarity, &mut errors)
        .and_then(|rows| match SimilarityMatrix::from_rows(rows) {
            Ok(matrix) => Some(matrix),
            Err(e) => {
                errors.push(format!(
                    "Invalid similarity artifact {}: {}",
                    paths.similarity.display(),
                    e
                ));
                None
            }
        });
    let details = read_artifact::<Vec<DetailRecord>>("details", &paths.details, &mut errors);

    let store = match (rows, matrix, details) {
        (Some(rows), Some(matrix), Some(details)) if errors.is_empty() => {
            CatalogStore::new(rows, matrix, details)
                .map_err(|e| vec![format!("Inconsistent artifacts: {}", e)])
        }
        _ => Err(errors),
    };

    match store {
        Ok(store) => {
            tracing::info!(
                catalog_rows = store.rows().len(),
                detail_records = store.details().len(),
                "Movie artifacts loaded"
            );
            LoadState::Ready(Arc::new(store))
        }
        Err(errors) => {
            for error in &errors {
                tracing::error!(error = %error, "Artifact load error");
            }
            LoadState::Failed(errors)
        }
    }
}

fn read_artifact<T: DeserializeOwned>(
    name: &str,
    path: &Path,
    errors: &mut Vec<String>,
) -> Option<T> {
    if !path.exists() {
        errors.push(format!(
            "Missing required {} artifact: {}",
            name,
            path.display()
        ));
        return None;
    }

    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) => {
            errors.push(format!(
                "Unable to read {} artifact {}: {}",
                name,
                path.display(),
                e
            ));
            return None;
        }
    };

    match serde_json::from_str::<T>(&contents) {
        Ok(value) => {
            tracing::debug!(artifact = name, "Artifact parsed");
            Some(value)
        }
        Err(e) => {
            errors.push(format!(
                "Invalid {} artifact {}: {}",
                name,
                path.display(),
                e
            ));
            None
        }
    }
}
