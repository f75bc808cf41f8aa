pub mod catalog;
pub mod loader;

pub use catalog::{CatalogStore, LoadState, SimilarityMatrix};
pub use loader::{load, ArtifactPaths};
