pub mod catalog;
pub mod movie;

pub use catalog::{CatalogRow, LoadStatus, Neighbor, TitleEntry, TitleListing};
pub use movie::{DetailRecord, MovieDetails, UNKNOWN_DIRECTOR};
