pub mod details;
pub mod normalizer;
pub mod providers;
pub mod recommendations;
pub mod similarity;
pub mod title_search;

pub use providers::{PosterResolver, StaticPosterResolver, TmdbPosterResolver};
pub use recommendations::RecommendationService;
