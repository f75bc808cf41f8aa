use crate::{
    models::{DetailRecord, MovieDetails, UNKNOWN_DIRECTOR},
    services::{
        normalizer::{coerce_float, coerce_optional_string, coerce_string, parse_list_field},
        providers::PosterResolver,
    },
    store::CatalogStore,
};
use serde_json::Value;

/// Builds the client-facing record for `movie_id`.
///
/// Returns `None` when the detail table has no such movie; callers decide
/// whether that is a 404 or a skipped recommendation.
pub async fn assemble(
    store: &CatalogStore,
    posters: &dyn PosterResolver,
    movie_id: i64,
) -> Option<MovieDetails> {
    let record = store.detail(movie_id)?;
    Some(assemble_record(record, posters).await)
}

/// Normalizes a raw detail row and attaches its poster
pub async fn assemble_record(record: &DetailRecord, posters: &dyn PosterResolver) -> MovieDetails {
    let crew = parse_list_field(record.crew.as_ref());
    let director = crew
        .first()
        .cloned()
        .unwrap_or_else(|| UNKNOWN_DIRECTOR.to_string());

    MovieDetails {
        movie_id: record.movie_id,
        title: coerce_string(record.title.as_ref(), ""),
        overview: coerce_optional_string(record.overview.as_ref()),
        genres: parse_list_field(record.genres.as_ref()),
        cast: parse_list_field(record.cast.as_ref()),
        director,
        crew,
        runtime: coerce_float(record.runtime.as_ref()),
        vote_average: coerce_float(record.vote_average.as_ref()),
        tagline: coerce_string(record.tagline.as_ref(), ""),
        year: release_year(record.release_date.as_ref()),
        poster: posters.fetch_poster(record.movie_id).await,
    }
}

/// Text before the first `-` of a release date; empty when absent or not text
fn release_year(release_date: Option<&Value>) -> String {
    match release_date {
        Some(Value::String(date)) => date.split('-').next().unwrap_or_default().to_string(),
        _ => String::new(),
    }
}
