use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use movie_match_api::{
    api::{create_router, AppState},
    config::Config,
    services::{PosterResolver, RecommendationService, StaticPosterResolver, TmdbPosterResolver},
    store,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("movie_match_api=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;

    // Loaded once; a failed load is served as not-ready until restart
    let load_state = store::load(&config.artifact_paths());
    if !load_state.is_ready() {
        tracing::warn!("Starting without movie data; queries will report data unavailable");
    }

    let posters: Arc<dyn PosterResolver> = match &config.tmdb_api_key {
        Some(api_key) => Arc::new(TmdbPosterResolver::new(
            api_key.clone(),
            config.tmdb_api_url.clone(),
            config.tmdb_image_base_url.clone(),
        )),
        None => {
            tracing::warn!("TMDB_API_KEY not set, posters disabled");
            Arc::new(StaticPosterResolver)
        }
    };
    tracing::info!(provider = posters.name(), "Poster provider configured");

    let service = RecommendationService::new(load_state, posters, config.recommendation_count);
    let app = create_router(AppState::new(service, config.title_list_limit));

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(address = %address, "Server running");
    axum::serve(listener, app).await?;

    Ok(())
}
