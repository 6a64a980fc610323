pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod flash;
pub mod models;
pub mod ratings;
pub mod routes;
pub mod store;
pub mod templates;
pub mod tmdb;

use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    extract::FromRef,
    routing::get,
};
use axum_extra::extract::cookie::Key;
use tower_http::trace::TraceLayer;

use crate::{config::Config, ratings::RatingsClient, store::MovieStore, tmdb::TmdbClient};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: MovieStore,
    pub tmdb: Arc<TmdbClient>,
    pub ratings: Arc<RatingsClient>,
    cookie_key: Key,
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Key {
        state.cookie_key.clone()
    }
}

pub async fn build_state(config: Config) -> anyhow::Result<Arc<AppState>> {
    anyhow::ensure!(
        config.secret_key.len() >= 32,
        "SECRET_KEY must be at least 32 bytes"
    );
    let cookie_key = Key::derive_from(config.secret_key.as_bytes());

    let http = reqwest::Client::builder()
        .user_agent("reelrank/0.1")
        .timeout(Duration::from_secs(30))
        .build()?;

    let db = db::connect_and_migrate(&config.database_url, config.db_max_connections).await?;
    let store = MovieStore::new(db);

    let tmdb = TmdbClient::new(
        http.clone(),
        config.tmdb_api_key.clone(),
        config.tmdb_base_url.clone(),
        config.tmdb_rps,
    );

    let ratings = RatingsClient::new(
        http,
        config.imdb_base_url.clone(),
        config.rotten_base_url.clone(),
    );

    Ok(Arc::new(AppState {
        config: Arc::new(config),
        store,
        tmdb: Arc::new(tmdb),
        ratings: Arc::new(ratings),
        cookie_key,
    }))
}

pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(routes::index))
        .route("/add", get(routes::add_form).post(routes::add_submit))
        .route("/find", get(routes::find))
        .route("/edit", get(routes::edit_form).post(routes::edit_submit))
        .route("/delete", get(routes::delete))
        .fallback(routes::not_found)
        .with_state((*state).clone())
        .layer(TraceLayer::new_for_http())
}
