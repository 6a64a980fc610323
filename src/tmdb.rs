use std::{num::NonZeroU32, sync::Arc};

use governor::{
    Quota, RateLimiter,
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
};
use serde::Deserialize;

use crate::{error::AppResult, models::TmdbMovie};

pub struct TmdbClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    limiter: Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
}

impl TmdbClient {
    pub fn new(client: reqwest::Client, api_key: String, base_url: String, rps: u32) -> Self {
        // Warn once on app load if using mock data
        if api_key.trim().is_empty() {
            tracing::warn!("Using mock TMDB data - no TMDB_API_KEY provided");
        }

        let limiter =
            Arc::new(RateLimiter::direct(Quota::per_second(NonZeroU32::new(rps.max(1)).unwrap())));
        Self { client, api_key, base_url, limiter }
    }

    /// Free-text title search. An empty result list is a normal outcome, not
    /// an error.
    pub async fn search_movies(&self, query: &str) -> AppResult<Vec<TmdbMovie>> {
        if self.api_key.trim().is_empty() {
            let needle = query.to_lowercase();
            return Ok(mock_catalog()
                .into_iter()
                .filter(|m| m.title.to_lowercase().contains(&needle))
                .collect());
        }

        self.limiter.until_ready().await;

        let url = format!("{}/search/movie", self.base_url.trim_end_matches('/'));
        let resp: SearchResponse = self
            .client
            .get(url)
            .bearer_auth(&self.api_key)
            .query(&[("query", query)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(resp.results.into_iter().map(MovieEntry::into_movie).collect())
    }

    /// Full record for a single provider id.
    pub async fn movie_details(&self, tmdb_id: i32) -> AppResult<TmdbMovie> {
        if self.api_key.trim().is_empty() {
            return mock_catalog()
                .into_iter()
                .find(|m| m.tmdb_id == tmdb_id)
                .ok_or_else(|| anyhow::anyhow!("no mock movie with id {tmdb_id}").into());
        }

        self.limiter.until_ready().await;

        let url = format!("{}/movie/{}", self.base_url.trim_end_matches('/'), tmdb_id);
        let resp: MovieEntry = self
            .client
            .get(url)
            .bearer_auth(&self.api_key)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(resp.into_movie())
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    results: Vec<MovieEntry>,
}

#[derive(Debug, Deserialize)]
struct MovieEntry {
    id: i32,
    title: String,
    release_date: Option<String>,
    overview: Option<String>,
    poster_path: Option<String>,
}

impl MovieEntry {
    fn into_movie(self) -> TmdbMovie {
        TmdbMovie {
            tmdb_id: self.id,
            title: self.title,
            // TMDB reports missing dates as "" in search results
            release_date: self.release_date.filter(|d| !d.is_empty()),
            overview: self.overview.unwrap_or_default(),
            poster_path: self.poster_path,
        }
    }
}

fn mock_catalog() -> Vec<TmdbMovie> {
    vec![
        TmdbMovie {
            tmdb_id: 550,
            title: "Fight Club".to_string(),
            release_date: Some("1999-10-15".to_string()),
            overview: "An insomniac office worker and a devil-may-care soap maker form an \
                       underground fight club."
                .to_string(),
            poster_path: Some("/pB8BM7pdSp6B6Ih7QZ4DrQ3PmJK.jpg".to_string()),
        },
        TmdbMovie {
            tmdb_id: 603,
            title: "The Matrix".to_string(),
            overview: "A hacker learns the world he lives in is a simulation.".to_string(),
            release_date: Some("1999-03-30".to_string()),
            poster_path: Some("/f89U3ADr1oiB1s9GkdPOEpXUk5H.jpg".to_string()),
        },
    ]
}
