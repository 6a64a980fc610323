use reqwest::header::REFERER;
use scraper::{Html, Selector};
use tracing::{debug, warn};

use crate::error::AppResult;

/// Outcome of a best-effort rating scrape. `Unavailable` means the provider
/// answered but had no rating for the title; `Failed` covers network and
/// parse faults, which are logged and never propagated.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RatingFetch {
    Found(String),
    Unavailable,
    Failed,
}

impl RatingFetch {
    pub fn value(&self) -> Option<&str> {
        match self {
            RatingFetch::Found(v) => Some(v),
            _ => None,
        }
    }

    pub fn into_value(self) -> Option<String> {
        match self {
            RatingFetch::Found(v) => Some(v),
            _ => None,
        }
    }
}

pub struct RatingsClient {
    client: reqwest::Client,
    imdb_base_url: String,
    rotten_base_url: String,
}

impl RatingsClient {
    pub fn new(client: reqwest::Client, imdb_base_url: String, rotten_base_url: String) -> Self {
        Self { client, imdb_base_url, rotten_base_url }
    }

    pub async fn imdb_rating(&self, title: &str) -> RatingFetch {
        match self.fetch_imdb(title).await {
            Ok(Some(rating)) => RatingFetch::Found(rating),
            Ok(None) => {
                debug!(title = %title, "no IMDb rating found");
                RatingFetch::Unavailable
            },
            Err(err) => {
                warn!(title = %title, error = %err, "IMDb rating fetch failed");
                RatingFetch::Failed
            },
        }
    }

    pub async fn rotten_rating(&self, title: &str) -> RatingFetch {
        match self.fetch_rotten(title).await {
            Ok(Some(rating)) => RatingFetch::Found(rating),
            Ok(None) => {
                debug!(title = %title, "no Rotten Tomatoes rating found");
                RatingFetch::Unavailable
            },
            Err(err) => {
                warn!(title = %title, error = %err, "Rotten Tomatoes rating fetch failed");
                RatingFetch::Failed
            },
        }
    }

    async fn fetch_imdb(&self, title: &str) -> AppResult<Option<String>> {
        let base = self.imdb_base_url.trim_end_matches('/');
        let url = format!("{}/find/?q={}&s=tt&ttype=ft", base, urlencoding::encode(title));
        debug!(title = %title, "searching IMDb");
        let html = self
            .client
            .get(&url)
            .header(REFERER, "https://www.imdb.com/")
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let Some(path) = parse_imdb_title_path(&html) else {
            return Ok(None);
        };

        let title_url = format!("{base}{path}");
        debug!(title = %title, url = %title_url, "fetching IMDb title page");
        let html = self
            .client
            .get(&title_url)
            .header(REFERER, url.as_str())
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        Ok(parse_imdb_score(&html))
    }

    async fn fetch_rotten(&self, title: &str) -> AppResult<Option<String>> {
        let base = self.rotten_base_url.trim_end_matches('/');
        let url = format!("{}/search?search={}", base, urlencoding::encode(title));
        debug!(title = %title, "searching Rotten Tomatoes");
        let html = self
            .client
            .get(&url)
            .header(REFERER, "https://www.rottentomatoes.com/")
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        Ok(parse_rotten_score(&html, title))
    }
}

/// First `/title/tt...` link in an IMDb find-results page, query string
/// stripped.
fn parse_imdb_title_path(html: &str) -> Option<String> {
    let doc = Html::parse_document(html);
    let selector = Selector::parse("a[href^='/title/tt']").unwrap();

    doc.select(&selector)
        .next()
        .and_then(|el| el.value().attr("href"))
        .map(|href| href.split('?').next().unwrap_or(href).to_string())
}

/// Aggregate score from an IMDb title page hero section.
fn parse_imdb_score(html: &str) -> Option<String> {
    let doc = Html::parse_document(html);
    let selector =
        Selector::parse("[data-testid='hero-rating-bar__aggregate-rating__score'] > span")
            .unwrap();

    let text: String = doc.select(&selector).next()?.text().collect();
    let text = text.trim();
    text.parse::<f64>().ok().map(|_| text.to_string())
}

/// Tomatometer score from a Rotten Tomatoes search page. Rows matching the
/// searched title are preferred; otherwise the first row carrying a score
/// wins.
fn parse_rotten_score(html: &str, title: &str) -> Option<String> {
    let doc = Html::parse_document(html);
    let row_selector = Selector::parse("search-page-media-row").unwrap();
    let name_selector = Selector::parse("a[data-qa='info-name']").unwrap();

    let mut first_scored = None;

    for row in doc.select(&row_selector) {
        let score = row.value().attr("tomatometerscore").map(str::trim).filter(|s| !s.is_empty());
        let Some(score) = score else { continue };

        let name: String =
            row.select(&name_selector).next().map(|el| el.text().collect()).unwrap_or_default();
        if name.trim().eq_ignore_ascii_case(title.trim()) {
            return Some(format!("{score}%"));
        }

        if first_scored.is_none() {
            first_scored = Some(format!("{score}%"));
        }
    }

    first_scored
}
