use serde::Deserialize;

use crate::entities::movie;

/// A movie as reported by TMDB, from either the search or the details
/// endpoint.
#[derive(Clone, Debug)]
pub struct TmdbMovie {
    pub tmdb_id: i32,
    pub title: String,
    pub release_date: Option<String>,
    pub overview: String,
    pub poster_path: Option<String>,
}

impl TmdbMovie {
    /// Release year, taken from the leading segment of the provider's
    /// `YYYY-MM-DD` date string.
    pub fn release_year(&self) -> Option<i32> {
        self.release_date
            .as_deref()
            .and_then(|d| d.split('-').next())
            .and_then(|y| y.parse().ok())
    }

    pub fn image_url(&self, image_base_url: &str) -> Option<String> {
        self.poster_path
            .as_deref()
            .map(|p| format!("{}{}", image_base_url.trim_end_matches('/'), p))
    }
}

/// Fields the resolve flow supplies when persisting a new record. Rating,
/// review and the scraped ratings stay unset until the edit flow.
#[derive(Clone, Debug)]
pub struct NewMovie {
    pub title: String,
    pub year: Option<i32>,
    pub image_url: Option<String>,
    pub description: String,
}

/// A stored movie paired with its display position. Computed on every
/// listing, never persisted.
#[derive(Clone, Debug)]
pub struct RankedMovie {
    pub ranking: usize,
    pub movie: movie::Model,
}

#[derive(Debug, Deserialize)]
pub struct AddForm {
    pub title: String,
}

#[derive(Debug, Deserialize)]
pub struct RateForm {
    pub rating: String,
    pub review: String,
}

/// Parse a user-entered rating through a float and render it back as its
/// shortest decimal text, so `"7.5"` stays `"7.5"` and `"07"` becomes `"7"`.
pub fn canonicalize_rating(input: &str) -> Option<String> {
    let value: f64 = input.trim().parse().ok()?;
    value.is_finite().then(|| format!("{value}"))
}
