use sea_orm::{
    ActiveModelTrait,
    ActiveValue::{NotSet, Set, Unchanged},
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};

use crate::{
    entities::movie,
    error::AppResult,
    models::{NewMovie, RankedMovie},
};

/// Persistence layer for movie records. All mutations write through
/// immediately; there is no batching.
#[derive(Clone)]
pub struct MovieStore {
    db: DatabaseConnection,
}

impl MovieStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// All records in id order. Id order is what keeps rating ties stable
    /// across listings.
    pub async fn get_all(&self) -> AppResult<Vec<movie::Model>> {
        let movies =
            movie::Entity::find().order_by_asc(movie::Column::Id).all(&self.db).await?;
        Ok(movies)
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Option<movie::Model>> {
        let movie = movie::Entity::find_by_id(id).one(&self.db).await?;
        Ok(movie)
    }

    /// Exact-match title lookup, used by the resolve flow for duplicate
    /// detection.
    pub async fn find_by_title(&self, title: &str) -> AppResult<Option<movie::Model>> {
        let movie = movie::Entity::find()
            .filter(movie::Column::Title.eq(title))
            .one(&self.db)
            .await?;
        Ok(movie)
    }

    pub async fn create(&self, new: NewMovie) -> AppResult<(i32, String)> {
        let model = movie::ActiveModel {
            id: NotSet,
            title: Set(new.title.clone()),
            year: Set(new.year),
            image_url: Set(new.image_url),
            description: Set(new.description),
            rating: Set(None),
            review: Set(None),
            imdb_rating: Set(None),
            rotten_rating: Set(None),
        };

        let res = movie::Entity::insert(model).exec(&self.db).await?;
        Ok((res.last_insert_id, new.title))
    }

    pub async fn update(&self, movie: movie::Model) -> AppResult<()> {
        let model = movie::ActiveModel {
            id: Unchanged(movie.id),
            title: Set(movie.title),
            year: Set(movie.year),
            image_url: Set(movie.image_url),
            description: Set(movie.description),
            rating: Set(movie.rating),
            review: Set(movie.review),
            imdb_rating: Set(movie.imdb_rating),
            rotten_rating: Set(movie.rotten_rating),
        };
        model.update(&self.db).await?;
        Ok(())
    }

    /// Deleting an id with no matching record is a no-op.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        movie::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(())
    }
}

/// Stable descending sort by the user rating. Unrated records sort below all
/// rated ones; ties keep their incoming order.
pub fn sort_by_rating(mut movies: Vec<movie::Model>) -> Vec<movie::Model> {
    movies.sort_by(|a, b| rating_value(b).total_cmp(&rating_value(a)));
    movies
}

/// Attach display positions: record `i` of `n` gets ranking `n - i`.
pub fn ranked(movies: Vec<movie::Model>) -> Vec<RankedMovie> {
    let count = movies.len();
    movies
        .into_iter()
        .enumerate()
        .map(|(i, movie)| RankedMovie { ranking: count - i, movie })
        .collect()
}

fn rating_value(movie: &movie::Model) -> f64 {
    movie
        .rating
        .as_deref()
        .and_then(|r| r.parse().ok())
        .unwrap_or(f64::NEG_INFINITY)
}
