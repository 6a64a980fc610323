use axum::{
    extract::{Form, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::SignedCookieJar;
use futures::future;
use serde::Deserialize;

use crate::{
    AppState,
    error::{AppError, AppResult},
    flash::{self, FlashLevel},
    models::{AddForm, NewMovie, RateForm, canonicalize_rating},
    store, templates,
};

pub async fn index(
    State(state): State<AppState>,
    jar: SignedCookieJar,
) -> AppResult<Response> {
    let (jar, flash) = flash::take(jar);

    let movies = state.store.get_all().await?;
    let ranked = store::ranked(store::sort_by_rating(movies));

    Ok((jar, Html(templates::index_page(&ranked, flash.as_ref()))).into_response())
}

pub async fn add_form(jar: SignedCookieJar) -> Response {
    let (jar, flash) = flash::take(jar);
    (jar, Html(templates::add_page(flash.as_ref()))).into_response()
}

pub async fn add_submit(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Form(form): Form<AddForm>,
) -> AppResult<Response> {
    let title = form.title.trim();

    if title.is_empty() {
        let jar = flash::set(jar, FlashLevel::Error, "Movie title is required");
        return Ok((jar, Redirect::to("/add")).into_response());
    }

    let candidates = state.tmdb.search_movies(title).await?;
    if candidates.is_empty() {
        let jar = flash::set(
            jar,
            FlashLevel::Error,
            format!("Movie with title {title} not found!"),
        );
        return Ok((jar, Redirect::to("/add")).into_response());
    }

    Ok(Html(templates::select_page(&candidates)).into_response())
}

#[derive(Debug, Deserialize)]
pub struct FindQuery {
    pub id: Option<i32>,
}

pub async fn find(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Query(query): Query<FindQuery>,
) -> AppResult<Response> {
    let Some(tmdb_id) = query.id else {
        return Ok(Redirect::to("/").into_response());
    };

    let details = state.tmdb.movie_details(tmdb_id).await?;

    if let Some(existing) = state.store.find_by_title(&details.title).await? {
        let jar = flash::set(jar, FlashLevel::Warning, "Movie already exists!");
        return Ok((jar, Redirect::to(&edit_url(existing.id, &existing.title))).into_response());
    }

    let new = NewMovie {
        title: details.title.clone(),
        year: details.release_year(),
        image_url: details.image_url(&state.config.tmdb_image_base_url),
        description: details.overview,
    };

    let (id, title) = state.store.create(new).await?;
    tracing::debug!(id = id, title = %title, "created movie record");

    Ok(Redirect::to(&edit_url(id, &title)).into_response())
}

#[derive(Debug, Deserialize)]
pub struct EditQuery {
    pub id: Option<i32>,
    pub title: Option<String>,
}

pub async fn edit_form(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Query(query): Query<EditQuery>,
) -> AppResult<Response> {
    let (jar, flash) = flash::take(jar);

    let Some(id) = query.id else {
        return Ok(Redirect::to("/").into_response());
    };

    let Some(movie) = state.store.get_by_id(id).await? else {
        let jar = flash::set(jar, FlashLevel::Error, "Movie not found");
        return Ok((jar, Redirect::to("/")).into_response());
    };

    let title = query.title.unwrap_or_else(|| movie.title.clone());
    let (imdb, rotten) =
        future::join(state.ratings.imdb_rating(&title), state.ratings.rotten_rating(&title)).await;

    Ok((
        jar,
        Html(templates::edit_page(&movie, &title, imdb.value(), rotten.value(), flash.as_ref())),
    )
        .into_response())
}

pub async fn edit_submit(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Query(query): Query<EditQuery>,
    Form(form): Form<RateForm>,
) -> AppResult<Response> {
    let Some(id) = query.id else {
        return Ok(Redirect::to("/").into_response());
    };

    let Some(mut movie) = state.store.get_by_id(id).await? else {
        let jar = flash::set(jar, FlashLevel::Error, "Movie not found");
        return Ok((jar, Redirect::to("/")).into_response());
    };

    let title = query.title.unwrap_or_else(|| movie.title.clone());

    let Some(rating) = canonicalize_rating(&form.rating) else {
        let jar =
            flash::set(jar, FlashLevel::Error, "Rating must be a number out of 10, e.g. 7.5");
        return Ok((jar, Redirect::to(&edit_url(movie.id, &title))).into_response());
    };

    let (imdb, rotten) =
        future::join(state.ratings.imdb_rating(&title), state.ratings.rotten_rating(&title)).await;

    movie.rating = Some(rating);
    movie.review = Some(form.review);
    movie.imdb_rating = imdb.into_value();
    movie.rotten_rating = rotten.into_value();
    state.store.update(movie).await?;

    Ok(Redirect::to("/").into_response())
}

#[derive(Debug, Deserialize)]
pub struct DeleteQuery {
    pub id: Option<i32>,
}

pub async fn delete(
    State(state): State<AppState>,
    Query(query): Query<DeleteQuery>,
) -> AppResult<Response> {
    if let Some(id) = query.id {
        state.store.delete(id).await?;
    }
    Ok(Redirect::to("/").into_response())
}

pub async fn not_found() -> AppError {
    AppError::NotFound
}

fn edit_url(id: i32, title: &str) -> String {
    format!("/edit?id={}&title={}", id, urlencoding::encode(title))
}
