use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
    response::Response,
};
use http_body_util::BodyExt;
use reelrank::{AppState, app, build_state, config::Config};
use tower::ServiceExt;

const SECRET: &str = "an-integration-test-secret-key-of-enough-length";

/// Closed port; rating scrapes fail fast and degrade to "unavailable".
const DEAD_ENDPOINT: &str = "http://127.0.0.1:9";

async fn spawn_app() -> (Router, Arc<AppState>) {
    let config = Config {
        addr: "127.0.0.1:0".parse().unwrap(),
        // empty key switches the TMDB client to its mock catalog
        tmdb_api_key: String::new(),
        tmdb_base_url: "https://api.themoviedb.org/3".to_string(),
        tmdb_image_base_url: "https://image.tmdb.org/t/p/w500".to_string(),
        tmdb_rps: 50,
        imdb_base_url: DEAD_ENDPOINT.to_string(),
        rotten_base_url: DEAD_ENDPOINT.to_string(),
        database_url: "sqlite::memory:".to_string(),
        db_max_connections: 1,
        secret_key: SECRET.to_string(),
    };

    let state = build_state(config).await.expect("failed to build app state");
    (app(state.clone()), state)
}

async fn get(app: &Router, uri: &str) -> Response {
    app.clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn get_with_cookie(app: &Router, uri: &str, cookie: &str) -> Response {
    app.clone()
        .oneshot(
            Request::builder()
                .uri(uri)
                .header(header::COOKIE, cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
}

async fn post_form(app: &Router, uri: &str, body: &str) -> Response {
    app.clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
}

async fn body_string(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn location(response: &Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .expect("redirect without Location header")
        .to_str()
        .unwrap()
}

/// First set-cookie pair of a response, for replaying on a follow-up request.
fn flash_cookie(response: &Response) -> String {
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("response did not set a cookie")
        .to_str()
        .unwrap();
    set_cookie.split(';').next().unwrap().to_string()
}

#[tokio::test]
async fn empty_list_renders_empty_state() {
    let (app, _state) = spawn_app().await;

    let response = get(&app, "/").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_string(response).await;
    assert!(body.contains("No movies yet"));
}

#[tokio::test]
async fn add_form_renders() {
    let (app, _state) = spawn_app().await;

    let response = get(&app, "/add").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_string(response).await;
    assert!(body.contains("Movie Title"));
    assert!(body.contains("action=\"/add\""));
}

#[tokio::test]
async fn search_shows_candidate_selection() {
    let (app, _state) = spawn_app().await;

    let response = post_form(&app, "/add", "title=fight").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_string(response).await;
    assert!(body.contains("Fight Club"));
    assert!(body.contains("/find?id=550"));
}

#[tokio::test]
async fn empty_search_flashes_and_redisplays_form() {
    let (app, state) = spawn_app().await;

    let response = post_form(&app, "/add", "title=zzz+no+such+movie").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/add");

    let cookie = flash_cookie(&response);
    let follow_up = get_with_cookie(&app, "/add", &cookie).await;
    let body = body_string(follow_up).await;
    assert!(body.contains("not found!"));

    assert!(state.store.get_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn blank_title_is_rejected() {
    let (app, state) = spawn_app().await;

    let response = post_form(&app, "/add", "title=++").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/add");

    assert!(state.store.get_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn resolve_creates_record_and_redirects_to_edit() {
    let (app, state) = spawn_app().await;

    let response = get(&app, "/find?id=550").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/edit?id=1&title=Fight%20Club");

    let movies = state.store.get_all().await.unwrap();
    assert_eq!(movies.len(), 1);

    let movie = &movies[0];
    assert_eq!(movie.title, "Fight Club");
    assert_eq!(movie.year, Some(1999));
    assert_eq!(
        movie.image_url.as_deref(),
        Some("https://image.tmdb.org/t/p/w500/pB8BM7pdSp6B6Ih7QZ4DrQ3PmJK.jpg")
    );
    assert!(movie.rating.is_none());
    assert!(movie.review.is_none());
    assert!(movie.imdb_rating.is_none());
    assert!(movie.rotten_rating.is_none());
}

#[tokio::test]
async fn resolving_duplicate_title_redirects_to_existing_record() {
    let (app, state) = spawn_app().await;

    get(&app, "/find?id=550").await;
    let response = get(&app, "/find?id=550").await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/edit?id=1&title=Fight%20Club");
    assert_eq!(state.store.get_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn resolve_without_id_redirects_home() {
    let (app, _state) = spawn_app().await;

    let response = get(&app, "/find").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
}

#[tokio::test]
async fn edit_submit_persists_rating_and_review() {
    let (app, state) = spawn_app().await;
    get(&app, "/find?id=550").await;

    let response =
        post_form(&app, "/edit?id=1&title=Fight%20Club", "rating=7.5&review=Still+holds+up").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");

    let movie = state.store.get_by_id(1).await.unwrap().unwrap();
    assert_eq!(movie.rating.as_deref(), Some("7.5"));
    assert_eq!(movie.review.as_deref(), Some("Still holds up"));
    // scrape endpoints are unreachable in tests, so these stay unset
    assert!(movie.imdb_rating.is_none());
    assert!(movie.rotten_rating.is_none());
}

#[tokio::test]
async fn edit_submit_rejects_non_numeric_rating() {
    let (app, state) = spawn_app().await;
    get(&app, "/find?id=550").await;

    let response =
        post_form(&app, "/edit?id=1&title=Fight%20Club", "rating=great&review=nope").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/edit?id=1&title=Fight%20Club");

    let movie = state.store.get_by_id(1).await.unwrap().unwrap();
    assert!(movie.rating.is_none());
    assert!(movie.review.is_none());
}

#[tokio::test]
async fn edit_with_unknown_id_redirects_home() {
    let (app, _state) = spawn_app().await;

    let response = get(&app, "/edit?id=42").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
}

#[tokio::test]
async fn listing_ranks_by_rating_descending() {
    let (app, _state) = spawn_app().await;

    get(&app, "/find?id=550").await;
    get(&app, "/find?id=603").await;
    post_form(&app, "/edit?id=1&title=Fight%20Club", "rating=7.5&review=good").await;
    post_form(&app, "/edit?id=2&title=The%20Matrix", "rating=9&review=better").await;

    let body = body_string(get(&app, "/").await).await;

    let matrix_pos = body.find("The Matrix").unwrap();
    let fight_club_pos = body.find("Fight Club").unwrap();
    assert!(matrix_pos < fight_club_pos, "higher-rated movie should be listed first");

    // two records: top one ranked #2, bottom one #1
    assert!(body.contains("#2"));
    assert!(body.contains("#1"));
}

#[tokio::test]
async fn delete_removes_record() {
    let (app, state) = spawn_app().await;
    get(&app, "/find?id=550").await;

    let response = get(&app, "/delete?id=1").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");

    assert!(state.store.get_by_id(1).await.unwrap().is_none());
    let body = body_string(get(&app, "/").await).await;
    assert!(!body.contains("Fight Club"));
}

#[tokio::test]
async fn unknown_route_renders_404_page() {
    let (app, _state) = spawn_app().await;

    let response = get(&app, "/nope").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_string(response).await;
    assert!(body.contains("404 - Page Not Found"));
}
