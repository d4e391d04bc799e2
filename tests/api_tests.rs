use std::sync::Arc;

use async_trait::async_trait;
use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use serde_json::{json, Value};

use cinefind::{
    api::{create_router, AppState},
    config::ImageSettings,
    db::MemoryStore,
    error::{AppError, AppResult},
    models::{Genre, MovieSummary, RawRecommendResponse},
    services::CatalogClient,
};

/// Canned catalog: knows "Inception" and one recommendation, lists two action movies
struct FakeCatalog {
    genres_available: bool,
}

#[async_trait]
impl CatalogClient for FakeCatalog {
    async fn list_by_genre(&self, genre_id: u32) -> AppResult<Vec<MovieSummary>> {
        match genre_id {
            28 => Ok(vec![
                movie("1", "Mad Max: Fury Road", Some(8.1)),
                movie("2", "John Wick", None),
            ]),
            _ => Err(AppError::Transport("status 500".to_string())),
        }
    }

    async fn list_genres(&self) -> AppResult<Vec<Genre>> {
        if self.genres_available {
            Ok(vec![Genre::new(28, "Action"), Genre::new(35, "Comedy")])
        } else {
            Err(AppError::Transport("connection refused".to_string()))
        }
    }

    async fn recommend(&self, query: &str) -> AppResult<RawRecommendResponse> {
        match query {
            "Inception" => Ok(RawRecommendResponse {
                input_movie: Some("Inception".to_string()),
                poster: Some("/inception.jpg".to_string()),
                description: Some("A thief who steals secrets".to_string()),
                recommendations: vec!["Interstellar".to_string()],
            }),
            "Interstellar" => Ok(RawRecommendResponse {
                input_movie: Some("Interstellar".to_string()),
                poster: None,
                description: None,
                recommendations: vec![],
            }),
            _ => Ok(RawRecommendResponse::default()),
        }
    }
}

fn movie(id: &str, title: &str, rating: Option<f64>) -> MovieSummary {
    MovieSummary {
        id: id.to_string(),
        title: title.to_string(),
        poster_path: Some(format!("/{}.jpg", id)),
        overview: None,
        release_year: Some(2015),
        rating,
    }
}

fn create_test_server_with(genres_available: bool) -> TestServer {
    let state = AppState::new(
        Arc::new(FakeCatalog { genres_available }),
        Arc::new(MemoryStore::new()),
        ImageSettings::default(),
    );
    let app = create_router(state);
    TestServer::new(app).unwrap()
}

fn create_test_server() -> TestServer {
    create_test_server_with(true)
}

async fn sign_up_and_log_in(server: &TestServer) {
    server
        .post("/api/v1/auth/signup")
        .json(&json!({
            "name": "Ada",
            "email": "ada@example.com",
            "password": "secret1"
        }))
        .await
        .assert_status(StatusCode::CREATED);

    log_in(server).await;
}

async fn log_in(server: &TestServer) {
    server
        .post("/api/v1/auth/login")
        .json(&json!({
            "email": "ada@example.com",
            "password": "secret1"
        }))
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server();
    let response = server.get("/health").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let server = create_test_server();
    let id = "6f9619ff-8b86-d011-b42d-00c04fc964ff";

    let response = server
        .get("/health")
        .add_header(
            HeaderName::from_static("x-request-id"),
            HeaderValue::from_static(id),
        )
        .await;
    assert_eq!(response.header("x-request-id"), id);

    let response = server.get("/health").await;
    let generated = response.header("x-request-id");
    assert!(uuid::Uuid::parse_str(generated.to_str().unwrap()).is_ok());
}

#[tokio::test]
async fn test_signup_login_session_flow() {
    let server = create_test_server();

    let response = server.get("/api/v1/auth/session").await;
    response.assert_status(StatusCode::UNAUTHORIZED);

    let response = server
        .post("/api/v1/auth/signup")
        .json(&json!({
            "name": "Ada",
            "email": "ada@example.com",
            "password": "secret1"
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let created: Value = response.json();
    assert_eq!(created["email"], "ada@example.com");
    assert!(created.get("password").is_none());

    // Signing up does not log in
    server
        .get("/api/v1/auth/session")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    let response = server
        .post("/api/v1/auth/login")
        .json(&json!({
            "email": "ada@example.com",
            "password": "wrong-password"
        }))
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);
    let body: Value = response.json();
    assert_eq!(body["error"], "Invalid email or password");

    log_in(&server).await;

    let response = server.get("/api/v1/auth/session").await;
    response.assert_status_ok();
    let session: Value = response.json();
    assert_eq!(session["isAuthenticated"], true);
    assert_eq!(session["user"]["name"], "Ada");

    server
        .post("/api/v1/auth/logout")
        .await
        .assert_status(StatusCode::NO_CONTENT);
    server
        .get("/api/v1/auth/session")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_signup_validation_and_duplicates() {
    let server = create_test_server();

    let response = server
        .post("/api/v1/auth/signup")
        .json(&json!({ "name": "Ada", "email": "ada@example.com", "password": "123" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let response = server
        .post("/api/v1/auth/signup")
        .json(&json!({ "name": "", "email": "ada@example.com", "password": "secret1" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "Please fill in all fields");

    server
        .post("/api/v1/auth/signup")
        .json(&json!({ "name": "Ada", "email": "ada@example.com", "password": "secret1" }))
        .await
        .assert_status(StatusCode::CREATED);

    let response = server
        .post("/api/v1/auth/signup")
        .json(&json!({ "name": "Other", "email": "ada@example.com", "password": "secret2" }))
        .await;
    response.assert_status(StatusCode::CONFLICT);
    let body: Value = response.json();
    assert_eq!(body["error"], "Email already exists");
}

#[tokio::test]
async fn test_session_routes_require_login() {
    let server = create_test_server();

    server
        .get("/api/v1/view")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
    server
        .get("/api/v1/genres")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
    server
        .post("/api/v1/view/search")
        .json(&json!({ "query": "Inception" }))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_popular_then_search_then_clear() {
    let server = create_test_server();
    sign_up_and_log_in(&server).await;

    let response = server.post("/api/v1/view/popular").await;
    response.assert_status_ok();
    let view: Value = response.json();
    assert_eq!(view["mode"]["mode"], "browse");
    assert_eq!(view["page_title"], "Popular Action Movies");
    assert_eq!(view["catalog"]["status"], "loaded");
    let cards = view["catalog"]["data"].as_array().unwrap();
    assert_eq!(cards.len(), 2);
    assert_eq!(cards[0]["rating_label"], "8.1");
    assert_eq!(cards[1]["rating_label"], "N/A");
    assert_eq!(cards[0]["poster_url"], "https://image.tmdb.org/t/p/w500/1.jpg");

    let response = server
        .post("/api/v1/view/search")
        .json(&json!({ "query": "  Inception " }))
        .await;
    response.assert_status_ok();
    let view: Value = response.json();
    assert_eq!(view["mode"]["mode"], "search_results");
    assert_eq!(view["page_title"], "Search Results for \"Inception\"");
    assert_eq!(view["catalog"]["status"], "idle");
    assert_eq!(view["search"]["status"], "loaded");
    assert_eq!(view["search"]["data"]["primary"]["id"], "inception");
    let recommendations = view["search"]["data"]["recommendations"].as_array().unwrap();
    assert_eq!(recommendations.len(), 1);
    assert_eq!(recommendations[0]["title"], "Interstellar");

    let response = server.post("/api/v1/view/clear").await;
    let view: Value = response.json();
    assert_eq!(view["mode"]["mode"], "browse");
    assert_eq!(view["search"]["status"], "idle");
    assert_eq!(view["catalog"]["status"], "loaded");
}

#[tokio::test]
async fn test_search_notices() {
    let server = create_test_server();
    sign_up_and_log_in(&server).await;

    let response = server
        .post("/api/v1/view/search")
        .json(&json!({ "query": "   " }))
        .await;
    let view: Value = response.json();
    assert_eq!(view["notice"]["message"], "Please enter a movie name");
    assert_eq!(view["search"]["status"], "idle");

    let response = server
        .post("/api/v1/view/search")
        .json(&json!({ "query": "Nope" }))
        .await;
    let view: Value = response.json();
    assert!(view["notice"]["raised_at"].is_string());
    assert_eq!(view["notice"]["message"], "No results found for \"Nope\"");
}

#[tokio::test]
async fn test_select_recommendation_searches_title() {
    let server = create_test_server();
    sign_up_and_log_in(&server).await;

    let response = server
        .post("/api/v1/view/recommendation")
        .json(&json!({
            "movie": {
                "id": "interstellar",
                "title": "Interstellar",
                "poster_path": null,
                "overview": null,
                "release_year": null,
                "rating": null
            }
        }))
        .await;
    response.assert_status_ok();
    let view: Value = response.json();
    assert_eq!(view["search"]["data"]["primary"]["title"], "Interstellar");
    assert_eq!(
        view["search"]["data"]["primary"]["poster_url"],
        "https://via.placeholder.com/500x750?text=No+Image"
    );
}

#[tokio::test]
async fn test_genre_failure_sets_notice() {
    let server = create_test_server();
    sign_up_and_log_in(&server).await;

    server.get("/api/v1/view").await.assert_status_ok();

    let response = server.post("/api/v1/view/genres/35").await;
    let view: Value = response.json();
    assert_eq!(view["catalog"]["status"], "failed");
    assert_eq!(view["page_title"], "Genre 35 Movies");
    assert_eq!(view["notice"]["message"], "Failed to load Genre 35 movies");
}

#[tokio::test]
async fn test_recommend_endpoint() {
    let server = create_test_server();
    sign_up_and_log_in(&server).await;

    let response = server
        .get("/api/v1/recommend")
        .add_query_param("movie", "Inception")
        .await;
    response.assert_status_ok();
    let outcome: Value = response.json();
    assert_eq!(outcome["primary"]["title"], "Inception");
    assert_eq!(outcome["primary"]["poster_path"], "/inception.jpg");
    assert_eq!(outcome["recommendations"][0]["title"], "Interstellar");

    let response = server
        .get("/api/v1/recommend")
        .add_query_param("movie", "Unknown Film")
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["error"], "No results found for \"Unknown Film\"");

    server
        .get("/api/v1/recommend")
        .add_query_param("movie", " ")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_genres_remote_and_fallback() {
    let server = create_test_server();
    sign_up_and_log_in(&server).await;

    let listing: Value = server.get("/api/v1/genres").await.json();
    assert_eq!(listing["source"], "remote");
    assert_eq!(listing["genres"].as_array().unwrap().len(), 2);

    let server = create_test_server_with(false);
    sign_up_and_log_in(&server).await;

    let response = server.get("/api/v1/genres").await;
    response.assert_status_ok();
    let listing: Value = response.json();
    assert_eq!(listing["source"], "fallback");
    assert_eq!(listing["genres"][0]["name"], "Action");
    assert_eq!(listing["genres"].as_array().unwrap().len(), 6);
}
