//! End-to-end tests through the host dispatcher: ingest a document, query it
//! per site, and exercise the middleware chain.

mod support;

use axum::http::{HeaderValue, StatusCode, header};
use serde_json::Value;

use support::{SAMPLE_DOC, spawn_app};

fn host(value: &'static str) -> (header::HeaderName, HeaderValue) {
    (header::HOST, HeaderValue::from_static(value))
}

#[tokio::test]
async fn default_host_serves_the_film_archive() {
    let app = spawn_app(SAMPLE_DOC);
    let (name, value) = host("archive.example");

    let response = app.server.get("/api/movies").add_header(name, value).await;
    response.assert_status_ok();
    assert_eq!(
        response.headers().get("x-archive-site").unwrap(),
        "movies"
    );
    assert_eq!(response.headers().get(header::VARY).unwrap(), "host");

    let body: Value = response.json();
    assert_eq!(body["total_count"], 3);
    assert_eq!(body["page"], 1);
    assert_eq!(body["per_page"], 50);
}

#[tokio::test]
async fn genre_filter_and_title_sort_end_to_end() {
    let app = spawn_app(SAMPLE_DOC);

    let response = app
        .server
        .get("/api/movies")
        .add_query_param("genre", "Comedy")
        .add_query_param("sort_by", "title")
        .add_query_param("sort_dir", "asc")
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    let ids: Vec<&str> = body["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["id"].as_str().unwrap())
        .collect();
    // Stalker has no genres and must be excluded.
    assert_eq!(ids, vec!["arizona-dream", "paris-texas"]);
    assert_eq!(body["total_count"], 2);
}

#[tokio::test]
async fn entry_detail_and_not_found() {
    let app = spawn_app(SAMPLE_DOC);

    let found = app.server.get("/api/movies/paris-texas").await;
    found.assert_status_ok();
    let body: Value = found.json();
    assert_eq!(body["primary_title"], "Paris, Texas");
    assert_eq!(body["director"], "Wim Wenders");

    let missing = app.server.get("/api/movies/does-not-exist").await;
    missing.assert_status(StatusCode::NOT_FOUND);
    let body: Value = missing.json();
    assert_eq!(body["error"]["status"], 404);
}

#[tokio::test]
async fn facets_reflect_the_snapshot_indices() {
    let app = spawn_app(SAMPLE_DOC);

    let response = app.server.get("/api/facets").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(
        body["genres"],
        serde_json::json!(["Comedy", "Drama"])
    );
    assert_eq!(body["directors"], serde_json::json!(["Wim Wenders"]));
}

#[tokio::test]
async fn tv_host_serves_recordings_not_movies() {
    let app = spawn_app(SAMPLE_DOC);

    let (name, value) = host("tv.archive.example");
    let recordings = app
        .server
        .get("/api/recordings")
        .add_header(name.clone(), value.clone())
        .await;
    recordings.assert_status_ok();
    assert_eq!(recordings.headers().get("x-archive-site").unwrap(), "tv");
    let body: Value = recordings.json();
    assert_eq!(body["total_count"], 3);

    // The movies module is not mounted on the TV site.
    let movies = app.server.get("/api/movies").add_header(name, value).await;
    movies.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn secrets_host_serves_the_status_descriptor() {
    let app = spawn_app(SAMPLE_DOC);

    let (name, value) = host("ots.archive.example:8420");
    let response = app
        .server
        .get("/api/status")
        .add_header(name.clone(), value.clone())
        .await;
    response.assert_status_ok();
    assert_eq!(response.headers().get("x-archive-site").unwrap(), "ots");
    let body: Value = response.json();
    assert_eq!(body["service"], "one-time-secrets");

    let movies = app.server.get("/api/movies").add_header(name, value).await;
    movies.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn shared_legal_pages_name_the_resolved_site() {
    let app = spawn_app(SAMPLE_DOC);

    for (host_value, expected) in [
        ("archive.example", "movies"),
        ("tv.archive.example", "tv"),
        ("ots.archive.example", "ots"),
    ] {
        let response = app
            .server
            .get("/legal/imprint")
            .add_header(header::HOST, HeaderValue::from_static(host_value))
            .await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["site"], expected, "{host_value}");
        assert_eq!(body["page"], "imprint");
    }
}

#[tokio::test]
async fn garbage_hosts_fall_back_to_the_default_site() {
    let app = spawn_app(SAMPLE_DOC);

    let response = app
        .server
        .get("/healthz")
        .add_header(header::HOST, HeaderValue::from_static("127.0.0.1:9999"))
        .await;
    response.assert_status_ok();
    assert_eq!(
        response.headers().get("x-archive-site").unwrap(),
        "movies"
    );
    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["entries"], 3);
}

#[tokio::test]
async fn trailing_slashes_are_coerced_before_routing() {
    let app = spawn_app(SAMPLE_DOC);

    let response = app.server.get("/api/movies/").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["total_count"], 3);
}

#[tokio::test]
async fn reload_installs_the_new_snapshot() {
    let app = spawn_app(SAMPLE_DOC);

    std::fs::write(app.doc.path(), "* Metropolis (1927)\n* Nosferatu (1922)\n").unwrap();

    let response = app.server.post("/api/catalog/reload").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["entries"], 2);
    assert_eq!(body["previous_entries"], 3);

    let listing: Value = app.server.get("/api/movies").await.json();
    assert_eq!(listing["total_count"], 2);
}

#[tokio::test]
async fn reload_conflicts_while_a_build_is_in_flight() {
    let app = spawn_app(SAMPLE_DOC);

    let guard = app.state.catalog.begin_reload().unwrap();
    let response = app.server.post("/api/catalog/reload").await;
    response.assert_status(StatusCode::CONFLICT);
    drop(guard);

    // The old snapshot kept serving throughout.
    let listing: Value = app.server.get("/api/movies").await.json();
    assert_eq!(listing["total_count"], 3);
}

#[tokio::test]
async fn failed_reload_keeps_serving_the_old_snapshot() {
    let app = spawn_app(SAMPLE_DOC);

    std::fs::write(app.doc.path(), "* Broken\n:PROPERTIES:\n:YEAR: 2001\n").unwrap();
    let response = app.server.post("/api/catalog/reload").await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);

    let listing: Value = app.server.get("/api/movies").await.json();
    assert_eq!(listing["total_count"], 3);
}
