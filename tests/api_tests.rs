//! Integration tests for the JSON API.
//!
//! Each test gets its own SQLite file and drives the router with `oneshot`,
//! carrying the session cookie by hand.

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use cinedex::config::Config;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

async fn spawn_app(seed: bool) -> Router {
    let db_path =
        std::env::temp_dir().join(format!("cinedex-api-test-{}.db", uuid::Uuid::new_v4()));

    let mut config = Config::default();
    config.general.database_path = format!("sqlite:{}", db_path.display());
    config.catalog.seed_sample_data = seed;
    config.security.argon2_memory_cost_kib = 1024;
    config.security.argon2_time_cost = 1;

    let state = cinedex::api::create_app_state_from_config(config, None)
        .await
        .expect("Failed to create app state");
    cinedex::api::router(state).await
}

fn request(method: Method, uri: &str, cookie: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

/// Registers `admin` and returns the session cookie of a fresh login.
async fn login(app: &Router) -> String {
    let creds = json!({ "username": "admin", "password": "secret123" });

    let (status, _) = send(
        app,
        request(Method::POST, "/api/auth/register", None, Some(creds.clone())),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(request(Method::POST, "/api/auth/login", None, Some(creds)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    response
        .headers()
        .get(header::SET_COOKIE)
        .expect("login must set a session cookie")
        .to_str()
        .unwrap()
        .split(';')
        .next()
        .unwrap()
        .to_string()
}

#[tokio::test]
async fn test_protected_routes_require_session() {
    let app = spawn_app(true).await;

    for uri in ["/api/genres", "/api/movies", "/api/filter", "/api/auth/me", "/api/metrics"] {
        let (status, body) = send(&app, request(Method::GET, uri, None, None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{uri}");
        assert_eq!(body["success"], false);
    }

    let (status, _) = send(
        &app,
        request(Method::GET, "/api/genres", Some("id=not-a-session"), None),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_register_login_me_logout() {
    let app = spawn_app(false).await;
    let cookie = login(&app).await;

    let (status, body) = send(&app, request(Method::GET, "/api/auth/me", Some(&cookie), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["username"], "admin");
    assert!(body["data"]["admin_id"].as_i64().unwrap() > 0);

    let (status, _) = send(
        &app,
        request(Method::POST, "/api/auth/logout", Some(&cookie), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, request(Method::GET, "/api/auth/me", Some(&cookie), None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Logging out without any session still succeeds.
    let (status, body) = send(&app, request(Method::POST, "/api/auth/logout", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
}

#[tokio::test]
async fn test_default_session_cookie_works_over_plain_http() {
    let app = spawn_app(false).await;
    let creds = json!({ "username": "plain", "password": "secret123" });

    send(
        &app,
        request(Method::POST, "/api/auth/register", None, Some(creds.clone())),
    )
    .await;
    let response = app
        .clone()
        .oneshot(request(Method::POST, "/api/auth/login", None, Some(creds)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(set_cookie.contains("HttpOnly"), "{set_cookie}");
    assert!(
        !set_cookie.split(';').any(|attr| attr.trim() == "Secure"),
        "{set_cookie}"
    );
}

fn raw_json(uri: &str, cookie: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::COOKIE, cookie)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_malformed_bodies_use_error_envelope() {
    let app = spawn_app(true).await;
    let cookie = login(&app).await;

    let wrong_type = r#"{"name":"Heat","year":"abc","rating":8,"genre_id":"A"}"#;
    let (status, body) = send(&app, raw_json("/api/movies", &cookie, wrong_type)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().starts_with("Invalid request body"));

    let (status, body) = send(&app, raw_json("/api/genres", &cookie, r#"{"genre_id": "#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(body["error"].is_string());

    let (status, body) = send(&app, raw_json("/api/auth/login", "", "not json")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    let (_, body) = send(&app, request(Method::GET, "/api/movies", Some(&cookie), None)).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_register_duplicate_and_invalid() {
    let app = spawn_app(false).await;
    let creds = json!({ "username": "dup", "password": "secret123" });

    let (status, body) = send(
        &app,
        request(Method::POST, "/api/auth/register", None, Some(creds.clone())),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["username"], "dup");
    assert!(body["data"].get("password_hash").is_none());

    let (status, _) = send(
        &app,
        request(Method::POST, "/api/auth/register", None, Some(creds)),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = send(
        &app,
        request(
            Method::POST,
            "/api/auth/register",
            None,
            Some(json!({ "username": "", "password": "123" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["errors"]["username"].is_array());
    assert!(body["errors"]["password"].is_array());
}

#[tokio::test]
async fn test_login_failure_is_generic() {
    let app = spawn_app(false).await;
    login(&app).await;

    let (unknown_status, unknown) = send(
        &app,
        request(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "username": "ghost", "password": "anything" })),
        ),
    )
    .await;
    let (wrong_status, wrong) = send(
        &app,
        request(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "username": "admin", "password": "not-it" })),
        ),
    )
    .await;

    assert_eq!(unknown_status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown["error"], wrong["error"]);
    assert_eq!(unknown["error"], "Username or password is incorrect");
}

#[tokio::test]
async fn test_genre_crud() {
    let app = spawn_app(false).await;
    let cookie = login(&app).await;
    let c = Some(cookie.as_str());

    for (code, name) in [("S", "SciFi"), ("C", "Comedy"), ("a", "Arthouse"), ("A", "Action")] {
        let (status, body) = send(
            &app,
            request(
                Method::POST,
                "/api/genres",
                c,
                Some(json!({ "genre_id": code, "name": name })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED, "{code}");
        assert_eq!(body["data"]["genre_id"], code);
    }

    let (status, _) = send(
        &app,
        request(
            Method::POST,
            "/api/genres",
            c,
            Some(json!({ "genre_id": "S", "name": "Space" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = send(&app, request(Method::GET, "/api/genres", c, None)).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|g| g["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Action", "Arthouse", "Comedy", "SciFi"]);

    let (status, body) = send(&app, request(Method::GET, "/api/genres/C", c, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Comedy");

    let (status, _) = send(&app, request(Method::GET, "/api/genres/Z", c, None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        request(
            Method::PUT,
            "/api/genres/C",
            c,
            Some(json!({ "genre_id": "C", "name": "Comedies" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(
        &app,
        request(
            Method::PUT,
            "/api/genres/C",
            c,
            Some(json!({ "genre_id": "S", "name": "Comedies" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        request(
            Method::PUT,
            "/api/genres/Z",
            c,
            Some(json!({ "genre_id": "Z", "name": "Zombie" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, request(Method::DELETE, "/api/genres/C", c, None)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, request(Method::DELETE, "/api/genres/C", c, None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_genre_validation_messages() {
    let app = spawn_app(false).await;
    let cookie = login(&app).await;

    let (status, body) = send(
        &app,
        request(
            Method::POST,
            "/api/genres",
            Some(&cookie),
            Some(json!({ "genre_id": "XY", "name": "A name far longer than twenty" })),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["errors"]["genre_id"][0],
        "Genre code must be a single character"
    );
    assert_eq!(
        body["errors"]["name"][0],
        "Genre name must be 20 characters or less"
    );
}

#[tokio::test]
async fn test_movie_crud() {
    let app = spawn_app(true).await;
    let cookie = login(&app).await;
    let c = Some(cookie.as_str());

    let (status, body) = send(
        &app,
        request(
            Method::POST,
            "/api/movies",
            c,
            Some(json!({ "name": "Blade Runner", "year": 1982, "rating": 9, "genre_id": "S" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["data"]["id"].as_i64().unwrap();
    assert_eq!(body["data"]["genre_name"], "SciFi");
    assert_eq!(body["data"]["slug"], "blade-runner-1982");

    let (status, body) = send(&app, request(Method::GET, &format!("/api/movies/{id}"), c, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Blade Runner");

    let update = json!({ "movie_id": id, "name": "Blade Runner", "year": 1982, "rating": 10, "genre_id": "S" });
    for _ in 0..2 {
        let (status, _) = send(
            &app,
            request(Method::PUT, &format!("/api/movies/{id}"), c, Some(update.clone())),
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);
    }

    let (status, _) = send(
        &app,
        request(Method::PUT, &format!("/api/movies/{}", id + 1), c, Some(update)),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        request(
            Method::PUT,
            "/api/movies/9999",
            c,
            Some(json!({ "movie_id": 9999, "name": "Ghost", "year": 2000, "rating": 5, "genre_id": "S" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, request(Method::GET, &format!("/api/movies/{id}"), c, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["rating"], 10);

    for _ in 0..2 {
        let (status, _) = send(
            &app,
            request(Method::DELETE, &format!("/api/movies/{id}"), c, None),
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);
    }

    let (status, _) = send(&app, request(Method::GET, &format!("/api/movies/{id}"), c, None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_movie_validation_messages() {
    let app = spawn_app(true).await;
    let cookie = login(&app).await;
    let c = Some(cookie.as_str());

    let (status, body) = send(&app, request(Method::POST, "/api/movies", c, Some(json!({})))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"]["name"][0], "Please enter a name");
    assert_eq!(body["errors"]["year"][0], "Please enter a year");
    assert_eq!(body["errors"]["rating"][0], "Please enter a rating");
    assert_eq!(body["errors"]["genre_id"][0], "Please enter a genre");

    let (status, body) = send(
        &app,
        request(
            Method::POST,
            "/api/movies",
            c,
            Some(json!({ "name": "Old", "year": 1800, "rating": 11, "genre_id": "D" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"]["year"][0], "Year must be between 1900 and 2025");
    assert_eq!(body["errors"]["rating"][0], "Rating must be between 1 and 10");

    let (status, _) = send(
        &app,
        request(
            Method::POST,
            "/api/movies",
            c,
            Some(json!({ "name": "Edge", "year": 2025, "rating": 0, "genre_id": "D" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        &app,
        request(
            Method::POST,
            "/api/movies",
            c,
            Some(json!({ "name": "Lost", "year": 2000, "rating": 5, "genre_id": "Q" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"]["genre_id"][0], "Please select a valid genre");
}

#[tokio::test]
async fn test_filter_endpoint() {
    let app = spawn_app(false).await;
    let cookie = login(&app).await;
    let c = Some(cookie.as_str());

    for (code, name) in [("A", "Action"), ("D", "Drama"), ("R", "RomCom")] {
        send(
            &app,
            request(Method::POST, "/api/genres", c, Some(json!({ "genre_id": code, "name": name }))),
        )
        .await;
    }
    for (name, year, genre) in [
        ("Star Wars", 1977, "A"),
        ("Star Trek", 1979, "A"),
        ("Dramatic Story", 2020, "D"),
        ("Semaaa", 2001, "R"),
        ("melisss", 2002, "R"),
        ("melis zeynep sema", 2003, "R"),
    ] {
        let (status, _) = send(
            &app,
            request(
                Method::POST,
                "/api/movies",
                c,
                Some(json!({ "name": name, "year": year, "rating": 5, "genre_id": genre })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let names = |body: &Value| -> Vec<String> {
        let mut names: Vec<String> = body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|m| m["name"].as_str().unwrap().to_string())
            .collect();
        names.sort();
        names
    };

    let (_, body) = send(&app, request(Method::GET, "/api/filter?search_string=Star", c, None)).await;
    assert_eq!(names(&body), ["Star Trek", "Star Wars"]);

    let (_, body) = send(&app, request(Method::GET, "/api/filter?genre=Action", c, None)).await;
    assert_eq!(names(&body), ["Star Trek", "Star Wars"]);

    let (_, body) = send(
        &app,
        request(Method::GET, "/api/filter?search_string=Star&genre=Action", c, None),
    )
    .await;
    assert_eq!(names(&body).len(), 2);

    let (status, body) = send(
        &app,
        request(Method::GET, "/api/filter?search_string=XYZ&genre=Comedy", c, None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"].as_array().unwrap().is_empty());

    let (_, body) = send(&app, request(Method::GET, "/api/filter?search_string=s&genre=RomCom", c, None)).await;
    assert_eq!(names(&body), ["Semaaa", "melis zeynep sema"]);

    let (_, body) = send(&app, request(Method::GET, "/api/filter?search_string=ynep", c, None)).await;
    assert!(names(&body).is_empty());

    let (_, body) = send(&app, request(Method::GET, "/api/filter?search_string=%20%20&genre=", c, None)).await;
    assert_eq!(names(&body).len(), 6);

    let record = &body["data"][0];
    for key in ["id", "name", "year", "rating", "genre_id", "genre_name", "slug"] {
        assert!(record.get(key).is_some(), "{key}");
    }
}

#[tokio::test]
async fn test_deleting_genre_removes_its_movies() {
    let app = spawn_app(true).await;
    let cookie = login(&app).await;
    let c = Some(cookie.as_str());

    let (status, _) = send(&app, request(Method::DELETE, "/api/genres/D", c, None)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, body) = send(&app, request(Method::GET, "/api/movies", c, None)).await;
    let movies = body["data"].as_array().unwrap();
    assert_eq!(movies.len(), 1);
    assert_eq!(movies[0]["name"], "Interstellar");
}

#[tokio::test]
async fn test_health_probes() {
    let app = spawn_app(false).await;

    let (status, body) = send(&app, request(Method::GET, "/api/system/health/live", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "alive");

    let (status, body) = send(&app, request(Method::GET, "/api/system/health/ready", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["ready"], true);
    assert_eq!(body["data"]["checks"]["database"], true);
}

#[tokio::test]
async fn test_security_headers_present() {
    let app = spawn_app(false).await;

    let response = app
        .clone()
        .oneshot(request(Method::GET, "/api/system/health/live", None, None))
        .await
        .unwrap();

    assert_eq!(response.headers()["x-content-type-options"], "nosniff");
    assert_eq!(response.headers()["x-frame-options"], "DENY");
}
