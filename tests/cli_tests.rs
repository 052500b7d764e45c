use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn catalog_document() -> serde_json::Value {
    json!({
        "baseUrl": "http://localhost:3000/api",
        "categories": [
            {"name": "Auth", "description": "Session endpoints", "endpoints": [
                {"method": "POST", "path": "/login", "description": "Login", "requiresAuth": false,
                 "body": {"email": "admin@clinic.test", "password": "secret"}}
            ]},
            {"name": "Admin", "description": "Dashboard endpoints", "endpoints": [
                {"method": "GET", "path": "/stats", "description": "Get stats", "requiresAuth": true}
            ]}
        ]
    })
}

async fn docs_server(token: &str) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/docs/endpoints"))
        .and(header("Authorization", format!("Bearer {}", token).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(catalog_document()))
        .mount(&server)
        .await;
    server
}

fn explorer(store: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("api-docs-explorer").unwrap();
    cmd.env_remove("API_DOCS_SERVICE_ROOT")
        .env_remove("RUST_LOG")
        .arg("--store")
        .arg(store);
    cmd
}

#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("api-docs-explorer").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Searchable API documentation explorer"));
}

#[test]
fn test_missing_token_fails_before_any_request() {
    let dir = tempfile::tempdir().unwrap();
    explorer(&dir.path().join("store.json"))
        .args(["--service-root", "http://127.0.0.1:9", "--token", "null", "explore"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Authentication required"));
}

#[test]
fn test_save_and_clear_token() {
    let dir = tempfile::tempdir().unwrap();
    let store = dir.path().join("store.json");

    explorer(&store)
        .args(["save-token", "abc123"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Access token saved"));
    let saved: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&store).unwrap()).unwrap();
    assert_eq!(saved["access_token"], "abc123");

    explorer(&store)
        .arg("clear-token")
        .assert()
        .success()
        .stdout(predicate::str::contains("Access token removed"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_explore_filters_and_expands() {
    let server = docs_server("live-token-123").await;
    let dir = tempfile::tempdir().unwrap();

    explorer(&dir.path().join("store.json"))
        .args(["--service-root", server.uri().as_str(), "--token", "live-token-123"])
        .args(["explore", "--query", "stats", "--expand", "0:0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("▾ [0] Admin (1 endpoint)"))
        .stdout(predicate::str::contains("/login").not())
        .stdout(predicate::str::contains("Authorization: Bearer YOUR_TOKEN"))
        .stdout(predicate::str::contains("live-token-123").not());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_stored_token_is_used_and_command_printed() {
    let server = docs_server("stored-token").await;
    let dir = tempfile::tempdir().unwrap();
    let store = dir.path().join("store.json");
    std::fs::write(&store, r#"{"access_token": "stored-token"}"#).unwrap();

    explorer(&store)
        .args(["--service-root", server.uri().as_str()])
        .args(["command", "--category", "auth", "--path", "/login"])
        .assert()
        .success()
        .stdout(predicate::str::contains("curl -X POST \"http://localhost:3000/api/login\""))
        .stdout(predicate::str::contains("-H \"Content-Type: application/json\""));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_rejected_token_reports_unauthorized() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/docs/endpoints"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().unwrap();

    explorer(&dir.path().join("store.json"))
        .args(["--service-root", server.uri().as_str(), "--token", "expired", "explore"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Your session was rejected"));
}
