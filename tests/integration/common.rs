use chrono::{DateTime, Duration, TimeZone, Utc};
use gistwatcher::config::{Credentials, Settings};
use gistwatcher::run::RunContext;
use serde_json::{json, Value};
use wiremock::MockServer;

pub const TOKEN: &str = "test-token";

/// Authorization header value sent for `TOKEN`
pub const AUTHORIZATION: &str = "token test-token";

/// Creates a run context pointing both base URLs at the mock server
pub fn create_test_context(server: &MockServer) -> RunContext {
    let base = format!("{}/", server.uri());
    let settings = Settings {
        api_url: base.clone(),
        gist_url: base,
        workers: 4,
        ..Settings::default()
    };

    RunContext::new(settings, &Credentials::Token(TOKEN.to_string()))
        .expect("Failed to create run context")
}

/// Creation time of the n-th gist of an account (n = 1 is the oldest)
pub fn created_at(n: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap() + Duration::minutes(n as i64)
}

/// API representation of the n-th gist
pub fn gist_json(n: u32) -> Value {
    json!({
        "url": format!("https://api.github.com/gists/gist-{}", n),
        "id": format!("gist-{}", n),
        "html_url": format!("https://gist.github.com/gist-{}", n),
        "public": n % 2 == 0,
        "created_at": created_at(n).to_rfc3339(),
        "updated_at": created_at(n).to_rfc3339(),
        "description": format!("Gist number {}", n),
        "comments": n % 5,
        "owner": { "login": "octocat" }
    })
}

/// A listing page, newest first, covering gists `newest` down to `oldest`
pub fn page_json(newest: u32, oldest: u32) -> Value {
    Value::Array((oldest..=newest).rev().map(gist_json).collect())
}
