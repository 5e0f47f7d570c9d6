#![allow(dead_code)]

use std::collections::HashMap;
use std::path::Path;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use eventbite_core::access::hash_password;
use eventbite_server::{api::app_router, build_state, config::Config};
use serde_json::Value;
use tempfile::{tempdir, TempDir};
use tower::ServiceExt;

pub const MASTER_USER: &str = "organizer";
pub const MASTER_PASSWORD: &str = "master-pass";

pub fn test_config(dir: &Path, with_master: bool) -> Config {
    let mut vars: HashMap<&str, String> = HashMap::new();
    vars.insert(
        "EB_DB_PATH",
        dir.join("test.db").to_string_lossy().to_string(),
    );
    vars.insert("EB_LISTEN_ADDR", "127.0.0.1:0".to_string());
    if with_master {
        vars.insert("EB_MASTER_USERNAME", MASTER_USER.to_string());
        vars.insert(
            "EB_MASTER_PASSWORD_HASH",
            hash_password(MASTER_PASSWORD).unwrap(),
        );
    }
    Config::from_lookup(|key| vars.get(key).cloned()).unwrap()
}

/// Router over a fresh database. Keep the directory alive for the test.
pub async fn test_app(with_master: bool) -> (Router, TempDir) {
    let tmp = tempdir().unwrap();
    let config = test_config(tmp.path(), with_master);
    let state = build_state(&config).await.unwrap();
    (app_router(state, &config), tmp)
}

pub async fn call(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&bytes).to_string())
        })
    };
    (status, json)
}
