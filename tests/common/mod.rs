#![allow(dead_code)]

use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use exercise_tracker_api::config::AppConfig;
use exercise_tracker_api::database::MemoryUserStore;
use exercise_tracker_api::{app, AppState};

/// In-process router backed by a fresh in-memory store
pub struct TestApp {
    router: Router,
}

impl TestApp {
    pub fn new() -> Self {
        let mut config = AppConfig::from_env();
        config.server.index_file = concat!(env!("CARGO_MANIFEST_DIR"), "/views/index.html").to_string();
        config.server.static_dir = concat!(env!("CARGO_MANIFEST_DIR"), "/public").to_string();

        let state = AppState::new(MemoryUserStore::new());
        Self {
            router: app(state, &config),
        }
    }

    pub async fn send(&self, request: Request<Body>) -> Result<(StatusCode, Value)> {
        let response = self.router.clone().oneshot(request).await?;
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };
        Ok((status, body))
    }

    pub async fn get(&self, uri: &str) -> Result<(StatusCode, Value)> {
        let request = Request::builder().method(Method::GET).uri(uri).body(Body::empty())?;
        self.send(request).await
    }

    pub async fn post_json(&self, uri: &str, body: &Value) -> Result<(StatusCode, Value)> {
        let request = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(body)?))?;
        self.send(request).await
    }

    pub async fn post_form(&self, uri: &str, body: &str) -> Result<(StatusCode, Value)> {
        let request = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))?;
        self.send(request).await
    }

    /// Create a user and return its id
    pub async fn create_user(&self, username: &str) -> Result<String> {
        let (status, body) = self
            .post_json("/api/users", &serde_json::json!({ "username": username }))
            .await?;
        anyhow::ensure!(status == StatusCode::OK, "create user failed: {} {}", status, body);
        body["id"]
            .as_str()
            .map(String::from)
            .context("create user response missing id")
    }

    pub async fn add_exercise(&self, id: &str, exercise: &Value) -> Result<Value> {
        let (status, body) = self
            .post_json(&format!("/api/users/{}/exercises", id), exercise)
            .await?;
        anyhow::ensure!(status == StatusCode::OK, "add exercise failed: {} {}", status, body);
        Ok(body)
    }
}

/// The compiled server binary running on a free port with the memory store
pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    child: Child,
}

impl TestServer {
    pub async fn start() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let child = Command::new(env!("CARGO_BIN_EXE_exercise-tracker-api"))
            .arg("--memory")
            .arg("--host")
            .arg("127.0.0.1")
            .env("EXERCISE_API_PORT", port.to_string())
            .current_dir(env!("CARGO_MANIFEST_DIR"))
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .context("failed to spawn server binary")?;

        let server = Self { port, base_url, child };
        server.wait_ready(Duration::from_secs(10)).await?;
        Ok(server)
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            let url = format!("{}/health", self.base_url);
            if let Ok(resp) = client.get(&url).send().await {
                if resp.status() == reqwest::StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}
