#![allow(dead_code)]

use std::path::PathBuf;
use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use axum::{
    body::Body,
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use base64::prelude::*;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use course_catalog_api::auth::hash_password;
use course_catalog_api::config::{SecurityConfig, StorageConfig};
use course_catalog_api::database::{NewUser, UserDirectory};
use course_catalog_api::AppState;

pub const EMAIL: &str = "joe@smith.com";
pub const PASSWORD: &str = "joepassword";

pub fn basic(identity: &str, secret: &str) -> String {
    format!("Basic {}", BASE64_STANDARD.encode(format!("{}:{}", identity, secret)))
}

/// Router wired to documents in a private temp directory
pub struct TestApp {
    pub dir: TempDir,
    pub state: AppState,
    pub router: Router,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestApp {
    pub async fn new() -> Result<Self> {
        let dir = tempfile::tempdir()?;
        let storage = StorageConfig {
            data_file: dir.path().join("data.json"),
            users_file: dir.path().join("users.json"),
            max_id: 10_000,
        };
        let security = SecurityConfig {
            enable_cors: false,
            cors_origins: vec![],
            enable_audit_logging: true,
            bcrypt_cost: 4,
        };

        let state = AppState::open(&storage, &security).await?;
        let router = course_catalog_api::app(state.clone());
        Ok(Self { dir, state, router })
    }

    /// App with `EMAIL` / `PASSWORD` already registered
    pub async fn with_user() -> Result<Self> {
        let app = Self::new().await?;
        app.add_user(EMAIL, PASSWORD).await?;
        Ok(app)
    }

    pub async fn add_user(&self, email: &str, password: &str) -> Result<()> {
        let password_hash = hash_password(password, 4).await?;
        self.state
            .users
            .create(NewUser {
                first_name: "Joe".into(),
                last_name: "Smith".into(),
                email_address: email.into(),
                password_hash,
            })
            .await?;
        Ok(())
    }

    pub fn data_file(&self) -> PathBuf {
        self.dir.path().join("data.json")
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        authorization: Option<&str>,
        body: Option<Value>,
    ) -> Result<TestResponse> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(auth) = authorization {
            builder = builder.header(header::AUTHORIZATION, auth);
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&json)?))?,
            None => builder.body(Body::empty())?,
        };

        let response = self.router.clone().oneshot(request).await?;
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into()))
        };

        Ok(TestResponse { status, headers, body })
    }

    pub async fn get(&self, uri: &str) -> Result<TestResponse> {
        self.request(Method::GET, uri, None, None).await
    }
}

/// The compiled binary running on a free port against temp documents
pub struct TestServer {
    pub base_url: String,
    pub dir: TempDir,
    child: Child,
}

impl TestServer {
    pub async fn spawn() -> Result<Self> {
        let dir = tempfile::tempdir()?;
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let child = Command::new(env!("CARGO_BIN_EXE_course-catalog-api"))
            .env("CATALOG_API_HOST", "127.0.0.1")
            .env("CATALOG_API_PORT", port.to_string())
            .env("CATALOG_DATA_FILE", dir.path().join("data.json"))
            .env("CATALOG_USERS_FILE", dir.path().join("users.json"))
            .env("SECURITY_BCRYPT_COST", "4")
            .env("APP_ENV", "development")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::inherit())
            .spawn()
            .context("failed to spawn server binary")?;

        let server = Self { base_url, dir, child };
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
            tokio::time::sleep(Duration::from_millis(100)).await;
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
