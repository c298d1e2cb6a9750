#![allow(dead_code)]

use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use school_api::auth::{generate_jwt, Claims};
use school_api::config::AppConfig;
use school_api::database::MemoryStore;
use school_api::{app, AppState};

pub const NORTH: i64 = 1;
pub const SOUTH: i64 = 2;
/// Tenant id that is valid in a token but absent from the registry
pub const UNKNOWN: i64 = 99;

/// Router over a fresh in-memory store with two registered tenants
pub struct TestApp {
    router: Router,
    secret: String,
}

impl TestApp {
    pub fn new() -> Self {
        let config = AppConfig::development();
        let secret = config.security.jwt_secret.clone();
        let store = Arc::new(MemoryStore::with_tenants([(NORTH, "Northside"), (SOUTH, "Riverside")]));
        let router = app(AppState::new(store, config));
        Self { router, secret }
    }

    pub fn token(&self, tenant_id: i64) -> String {
        generate_jwt(&Claims::new(tenant_id, "tester", 1), &self.secret).expect("token")
    }

    /// Send a request as `tenant` (or anonymously) and decode the JSON reply
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        tenant: Option<i64>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(tenant_id) = tenant {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", self.token(tenant_id)));
        }
        let body = match body {
            Some(value) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(serde_json::to_vec(&value).expect("serialize body"))
            }
            None => Body::empty(),
        };

        self.send(builder.body(body).expect("request")).await
    }

    /// Send a prebuilt request, for bodies that are not valid JSON
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("JSON response")
        };
        (status, value)
    }

    pub async fn get(&self, tenant: i64, uri: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, Some(tenant), None).await
    }

    pub async fn post(&self, tenant: i64, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, Some(tenant), Some(body)).await
    }

    pub async fn put(&self, tenant: i64, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::PUT, uri, Some(tenant), Some(body)).await
    }

    pub async fn delete(&self, tenant: i64, uri: &str) -> (StatusCode, Value) {
        self.request(Method::DELETE, uri, Some(tenant), None).await
    }

    /// POST and return the created record, asserting 201
    pub async fn create(&self, tenant: i64, uri: &str, body: Value) -> Value {
        let (status, body) = self.post(tenant, uri, body).await;
        assert_eq!(status, StatusCode::CREATED, "create {uri} failed: {body}");
        body["data"].clone()
    }

    pub async fn create_teacher(&self, tenant: i64, first: &str, last: &str, subject: &str) -> Value {
        self.create(
            tenant,
            "/api/teachers",
            json!({ "first_name": first, "last_name": last, "subject": subject }),
        )
        .await
    }

    pub async fn create_student(&self, tenant: i64, first: &str, last: &str, grade: i64) -> Value {
        self.create(
            tenant,
            "/api/students",
            json!({ "first_name": first, "last_name": last, "grade": grade }),
        )
        .await
    }

    pub async fn create_course(&self, tenant: i64, name: &str, teacher_id: &Value) -> Value {
        self.create(
            tenant,
            "/api/courses",
            json!({ "course_name": name, "teacher_id": teacher_id }),
        )
        .await
    }

    pub async fn create_enrollment(&self, tenant: i64, student_id: &Value, course_id: &Value, date: &str) -> Value {
        self.create(
            tenant,
            "/api/enrollments",
            json!({ "student_id": student_id, "course_id": course_id, "enrollment_date": date }),
        )
        .await
    }
}

// Spawned server, for exercising the real binary end to end

pub const SMOKE_SECRET: &str = "smoke-test-secret";
pub const SMOKE_TENANT: i64 = 1;

/// A running `school-api serve` child; killed and reaped on drop
pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    child: Child,
}

impl TestServer {
    fn spawn() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let child = Command::new(env!("CARGO_BIN_EXE_school-api"))
            .arg("serve")
            .env("APP_ENV", "development")
            .env("SCHOOL_API_HOST", "127.0.0.1")
            .env("SCHOOL_API_PORT", port.to_string())
            .env("SCHOOL_STORAGE", "memory")
            .env("SCHOOL_MEMORY_TENANTS", format!("{}:Smoke Academy", SMOKE_TENANT))
            .env("JWT_SECRET", SMOKE_SECRET)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .context("failed to spawn server binary")?;

        Ok(Self { port, base_url, child })
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
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

    pub fn token(&self, tenant_id: i64) -> String {
        generate_jwt(&Claims::new(tenant_id, "smoke", 1), SMOKE_SECRET).expect("token")
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

/// Start the binary on a free port and wait until it answers `/health`
pub async fn spawn_server() -> Result<TestServer> {
    let server = TestServer::spawn()?;
    server.wait_ready(Duration::from_secs(10)).await?;
    Ok(server)
}
