#![allow(dead_code)]

use std::process::{Child, Command, Stdio};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde_json::{json, Value};

pub const ADMIN_EMAIL: &str = "admin@geomark.test";
pub const ADMIN_PASSWORD: &str = "admin-secret";

static SERVER: OnceLock<TestServer> = OnceLock::new();

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

        // Memory backend so the suite needs no database; explicit vars win over any .env
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_geomark-api"));
        cmd.env("PORT", port.to_string())
            .env("APP_ENV", "development")
            .env("STORAGE_BACKEND", "memory")
            .env("SECURITY_TRUST_IDENTITY_HEADER", "true")
            .env("ADMIN_EMAIL", ADMIN_EMAIL)
            .env("ADMIN_PASSWORD", ADMIN_PASSWORD)
            .env_remove("DATABASE_URL")
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        let child = cmd.spawn().context("failed to spawn server binary")?;

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
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

pub async fn ensure_server() -> Result<&'static TestServer> {
    let server = SERVER.get_or_init(|| TestServer::spawn().expect("failed to spawn server binary"));
    server.wait_ready(Duration::from_secs(10)).await?;
    Ok(server)
}

/// Fresh address per call; the server is shared by every test in a file.
pub fn unique_email(prefix: &str) -> String {
    format!("{}-{}@geomark.test", prefix, uuid::Uuid::new_v4().simple())
}

pub async fn register(server: &TestServer, email: &str, password: &str) -> Result<Value> {
    let res = reqwest::Client::new()
        .post(server.url("/register"))
        .json(&json!({"email": email, "password": password}))
        .send()
        .await?;
    anyhow::ensure!(res.status() == StatusCode::CREATED, "register returned {}", res.status());
    Ok(res.json().await?)
}

pub async fn create_location(server: &TestServer, email: &str, name: &str) -> Result<String> {
    let res = reqwest::Client::new()
        .post(server.url("/locations"))
        .header("X-User-Email", email)
        .json(&json!({
            "name": name,
            "category": "park",
            "coordinates": {"lat": -6.2, "lng": 106.8},
            "address": "Jakarta"
        }))
        .send()
        .await?;
    anyhow::ensure!(res.status() == StatusCode::CREATED, "create returned {}", res.status());
    let body: Value = res.json().await?;
    body["data"]["_id"]
        .as_str()
        .map(str::to_string)
        .context("created location has no _id")
}

pub async fn location_by_id(server: &TestServer, id: &str) -> Result<Option<Value>> {
    let list: Vec<Value> = reqwest::Client::new()
        .get(server.url("/locations"))
        .send()
        .await?
        .json()
        .await?;
    Ok(list.into_iter().find(|l| l["_id"] == id))
}
