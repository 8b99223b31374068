//! Spawns a server on `127.0.0.1:0` backed by a temp data directory.

#![allow(dead_code)]

use lead_config::{LeadConfig, SessionMode, StoreBackend};
use lead_server::AppState;
use tokio::net::TcpListener;

pub const ADMIN_EMAIL: &str = "owner@agency.example";
pub const ADMIN_PASSWORD: &str = "correct-horse";
pub const ADMIN_TOKEN: &str = "tok-shared-secret";

pub struct TestServer {
    pub base: String,
    pub config: LeadConfig,
    pub http: reqwest::Client,
    _dir: tempfile::TempDir,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base)
    }
}

pub fn test_config(dir: &tempfile::TempDir) -> LeadConfig {
    let mut config = LeadConfig::default();
    config.store.data_dir = dir.path().join("data");
    config.admin.email = ADMIN_EMAIL.into();
    config.admin.password = ADMIN_PASSWORD.into();
    config.admin.auth_token = ADMIN_TOKEN.into();
    config
}

pub async fn spawn() -> TestServer {
    spawn_with(|_| {}).await
}

pub async fn spawn_signed() -> TestServer {
    spawn_with(|config| config.admin.session_mode = SessionMode::Signed).await
}

pub async fn spawn_libsql() -> TestServer {
    spawn_with(|config| config.store.backend = StoreBackend::Libsql).await
}

pub async fn spawn_with(customize: impl FnOnce(&mut LeadConfig)) -> TestServer {
    let dir = tempfile::tempdir().unwrap();
    let mut config = test_config(&dir);
    customize(&mut config);

    let state = AppState::open(config.clone()).await.unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum_serve(listener, state).await;
    });

    let http = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap();

    TestServer {
        base: format!("http://{addr}"),
        config,
        http,
        _dir: dir,
    }
}

async fn axum_serve(listener: TcpListener, state: lead_server::SharedState) {
    lead_server::serve(listener, state).await.unwrap();
}

/// Log in and return the `name=value` cookie pair to send back.
pub async fn login_cookie(server: &TestServer) -> String {
    let resp = server
        .http
        .post(server.url("/api/admin/login"))
        .json(&serde_json::json!({"email": ADMIN_EMAIL, "password": ADMIN_PASSWORD}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let set_cookie = resp
        .headers()
        .get(reqwest::header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    set_cookie.split(';').next().unwrap().to_string()
}
