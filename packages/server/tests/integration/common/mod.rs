use std::net::SocketAddr;
use std::path::PathBuf;

use ::common::ChallengeService;
use ::common::config::{GameConfig, StoreBackend, StoreConfig};
use ::common::storage::open_store;
use reqwest::Client;
use serde_json::Value;
use tempfile::TempDir;

use server::config::{AppConfig, CorsConfig, ServerConfig};
use server::state::AppState;

pub mod routes {
    pub const PROVIDERS: &str = "/api/v1/providers";
    pub const DEPLOYMENTS: &str = "/api/v1/deployments";
    pub const CHALLENGES: &str = "/api/v1/challenges";
    pub const SPIN_PROVIDER: &str = "/api/v1/spin/provider";
    pub const SPIN_DEPLOYMENT: &str = "/api/v1/spin/deployment";
    pub const TRACKER: &str = "/api/v1/tracker";
    pub const EXPORT: &str = "/api/v1/data/export";
    pub const IMPORT: &str = "/api/v1/data/import";
    pub const OPENAPI: &str = "/api-docs/openapi.json";

    pub fn challenge(id: &str) -> String {
        format!("/api/v1/challenges/{id}")
    }

    pub fn challenge_toggle(id: &str) -> String {
        format!("/api/v1/challenges/{id}/toggle")
    }

    pub fn tracker_mode(mode: &str) -> String {
        format!("/api/v1/tracker?mode={mode}")
    }
}

/// A running test server backed by a fresh local document store.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    pub store_path: PathBuf,
    _dir: TempDir,
}

/// Parsed HTTP response for test assertions.
pub struct TestResponse {
    pub status: u16,
    /// Raw response body as text.
    pub text: String,
    /// Parsed JSON body, or `Null` if the response is not valid JSON.
    pub body: Value,
    /// `Content-Disposition` header, if present.
    pub disposition: Option<String>,
}

impl TestResponse {
    async fn from_response(res: reqwest::Response) -> Self {
        let status = res.status().as_u16();
        let disposition = res
            .headers()
            .get(reqwest::header::CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let text = res.text().await.expect("Failed to read response body");
        let body = serde_json::from_str(&text).unwrap_or(Value::Null);
        Self {
            status,
            text,
            body,
            disposition,
        }
    }

    /// The `id` field of the body.
    pub fn id(&self) -> String {
        self.body["id"]
            .as_str()
            .unwrap_or_else(|| panic!("Response has no string id: {}", self.text))
            .to_string()
    }
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with_game(GameConfig::default()).await
    }

    pub async fn spawn_with_game(game: GameConfig) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let store_path = dir.path().join("cloud-roulette.json");

        let app_config = AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                cors: CorsConfig {
                    allow_origins: vec![],
                    max_age: 3600,
                },
            },
            store: StoreConfig {
                backend: StoreBackend::Local,
                path: store_path.clone(),
                ..StoreConfig::default()
            },
            game,
        };

        let store = open_store(&app_config.store)
            .await
            .expect("Failed to open local store");
        let state = AppState {
            service: ChallengeService::new(store),
            config: app_config,
        };

        let app = server::build_router(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            addr,
            client: Client::new(),
            store_path,
            _dir: dir,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn get(&self, path: &str) -> TestResponse {
        let res = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to send GET request");

        TestResponse::from_response(res).await
    }

    pub async fn post(&self, path: &str, body: &Value) -> TestResponse {
        let res = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("Failed to send POST request");

        TestResponse::from_response(res).await
    }

    pub async fn post_empty(&self, path: &str) -> TestResponse {
        let res = self
            .client
            .post(self.url(path))
            .send()
            .await
            .expect("Failed to send POST request");

        TestResponse::from_response(res).await
    }

    pub async fn post_raw(&self, path: &str, body: &str) -> TestResponse {
        let res = self
            .client
            .post(self.url(path))
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body.to_string())
            .send()
            .await
            .expect("Failed to send POST request");

        TestResponse::from_response(res).await
    }

    pub async fn patch(&self, path: &str, body: &Value) -> TestResponse {
        let res = self
            .client
            .patch(self.url(path))
            .json(body)
            .send()
            .await
            .expect("Failed to send PATCH request");

        TestResponse::from_response(res).await
    }

    /// Start a challenge and return its id.
    pub async fn create_challenge(&self, provider_id: &str, deployment_id: &str) -> String {
        let body = serde_json::json!({
            "provider_id": provider_id,
            "deployment_id": deployment_id,
        });
        let res = self.post(routes::CHALLENGES, &body).await;
        assert_eq!(res.status, 201, "create_challenge failed: {}", res.text);
        res.id()
    }
}
