use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use rt_agent_gateway::{
    AppState, Config, Error, Result, SessionApi, SessionCreateRequest, SessionUpdateRequest, router,
};
use serde_json::{Value, json};
use tower::ServiceExt;

/// Stand-in for the upstream API that records what it was asked to do.
struct StubApi {
    reply: std::result::Result<Value, u16>,
    creates: AtomicUsize,
    updates: AtomicUsize,
    last_body: Mutex<Option<Value>>,
    last_session_id: Mutex<Option<String>>,
}

impl StubApi {
    fn ok(reply: Value) -> Arc<Self> {
        Arc::new(Self::with_reply(Ok(reply)))
    }

    fn failing(status: u16) -> Arc<Self> {
        Arc::new(Self::with_reply(Err(status)))
    }

    fn with_reply(reply: std::result::Result<Value, u16>) -> Self {
        Self {
            reply,
            creates: AtomicUsize::new(0),
            updates: AtomicUsize::new(0),
            last_body: Mutex::new(None),
            last_session_id: Mutex::new(None),
        }
    }

    fn calls(&self) -> usize {
        self.creates.load(Ordering::SeqCst) + self.updates.load(Ordering::SeqCst)
    }

    fn last_body(&self) -> Value {
        self.last_body.lock().unwrap().clone().expect("no upstream call recorded")
    }

    fn answer(&self) -> Result<Value> {
        match &self.reply {
            Ok(value) => Ok(value.clone()),
            Err(status) => Err(Error::Upstream {
                status: reqwest::StatusCode::from_u16(*status).unwrap(),
                body: r#"{"error":{"message":"Incorrect API key provided"}}"#.to_string(),
            }),
        }
    }
}

#[async_trait]
impl SessionApi for StubApi {
    async fn create_session(&self, request: &SessionCreateRequest<'_>) -> Result<Value> {
        self.creates.fetch_add(1, Ordering::SeqCst);
        *self.last_body.lock().unwrap() = Some(serde_json::to_value(request).unwrap());
        self.answer()
    }

    async fn update_session(&self, session_id: &str, request: &SessionUpdateRequest<'_>) -> Result<Value> {
        self.updates.fetch_add(1, Ordering::SeqCst);
        *self.last_body.lock().unwrap() = Some(serde_json::to_value(request).unwrap());
        *self.last_session_id.lock().unwrap() = Some(session_id.to_string());
        self.answer()
    }
}

fn session_reply() -> Value {
    json!({
        "id": "sess_001",
        "object": "realtime.session",
        "client_secret": { "value": "ek_abc", "expires_at": 1_700_000_000 }
    })
}

fn app_with(api: Arc<StubApi>, config: &Config) -> Router {
    router(AppState::with_api(config, api), config)
}

fn app(api: Arc<StubApi>) -> Router {
    app_with(api, &Config::default().with_api_key("sk-test"))
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

async fn send_raw(app: Router, req: Request<Body>) -> (StatusCode, Vec<u8>) {
    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    (status, bytes.to_vec())
}

async fn send(app: Router, req: Request<Body>) -> (StatusCode, Value) {
    let (status, bytes) = send_raw(app, req).await;
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

fn write_file(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn health_reports_missing_credential() {
    let api = StubApi::ok(session_reply());
    let (status, body) = send(app_with(api.clone(), &Config::default()), get("/api/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["openai_configured"], false);
    assert!(body["timestamp"].as_str().unwrap().ends_with('Z'));
    assert_eq!(api.calls(), 0);
}

#[tokio::test]
async fn health_reports_configured_credential() {
    let (_, body) = send(app(StubApi::ok(session_reply())), get("/api/health")).await;
    assert_eq!(body["openai_configured"], true);
}

// =============================================================================
// Agent configuration
// =============================================================================

#[tokio::test]
async fn agent_route_returns_requested_type() {
    for key in ["sales", "payment"] {
        let (status, body) = send(app(StubApi::ok(session_reply())), get(&format!("/api/agent/{key}"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["type"], key);
        assert_eq!(body["tool_choice"], "auto");
        assert_eq!(body["temperature"], json!(0.8));
    }
}

#[tokio::test]
async fn agent_route_rejects_unknown_type_without_upstream_call() {
    let api = StubApi::ok(session_reply());
    let (status, body) = send(app(api.clone()), get("/api/agent/kitchen")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Invalid agent type" }));
    assert_eq!(api.calls(), 0);
}

#[tokio::test]
async fn agent_config_is_byte_identical_across_calls() {
    let app = app(StubApi::ok(session_reply()));
    let (_, first) = send_raw(app.clone(), get("/api/agent/sales")).await;
    let (_, second) = send_raw(app, get("/api/agent/sales")).await;
    assert!(!first.is_empty());
    assert_eq!(first, second);
}

// =============================================================================
// Session creation
// =============================================================================

#[tokio::test]
async fn create_session_relays_upstream_body() {
    let api = StubApi::ok(session_reply());
    let (status, body) = send(app(api.clone()), post_json("/api/session", &json!({ "agentType": "payment" }))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, session_reply());
    assert_eq!(api.creates.load(Ordering::SeqCst), 1);

    let sent = api.last_body();
    assert!(sent["instructions"].as_str().unwrap().starts_with("You are Karol"));
    assert_eq!(sent["tools"][1]["name"], "transfer_to_menu_agent");
    assert_eq!(sent["max_response_output_tokens"], 4096);
}

#[tokio::test]
async fn create_session_defaults_to_sales() {
    for body in [json!({}), json!({ "agentType": "kitchen" })] {
        let api = StubApi::ok(session_reply());
        let (status, _) = send(app(api.clone()), post_json("/api/session", &body)).await;
        assert_eq!(status, StatusCode::OK);
        assert!(api.last_body()["instructions"].as_str().unwrap().starts_with("You are Luxora"));
    }
}

#[tokio::test]
async fn create_session_accepts_empty_body() {
    let api = StubApi::ok(session_reply());
    let req = Request::builder().method("POST").uri("/api/session").body(Body::empty()).unwrap();
    let (status, _) = send(app(api.clone()), req).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(api.last_body()["tools"][0]["name"], "focus_menu_item");
}

#[tokio::test]
async fn create_session_rejects_malformed_json() {
    let api = StubApi::ok(session_reply());
    let req = Request::builder()
        .method("POST")
        .uri("/api/session")
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from("{agentType:"))
        .unwrap();
    let (status, body) = send(app(api.clone()), req).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Invalid JSON body" }));
    assert_eq!(api.calls(), 0);
}

#[tokio::test]
async fn create_session_treats_non_string_agent_type_as_absent() {
    for agent_type in [json!(42), json!(null), json!(["payment"]), json!({ "type": "payment" })] {
        let api = StubApi::ok(session_reply());
        let (status, body) =
            send(app(api.clone()), post_json("/api/session", &json!({ "agentType": agent_type }))).await;

        assert_eq!(status, StatusCode::OK, "agentType {agent_type}");
        assert_eq!(body["id"], "sess_001");
        assert!(api.last_body()["instructions"].as_str().unwrap().starts_with("You are Luxora"));
        assert_eq!(api.calls(), 1);
    }
}

#[tokio::test]
async fn upstream_unauthorized_becomes_local_500_with_status_in_details() {
    let api = StubApi::failing(401);
    let (status, body) = send(app(api.clone()), post_json("/api/session", &json!({ "agentType": "payment" }))).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to create session");
    assert!(body["details"].as_str().unwrap().contains("401"));
    assert_eq!(api.calls(), 1, "upstream failures are not retried");
}

#[tokio::test]
async fn session_with_config_merges_agent_config() {
    let api = StubApi::ok(session_reply());
    let (status, body) = send(app(api), get("/session?agentType=payment")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], "sess_001");
    assert_eq!(body["client_secret"]["value"], "ek_abc");
    assert_eq!(body["agent_config"]["type"], "payment");
    assert_eq!(body["agent_config"]["tools"][0]["name"], "update_order_data");
}

#[tokio::test]
async fn session_with_config_defaults_to_sales() {
    for uri in ["/session", "/session?agentType=bogus"] {
        let (status, body) = send(app(StubApi::ok(session_reply())), get(uri)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["agent_config"]["type"], "sales");
    }
}

#[tokio::test]
async fn session_with_config_surfaces_upstream_failure() {
    let (status, body) = send(app(StubApi::failing(503)), get("/session")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["details"], "OpenAI API Error: 503");
    assert!(body.get("agent_config").is_none());
}

// =============================================================================
// Agent switching
// =============================================================================

#[tokio::test]
async fn switch_agent_patches_live_session() {
    let api = StubApi::ok(json!({ "id": "sess_001", "object": "realtime.session" }));
    let (status, body) = send(
        app(api.clone()),
        post_json("/api/switch-agent", &json!({ "sessionId": "sess_001", "agentType": "payment" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["agent"], "payment");
    assert_eq!(body["data"]["id"], "sess_001");
    assert_eq!(api.updates.load(Ordering::SeqCst), 1);
    assert_eq!(api.last_session_id.lock().unwrap().as_deref(), Some("sess_001"));

    let sent = api.last_body();
    assert_eq!(sent.as_object().unwrap().len(), 4);
    assert!(sent.get("model").is_none());
}

#[tokio::test]
async fn switch_agent_rejects_unknown_type_without_upstream_call() {
    for body in [json!({ "sessionId": "sess_001", "agentType": "kitchen" }), json!({ "sessionId": "sess_001" })] {
        let api = StubApi::ok(session_reply());
        let (status, reply) = send(app(api.clone()), post_json("/api/switch-agent", &body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(reply["error"], "Invalid agent type");
        assert_eq!(api.calls(), 0);
    }
}

#[tokio::test]
async fn switch_agent_rejects_non_string_agent_type() {
    let api = StubApi::ok(session_reply());
    let (status, body) = send(
        app(api.clone()),
        post_json("/api/switch-agent", &json!({ "sessionId": "sess_001", "agentType": 7 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid agent type");
    assert_eq!(api.calls(), 0);
}

#[tokio::test]
async fn switch_agent_requires_session_id() {
    let api = StubApi::ok(session_reply());
    let (status, body) = send(app(api.clone()), post_json("/api/switch-agent", &json!({ "agentType": "sales" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "sessionId is required");
    assert_eq!(api.calls(), 0);
}

#[tokio::test]
async fn switch_agent_surfaces_upstream_failure() {
    let api = StubApi::failing(404);
    let (status, body) = send(
        app(api),
        post_json("/api/switch-agent", &json!({ "sessionId": "gone", "agentType": "sales" })),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to switch agent");
    assert!(body["details"].as_str().unwrap().contains("404"));
}

#[tokio::test]
async fn switch_agent_by_path_never_calls_upstream() {
    let api = StubApi::ok(session_reply());
    let (status, body) = send(
        app(api.clone()),
        post_json("/api/switch-agent/payment", &json!({ "sessionId": "sess_001" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["agent_type"], "payment");
    let config = body["config"].as_object().unwrap();
    assert_eq!(config.len(), 3);
    assert!(config["instructions"].as_str().unwrap().starts_with("You are Karol"));
    assert_eq!(config["tool_choice"], "auto");
    assert_eq!(api.calls(), 0);
}

#[tokio::test]
async fn switch_agent_by_path_rejects_unknown_type() {
    let api = StubApi::ok(session_reply());
    let (status, body) = send(app(api.clone()), post_json("/api/switch-agent/kitchen", &json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid agent type");
    assert_eq!(api.calls(), 0);
}

// =============================================================================
// Menu data and static files
// =============================================================================

#[tokio::test]
async fn menu_data_is_returned_unmodified() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = json!({
        "menu_items": [
            { "name": "Fries", "price": 3.19, "description": "Small/Medium/Large" },
            { "name": "Secret Item", "extra": [1, 2, 3] }
        ],
        "currency": "USD"
    });
    let path = write_file(dir.path(), "menu-data.json", &catalog.to_string());
    let config = Config::default().with_menu_data_path(path);

    let (status, body) = send(app_with(StubApi::ok(session_reply()), &config), get("/api/menu-data")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, catalog);
}

#[tokio::test]
async fn menu_data_missing_file_is_server_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::default().with_menu_data_path(dir.path().join("absent.json"));

    let (status, body) = send(app_with(StubApi::ok(session_reply()), &config), get("/api/menu-data")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Failed to load menu data" }));
}

#[tokio::test]
async fn menu_data_malformed_file_is_server_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "menu-data.json", "{ not json");
    let config = Config::default().with_menu_data_path(path);

    let (status, body) = send(app_with(StubApi::ok(session_reply()), &config), get("/api/menu-data")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to load menu data");
}

#[tokio::test]
async fn root_serves_index_document() {
    let dir = tempfile::tempdir().unwrap();
    write_file(dir.path(), "index.html", "<!doctype html><title>voice</title>");
    let config = Config::default().with_static_dir(dir.path());

    let (status, body) = send_raw(app_with(StubApi::ok(session_reply()), &config), get("/")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(String::from_utf8(body).unwrap(), "<!doctype html><title>voice</title>");
}

#[tokio::test]
async fn resources_are_served_from_static_dir() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("resources")).unwrap();
    write_file(&dir.path().join("resources"), "fries.txt", "crispy");
    let config = Config::default().with_static_dir(dir.path());

    let (status, body) = send_raw(app_with(StubApi::ok(session_reply()), &config), get("/resources/fries.txt")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"crispy");

    let (status, _) = send_raw(app_with(StubApi::ok(session_reply()), &config), get("/resources/missing.png")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
