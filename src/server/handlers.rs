use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::AppState;
use super::error::ApiError;
use crate::gateway::{Health, SessionMode, SwitchMode};

const CREATE_SESSION_FAILED: &str = "Failed to create session";
const SWITCH_AGENT_FAILED: &str = "Failed to switch agent";
const AGENT_CONFIG_FAILED: &str = "Failed to get agent configuration";
const MENU_DATA_FAILED: &str = "Failed to load menu data";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionParams {
    #[serde(default, deserialize_with = "lenient_string")]
    pub agent_type: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwitchAgentBody {
    #[serde(default, deserialize_with = "lenient_string")]
    pub session_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub agent_type: Option<String>,
}

/// Reads a string field, treating any non-string value as absent.
fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

/// An empty body means "all defaults"; anything else must be a JSON object.
fn parse_body<T: DeserializeOwned + Default>(body: &Bytes) -> Result<T, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(body).map_err(|e| {
        tracing::debug!(error = %e, "rejecting request body");
        ApiError::BadRequest("Invalid JSON body".to_string())
    })
}

pub async fn menu_data(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    state
        .gateway
        .get_menu_data()
        .await
        .map(Json)
        .map_err(|e| ApiError::resource(&e, MENU_DATA_FAILED))
}

pub async fn agent_config(
    State(state): State<AppState>,
    Path(agent_type): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let config = state
        .gateway
        .get_agent_config(&agent_type)
        .map_err(|e| ApiError::resource(&e, AGENT_CONFIG_FAILED))?;
    Ok(Json(config.clone()))
}

pub async fn create_session(State(state): State<AppState>, body: Bytes) -> Result<Json<Value>, ApiError> {
    let params: SessionParams = parse_body(&body)?;
    state
        .gateway
        .create_session(params.agent_type.as_deref(), SessionMode::Plain)
        .await
        .map(Json)
        .map_err(|e| ApiError::operation(e, CREATE_SESSION_FAILED))
}

/// Session creation for the browser client, which also wants the agent
/// configuration in the same response.
pub async fn create_session_with_config(
    State(state): State<AppState>,
    Query(params): Query<SessionParams>,
) -> Result<Json<Value>, ApiError> {
    state
        .gateway
        .create_session(params.agent_type.as_deref(), SessionMode::WithConfig)
        .await
        .map(Json)
        .map_err(|e| ApiError::operation(e, CREATE_SESSION_FAILED))
}

pub async fn switch_agent(State(state): State<AppState>, body: Bytes) -> Result<impl IntoResponse, ApiError> {
    let params: SwitchAgentBody = parse_body(&body)?;
    state
        .gateway
        .switch_agent(params.session_id.as_deref(), params.agent_type.as_deref(), SwitchMode::Live)
        .await
        .map(Json)
        .map_err(|e| ApiError::operation(e, SWITCH_AGENT_FAILED))
}

/// Returns the target agent's configuration for the client to apply itself.
///
/// Despite the path, this never updates the upstream session; any `sessionId`
/// in the body is ignored.
pub async fn switch_agent_config(
    State(state): State<AppState>,
    Path(agent_type): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .gateway
        .switch_agent(None, Some(&agent_type), SwitchMode::ConfigOnly)
        .await
        .map(Json)
        .map_err(|e| ApiError::operation(e, SWITCH_AGENT_FAILED))
}

pub async fn health(State(state): State<AppState>) -> Json<Health> {
    Json(state.gateway.health())
}
