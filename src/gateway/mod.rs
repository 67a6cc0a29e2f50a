//! The session gateway: look up an agent, forward one request, relay the answer.
//!
//! Each operation issues at most one upstream call and holds no state between
//! calls. Upstream bodies are passed through as opaque JSON.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serde_json::{Value, json};

use crate::agents::{AgentConfig, AgentRegistry, AgentType};
use crate::protocol::models::{Tool, ToolChoice};
use crate::transport::SessionApi;
use crate::{Error, Result};

/// What a session-creation call hands back.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionMode {
    /// The upstream session object as-is.
    Plain,
    /// The upstream session object with the agent's configuration merged in
    /// under `agent_config`.
    WithConfig,
}

/// How an agent switch is carried out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwitchMode {
    /// Patch the live upstream session with the new agent's behaviour.
    Live,
    /// Only return the new agent's configuration; the caller applies it over
    /// its own realtime connection. The upstream session is not touched.
    ConfigOnly,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum SwitchOutcome {
    Live {
        success: bool,
        agent: AgentType,
        data: Value,
    },
    ConfigOnly {
        success: bool,
        agent_type: AgentType,
        config: SwitchConfig,
    },
}

/// The subset of an agent's configuration a client re-applies on switch.
#[derive(Debug, Serialize)]
pub struct SwitchConfig {
    pub instructions: String,
    pub tools: Vec<Tool>,
    pub tool_choice: ToolChoice,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct Health {
    pub status: &'static str,
    pub timestamp: String,
    pub openai_configured: bool,
}

#[derive(Clone)]
pub struct Gateway {
    registry: Arc<AgentRegistry>,
    api: Arc<dyn SessionApi>,
    menu_data_path: PathBuf,
    openai_configured: bool,
}

impl Gateway {
    #[must_use]
    pub fn new(
        registry: Arc<AgentRegistry>,
        api: Arc<dyn SessionApi>,
        menu_data_path: impl Into<PathBuf>,
        openai_configured: bool,
    ) -> Self {
        Self {
            registry,
            api,
            menu_data_path: menu_data_path.into(),
            openai_configured,
        }
    }

    /// Creates an upstream session for `agent_type`, falling back to the sales
    /// agent when the key is missing or unknown.
    ///
    /// # Errors
    /// Returns the upstream or transport error unchanged; nothing is retried.
    pub async fn create_session(&self, agent_type: Option<&str>, mode: SessionMode) -> Result<Value> {
        let agent = AgentType::resolve_or_default(agent_type);
        if agent_type.is_some_and(|key| AgentType::parse(key).is_none()) {
            tracing::debug!(requested = ?agent_type, "unknown agent type, using sales");
        }
        let config = self.registry.get_config(agent);

        let session = self.api.create_session(&config.session_create_request()).await?;
        tracing::info!(%agent, "realtime session created");

        match mode {
            SessionMode::Plain => Ok(session),
            SessionMode::WithConfig => with_agent_config(session, config),
        }
    }

    /// Switches to `agent_type`, which must be a known key.
    ///
    /// # Errors
    /// Returns [`Error::InvalidAgentType`] before any upstream call for unknown
    /// keys, [`Error::InvalidRequest`] for a live switch without a session id, and
    /// otherwise the upstream or transport error.
    pub async fn switch_agent(
        &self,
        session_id: Option<&str>,
        agent_type: Option<&str>,
        mode: SwitchMode,
    ) -> Result<SwitchOutcome> {
        let config = self.registry.lookup(agent_type.unwrap_or_default())?;
        let agent = config.agent_type;

        match mode {
            SwitchMode::ConfigOnly => Ok(SwitchOutcome::ConfigOnly {
                success: true,
                agent_type: agent,
                config: SwitchConfig {
                    instructions: config.instructions.clone(),
                    tools: config.tools.clone(),
                    tool_choice: config.tool_choice,
                },
            }),
            SwitchMode::Live => {
                let session_id = session_id
                    .filter(|id| !id.is_empty())
                    .ok_or_else(|| Error::InvalidRequest("sessionId is required".to_string()))?;
                let data = self
                    .api
                    .update_session(session_id, &config.session_update_request())
                    .await?;
                tracing::info!(%agent, session_id, "realtime session switched");
                Ok(SwitchOutcome::Live {
                    success: true,
                    agent,
                    data,
                })
            }
        }
    }

    /// # Errors
    /// Returns [`Error::InvalidAgentType`] for anything but a known key.
    pub fn get_agent_config(&self, agent_type: &str) -> Result<&AgentConfig> {
        self.registry.lookup(agent_type)
    }

    /// Reads the catalog document and returns it without checking its shape.
    ///
    /// # Errors
    /// Returns [`Error::MenuData`] if the file cannot be read or is not JSON.
    pub async fn get_menu_data(&self) -> Result<Value> {
        let path = self.menu_data_path.display().to_string();
        let raw = tokio::fs::read_to_string(&self.menu_data_path)
            .await
            .map_err(|e| Error::MenuData { path: path.clone(), reason: e.to_string() })?;
        serde_json::from_str(&raw).map_err(|e| Error::MenuData { path, reason: e.to_string() })
    }

    #[must_use]
    pub fn health(&self) -> Health {
        Health {
            status: "healthy",
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            openai_configured: self.openai_configured,
        }
    }
}

fn with_agent_config(session: Value, config: &AgentConfig) -> Result<Value> {
    let agent_config = serde_json::to_value(config)?;
    match session {
        Value::Object(mut fields) => {
            fields.insert("agent_config".to_string(), agent_config);
            Ok(Value::Object(fields))
        }
        // Non-object bodies cannot carry extra fields; wrap rather than drop them.
        other => Ok(json!({ "session": other, "agent_config": agent_config })),
    }
}
