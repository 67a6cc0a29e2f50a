//! Static agent definitions and the registry that hands them out.
//!
//! Agents never hand off to each other on the server: the payment agent
//! exposes a `transfer_to_menu_agent` tool that the remote model calls and the
//! browser acts on. The registry is built once and only ever read.

pub mod menu;
pub mod payment;
pub mod sales;

use serde::{Deserialize, Serialize};

use crate::protocol::models::{SessionCreateRequest, SessionUpdateRequest, Temperature, Tool, ToolChoice};
use crate::{Error, Result};

pub use menu::MenuItem;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum AgentType {
    #[default]
    Sales,
    Payment,
}

impl AgentType {
    pub const ALL: [Self; 2] = [Self::Sales, Self::Payment];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sales => "sales",
            Self::Payment => "payment",
        }
    }

    /// Strict lookup: only the exact lowercase keys are recognised.
    #[must_use]
    pub fn parse(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|agent| agent.as_str() == key)
    }

    /// Lenient lookup for the session-creation endpoints: a missing or
    /// unrecognised key falls back to [`AgentType::Sales`].
    #[must_use]
    pub fn resolve_or_default(key: Option<&str>) -> Self {
        key.and_then(Self::parse).unwrap_or_default()
    }
}

impl std::str::FromStr for AgentType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s).ok_or_else(|| Error::InvalidAgentType(s.to_string()))
    }
}

impl std::fmt::Display for AgentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the remote model needs to act as one agent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AgentConfig {
    #[serde(rename = "type")]
    pub agent_type: AgentType,
    pub instructions: String,
    pub tools: Vec<Tool>,
    pub tool_choice: ToolChoice,
    pub temperature: Temperature,
}

impl AgentConfig {
    #[must_use]
    pub fn tool(&self, name: &str) -> Option<&Tool> {
        self.tools.iter().find(|tool| tool.name() == name)
    }

    #[must_use]
    pub fn session_create_request(&self) -> SessionCreateRequest<'_> {
        SessionCreateRequest::new(&self.instructions, &self.tools, &self.tool_choice, self.temperature)
    }

    #[must_use]
    pub fn session_update_request(&self) -> SessionUpdateRequest<'_> {
        SessionUpdateRequest {
            instructions: &self.instructions,
            tools: &self.tools,
            tool_choice: &self.tool_choice,
            temperature: self.temperature,
        }
    }
}

/// Immutable `AgentType -> AgentConfig` table. Total over [`AgentType`].
#[derive(Debug, Clone)]
pub struct AgentRegistry {
    sales: AgentConfig,
    payment: AgentConfig,
}

impl AgentRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self {
            sales: sales::config(),
            payment: payment::config(),
        }
    }

    #[must_use]
    pub const fn get_config(&self, agent_type: AgentType) -> &AgentConfig {
        match agent_type {
            AgentType::Sales => &self.sales,
            AgentType::Payment => &self.payment,
        }
    }

    /// # Errors
    /// Returns [`Error::InvalidAgentType`] for anything but a known key.
    pub fn lookup(&self, key: &str) -> Result<&AgentConfig> {
        Ok(self.get_config(key.parse()?))
    }
}

impl Default for AgentRegistry {
    fn default() -> Self {
        Self::new()
    }
}
