#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::multiple_crate_versions)]

//! Session gateway between a browser voice client and the `OpenAI` Realtime API.
//!
//! The crate holds two static agents (sales and payment), composes their
//! configuration into upstream session requests, and relays whatever the
//! upstream answers.

pub mod agents;
pub mod config;
pub mod error;
pub mod gateway;
pub mod protocol;
pub mod server;
pub mod transport;

pub use agents::{AgentConfig, AgentRegistry, AgentType, MenuItem};
pub use config::{Config, Environment};
pub use error::{Error, Result};
pub use gateway::{Gateway, Health, SessionMode, SwitchMode, SwitchOutcome};
pub use protocol::models::{
    AudioFormat, InputAudioTranscription, Modality, SessionCreateRequest, SessionUpdateRequest,
    Temperature, Tool, ToolChoice, TurnDetection,
};
pub use server::{AppState, router, serve, shutdown_signal};
pub use transport::{RealtimeRestAdapter, SessionApi};
