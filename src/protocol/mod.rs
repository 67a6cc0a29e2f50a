//! Wire types for the upstream Realtime session REST API.

pub mod models;
