pub mod rest;

pub use rest::{RealtimeRestAdapter, SessionApi};
