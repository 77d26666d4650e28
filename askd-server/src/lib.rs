//! # askd-server
//!
//! The askd HTTP query service: a [`QueryService`] built once at startup
//! (load → chunk → embed → index) and an axum surface exposing `POST /ask`.
//!
//! Startup failure does not kill the process: the server comes up in a
//! degraded state and reports the failure on every request. See
//! [`service::ServiceState`].

pub mod config;
pub mod rest;
pub mod service;

pub use config::{ServerConfig, ServiceConfig};
pub use rest::{AppState, app_router, run_server};
pub use service::{Answer, AnswerError, QueryService, ServiceState};
