//! Process configuration.
//!
//! Everything is environment-provided (a `.env` file is honored at startup).
//! Chunking parameters, retrieval depth, and generation temperature are
//! compile-time constants, not tunable over HTTP.

use std::path::PathBuf;

use askd_rag::RagConfig;

/// Default corpus location, relative to the working directory.
const DEFAULT_KNOWLEDGE_BASE: &str = "data/knowledge_base.json";

/// Where the HTTP server listens.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".to_string(), port: 8080 }
    }
}

impl ServerConfig {
    /// Read `ASKD_HOST` / `ASKD_PORT`, keeping defaults for unset or
    /// unparsable values.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(host) = std::env::var("ASKD_HOST") {
            config.host = host;
        }
        if let Some(port) = std::env::var("ASKD_PORT").ok().and_then(|p| p.parse().ok()) {
            config.port = port;
        }
        config
    }
}

/// Startup configuration for the query service itself.
#[derive(Clone, Debug)]
pub struct ServiceConfig {
    /// Path to the JSON knowledge base.
    pub knowledge_base: PathBuf,
    /// Chunking and retrieval parameters.
    pub rag: RagConfig,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            knowledge_base: PathBuf::from(DEFAULT_KNOWLEDGE_BASE),
            rag: RagConfig::default(),
        }
    }
}

impl ServiceConfig {
    /// Read `ASKD_KNOWLEDGE_BASE`, keeping the default path when unset.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(path) = std::env::var("ASKD_KNOWLEDGE_BASE") {
            config.knowledge_base = PathBuf::from(path);
        }
        config
    }
}
