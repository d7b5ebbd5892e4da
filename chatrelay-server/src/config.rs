// Copyright 2025 Sushanth (https://github.com/sushanthpy)
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Chatrelay Server Configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub server: HttpServerConfig,
    #[serde(default)]
    pub llm: LlmConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HttpServerConfig {
    /// HTTP API listen address (e.g., "127.0.0.1:8080")
    #[serde(default = "default_http_addr")]
    pub listen_addr: String,

    /// Enable CORS
    #[serde(default = "default_enable_cors")]
    pub enable_cors: bool,

    /// Directory the static frontend is served from
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LlmConfig {
    /// Gemini API key. When unset, requests go out with an empty
    /// credential and the remote API rejects them.
    pub api_key: Option<String>,

    /// Base URL of the generative-language API
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Upstream request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

// Default values
fn default_http_addr() -> String {
    "127.0.0.1:8080".to_string()
}

fn default_enable_cors() -> bool {
    true
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("./frontend")
}

fn default_api_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_request_timeout() -> u64 {
    60
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_http_addr(),
            enable_cors: default_enable_cors(),
            static_dir: default_static_dir(),
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base_url: default_api_base_url(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration from environment variables
    ///
    /// Supported environment variables:
    /// - CHATRELAY_HTTP_ADDR: HTTP listen address (default: 127.0.0.1:8080)
    /// - CHATRELAY_ENABLE_CORS: Enable CORS (default: true)
    /// - CHATRELAY_STATIC_DIR: Static frontend directory (default: ./frontend)
    /// - CHATRELAY_API_BASE_URL: Generative-language API base URL
    /// - CHATRELAY_REQUEST_TIMEOUT: Upstream timeout in seconds (default: 60)
    /// - GEMINI_API_KEY: Gemini API key
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(addr) = std::env::var("CHATRELAY_HTTP_ADDR") {
            config.server.listen_addr = addr;
        }

        if let Ok(cors) = std::env::var("CHATRELAY_ENABLE_CORS") {
            config.server.enable_cors = cors.parse().unwrap_or(true);
        }

        if let Ok(dir) = std::env::var("CHATRELAY_STATIC_DIR") {
            config.server.static_dir = PathBuf::from(dir);
        }

        if let Ok(url) = std::env::var("CHATRELAY_API_BASE_URL") {
            config.llm.api_base_url = url;
        }

        if let Ok(timeout) = std::env::var("CHATRELAY_REQUEST_TIMEOUT") {
            if let Ok(val) = timeout.parse() {
                config.llm.request_timeout_secs = val;
            }
        }

        if let Ok(key) = std::env::var("GEMINI_API_KEY") {
            config.llm.api_key = Some(key);
        }

        config
    }

    /// Load configuration with priority: env > file > defaults
    pub fn load(config_file: Option<PathBuf>) -> Result<Self> {
        let config = if let Some(path) = config_file {
            if path.exists() {
                tracing::info!("Loading configuration from file: {:?}", path);
                Self::from_file(&path)?
            } else {
                tracing::warn!("Config file not found: {:?}, using defaults", path);
                Self::default()
            }
        } else {
            Self::default()
        };

        Ok(Self::merge_with_env(config))
    }

    /// Merge config with environment variables (env takes priority)
    fn merge_with_env(mut config: Self) -> Self {
        let env_config = Self::from_env();

        // Only override if env var was explicitly set
        if std::env::var("CHATRELAY_HTTP_ADDR").is_ok() {
            config.server.listen_addr = env_config.server.listen_addr;
        }
        if std::env::var("CHATRELAY_ENABLE_CORS").is_ok() {
            config.server.enable_cors = env_config.server.enable_cors;
        }
        if std::env::var("CHATRELAY_STATIC_DIR").is_ok() {
            config.server.static_dir = env_config.server.static_dir;
        }
        if std::env::var("CHATRELAY_API_BASE_URL").is_ok() {
            config.llm.api_base_url = env_config.llm.api_base_url;
        }
        if std::env::var("CHATRELAY_REQUEST_TIMEOUT").is_ok() {
            config.llm.request_timeout_secs = env_config.llm.request_timeout_secs;
        }
        if std::env::var("GEMINI_API_KEY").is_ok() {
            config.llm.api_key = env_config.llm.api_key;
        }

        config
    }

    /// Parse listen address as SocketAddr
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        Ok(self.server.listen_addr.parse()?)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.socket_addr()?;

        if self.llm.api_base_url.is_empty() {
            anyhow::bail!("llm.api_base_url must not be empty");
        }

        Ok(())
    }
}
