//! Configuration management.
//!
//! Configuration is read from environment variables:
//! - `HOST` - Optional. Server host. Defaults to `127.0.0.1`.
//! - `PORT` - Optional. Server port. Defaults to `8001`.
//! - `FINANCIAL_AGENT_URL` - Optional. Endpoint of the remote
//!   financial-analysis agent service. The built-in mock responder is
//!   used when unset.
//! - `POLICY_AGENT_URL` - Optional. Endpoint of the remote
//!   policy-lookup agent service. The built-in mock responder is used
//!   when unset.
//! - `AGENT_TIMEOUT_SECS` - Optional. Per-request timeout for remote
//!   agent calls. Defaults to `60`.

use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host
    pub host: String,

    /// Server port
    pub port: u16,

    /// Remote financial-analysis agent endpoint (mock when unset)
    pub financial_agent_url: Option<String>,

    /// Remote policy-lookup agent endpoint (mock when unset)
    pub policy_agent_url: Option<String>,

    /// Per-request timeout for remote agent calls
    pub agent_timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "8001".to_string())
            .parse()
            .map_err(|e| ConfigError::InvalidValue("PORT".to_string(), format!("{}", e)))?;

        let agent_timeout_secs: u64 = std::env::var("AGENT_TIMEOUT_SECS")
            .unwrap_or_else(|_| "60".to_string())
            .parse()
            .map_err(|e| {
                ConfigError::InvalidValue("AGENT_TIMEOUT_SECS".to_string(), format!("{}", e))
            })?;

        Ok(Self {
            host,
            port,
            financial_agent_url: std::env::var("FINANCIAL_AGENT_URL").ok(),
            policy_agent_url: std::env::var("POLICY_AGENT_URL").ok(),
            agent_timeout: Duration::from_secs(agent_timeout_secs),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8001,
            financial_agent_url: None,
            policy_agent_url: None,
            agent_timeout: Duration::from_secs(60),
        }
    }
}
