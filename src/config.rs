// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Configuration loaded from environment variables.
//!
//! `Config` drives the reference server; `ClientConfig` drives the API
//! client. Both read a `.env` file first when present.

use std::env;
use std::time::Duration;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_HEALTH_TIMEOUT_MS: u64 = 3_000;
const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;

/// Reference server configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,
    /// HS256 key for bearer tokens (raw bytes)
    pub jwt_signing_key: Vec<u8>,
    /// PayPal REST credentials; only their presence is reported
    pub paypal_client_id: Option<String>,
    pub paypal_client_secret: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            port: parse_or("PORT", DEFAULT_PORT)?,
            jwt_signing_key: env::var("JWT_SIGNING_KEY")
                .map_err(|_| ConfigError::Missing("JWT_SIGNING_KEY"))?
                .into_bytes(),
            paypal_client_id: optional("PAYPAL_CLIENT_ID"),
            paypal_client_secret: optional("PAYPAL_CLIENT_SECRET"),
        })
    }

    /// Default config for testing only.
    pub fn test_default() -> Self {
        Self {
            port: DEFAULT_PORT,
            jwt_signing_key: b"test_jwt_key_32_bytes_minimum!!".to_vec(),
            paypal_client_id: None,
            paypal_client_secret: None,
        }
    }

    pub fn paypal_configured(&self) -> bool {
        self.paypal_client_id.is_some() && self.paypal_client_secret.is_some()
    }
}

/// API client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL every endpoint is appended to, without trailing slash
    pub api_base_url: String,
    /// Sent as the bearer token when the caller has no user token
    pub public_anon_key: String,
    /// Deadline for the one-time `/health` probe
    pub health_timeout: Duration,
    /// Deadline for each API call
    pub request_timeout: Duration,
    /// Whether the simulation backend sleeps to mimic the network
    pub simulated_latency: bool,
}

impl ClientConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            api_base_url: env::var("API_BASE_URL")
                .map(|v| v.trim().trim_end_matches('/').to_string())
                .map_err(|_| ConfigError::Missing("API_BASE_URL"))?,
            public_anon_key: env::var("PUBLIC_ANON_KEY")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("PUBLIC_ANON_KEY"))?,
            health_timeout: Duration::from_millis(parse_or(
                "HEALTH_TIMEOUT_MS",
                DEFAULT_HEALTH_TIMEOUT_MS,
            )?),
            request_timeout: Duration::from_millis(parse_or(
                "REQUEST_TIMEOUT_MS",
                DEFAULT_REQUEST_TIMEOUT_MS,
            )?),
            simulated_latency: parse_or("SIMULATED_LATENCY", true)?,
        })
    }

    /// Default config for testing only: points at a closed local port and
    /// disables simulated latency.
    pub fn test_default() -> Self {
        Self {
            api_base_url: "http://127.0.0.1:9".to_string(),
            public_anon_key: "test_anon_key".to_string(),
            health_timeout: Duration::from_millis(DEFAULT_HEALTH_TIMEOUT_MS),
            request_timeout: Duration::from_millis(DEFAULT_REQUEST_TIMEOUT_MS),
            simulated_latency: false,
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }
}

fn optional(name: &'static str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_or<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid(name)),
        Err(_) => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    // Both cases share env vars, so they run in one test.
    #[test]
    fn test_config_from_env() {
        env::set_var("JWT_SIGNING_KEY", "test_jwt_key_32_bytes_minimum!!");
        env::set_var("PAYPAL_CLIENT_ID", "client");
        env::remove_var("PAYPAL_CLIENT_SECRET");
        env::set_var("API_BASE_URL", "https://api.example.test/v1/");
        env::set_var("PUBLIC_ANON_KEY", " anon ");
        env::set_var("REQUEST_TIMEOUT_MS", "2500");

        let config = Config::from_env().expect("Config should load");
        assert_eq!(config.jwt_signing_key, b"test_jwt_key_32_bytes_minimum!!");
        assert!(!config.paypal_configured());

        let client = ClientConfig::from_env().expect("ClientConfig should load");
        assert_eq!(client.api_base_url, "https://api.example.test/v1");
        assert_eq!(client.public_anon_key, "anon");
        assert_eq!(client.request_timeout, Duration::from_millis(2500));
        assert_eq!(client.health_timeout, Duration::from_millis(3000));

        env::set_var("REQUEST_TIMEOUT_MS", "soon");
        assert!(matches!(
            ClientConfig::from_env(),
            Err(ConfigError::Invalid("REQUEST_TIMEOUT_MS"))
        ));
        env::remove_var("REQUEST_TIMEOUT_MS");
    }
}
