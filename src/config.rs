// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Client configuration loaded from the environment.
//!
//! | Variable | Required | Default |
//! |----------|----------|---------|
//! | `ULTRADNS_USERNAME` | yes | - |
//! | `ULTRADNS_PASSWORD` | yes | - |
//! | `ULTRADNS_WSDL_URL` | no | UltraDNS v01 WSDL |
//! | `ULTRADNS_TIMEOUT_SECS` | no | 30 |
//! | `ULTRADNS_DEBUG` | no | `false` |

use std::time::Duration;
use url::Url;

use crate::constants::{
    DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_WSDL_URL, ENV_DEBUG, ENV_PASSWORD, ENV_TIMEOUT_SECS,
    ENV_USERNAME, ENV_WSDL_URL,
};
use crate::errors::ConfigError;
use crate::types::Credentials;

/// Settings for [`DnssecZoneClient::connect`](crate::client::DnssecZoneClient::connect).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Service description URL
    pub wsdl_url: String,
    /// Account credentials
    pub credentials: Credentials,
    /// Per-request timeout
    pub timeout: Duration,
    /// Log canonicalized zone names
    pub debug: bool,
}

impl ClientConfig {
    /// Configuration for the default endpoint with the given credentials.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            wsdl_url: DEFAULT_WSDL_URL.to_string(),
            credentials: Credentials::new(username, password),
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            debug: false,
        }
    }

    /// Load configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing or a value is invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns an error if a required key is missing or a value is invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let required = |key: &'static str| {
            lookup(key)
                .filter(|value| !value.is_empty())
                .ok_or(ConfigError::Missing(key))
        };

        let username = required(ENV_USERNAME)?;
        let password = required(ENV_PASSWORD)?;

        let wsdl_url = lookup(ENV_WSDL_URL).unwrap_or_else(|| DEFAULT_WSDL_URL.to_string());
        if let Err(e) = Url::parse(&wsdl_url) {
            return Err(ConfigError::Invalid {
                key: ENV_WSDL_URL,
                value: wsdl_url,
                reason: e.to_string(),
            });
        }

        let timeout = match lookup(ENV_TIMEOUT_SECS) {
            Some(raw) => parse_timeout(&raw)?,
            None => Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        };

        let debug = match lookup(ENV_DEBUG) {
            Some(raw) => parse_flag(ENV_DEBUG, &raw)?,
            None => false,
        };

        Ok(Self {
            wsdl_url,
            credentials: Credentials::new(username, password),
            timeout,
            debug,
        })
    }
}

fn parse_timeout(raw: &str) -> Result<Duration, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::Invalid {
            key: ENV_TIMEOUT_SECS,
            value: raw.to_string(),
            reason: "expected a positive number of seconds".to_string(),
        }),
    }
}

fn parse_flag(key: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::Invalid {
            key,
            value: raw.to_string(),
            reason: "expected true/false".to_string(),
        }),
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
