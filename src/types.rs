// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Types shared between the client and its transport.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Return the fully-qualified form of a zone name.
///
/// Appends a trailing `.` when missing and changes nothing else, so applying it
/// twice yields the same string as applying it once.
///
/// # Example
///
/// ```rust
/// use ultradnssec::types::canonicalize_zone_name;
///
/// assert_eq!(canonicalize_zone_name("example.com"), "example.com.");
/// assert_eq!(canonicalize_zone_name("example.com."), "example.com.");
/// ```
#[must_use]
pub fn canonicalize_zone_name(zone: &str) -> String {
    if zone.ends_with('.') {
        zone.to_string()
    } else {
        format!("{zone}.")
    }
}

/// A zone name in fully-qualified (dot-terminated) form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub struct ZoneName(String);

impl ZoneName {
    /// Canonicalize `zone` into a `ZoneName`.
    pub fn new(zone: impl AsRef<str>) -> Self {
        Self(canonicalize_zone_name(zone.as_ref()))
    }

    /// The dot-terminated zone name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ZoneName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ZoneName {
    fn from(zone: String) -> Self {
        Self::new(zone)
    }
}

impl From<ZoneName> for String {
    fn from(zone: ZoneName) -> Self {
        zone.0
    }
}

/// DNSSEC key role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyType {
    /// Zone-signing key
    #[serde(rename = "ZSK")]
    Zsk,
    /// Key-signing key
    #[serde(rename = "KSK")]
    Ksk,
}

impl KeyType {
    /// Wire representation sent to the remote service.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Zsk => "ZSK",
            Self::Ksk => "KSK",
        }
    }
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown key type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown DNSSEC key type '{0}' (expected ZSK or KSK)")]
pub struct ParseKeyTypeError(pub String);

impl FromStr for KeyType {
    type Err = ParseKeyTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ZSK" => Ok(Self::Zsk),
            "KSK" => Ok(Self::Ksk),
            _ => Err(ParseKeyTypeError(s.to_string())),
        }
    }
}

/// UltraDNS account credentials carried in the WS-Security `UsernameToken`.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Account username
    pub username: String,
    /// Account password
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Returns `true` when either the username or the password is empty.
    #[must_use]
    pub fn is_incomplete(&self) -> bool {
        self.username.is_empty() || self.password.is_empty()
    }
}

// Passwords must never reach logs
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// The six remote operations of the UltraDNS DNSSEC API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    QueryPendingChanges,
    GetDnssecKeyRecordList,
    GetDomainDnssecPolicies,
    GetDsRecords,
    SignZone,
    UnsignZone,
}

impl Operation {
    /// All operations, in the order they appear in the API.
    pub const ALL: [Operation; 6] = [
        Self::QueryPendingChanges,
        Self::GetDnssecKeyRecordList,
        Self::GetDomainDnssecPolicies,
        Self::GetDsRecords,
        Self::SignZone,
        Self::UnsignZone,
    ];

    /// Remote operation name, used as the SOAP body element.
    #[must_use]
    pub fn remote_name(self) -> &'static str {
        match self {
            Self::QueryPendingChanges => "queryPendingChanges",
            Self::GetDnssecKeyRecordList => "getDnssecKeyRecordList",
            Self::GetDomainDnssecPolicies => "getDomainDnssecPolicies",
            Self::GetDsRecords => "getDsRecords",
            Self::SignZone => "signZone",
            Self::UnsignZone => "unsignZone",
        }
    }

    /// Returns `true` for operations that change remote signing state.
    #[must_use]
    pub fn is_mutating(self) -> bool {
        matches!(self, Self::SignZone | Self::UnsignZone)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.remote_name())
    }
}

/// A single remote call handed to the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteCall {
    /// Operation to invoke
    pub operation: Operation,
    /// Named arguments in wire order
    pub args: Vec<(&'static str, String)>,
}

impl RemoteCall {
    pub fn new(operation: Operation) -> Self {
        Self {
            operation,
            args: Vec::new(),
        }
    }

    /// Append a named argument.
    #[must_use]
    pub fn arg(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.args.push((name, value.into()));
        self
    }

    /// Look up an argument value by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.args
            .iter()
            .find(|(arg, _)| *arg == name)
            .map(|(_, value)| value.as_str())
    }
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod types_tests;
