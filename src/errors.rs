// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Error types for the UltraDNS DNSSEC client.
//!
//! This module provides specialized error types for:
//! - Session establishment against the UltraDNS WSDL endpoint
//! - Faults reported by the remote service for an individual call
//! - Transport failures (connectivity, timeouts, malformed responses)
//! - Configuration loading
//!
//! Remote faults and transport failures are kept apart: a fault proves the
//! request reached UltraDNS and was refused, while a transport failure means the
//! request may never have arrived at all.

use thiserror::Error;

use crate::types::Operation;

/// A fault reported by the remote service.
///
/// Carries the `errorCode` and `errorDescription` from the fault detail
/// (`UltraWSException`), or the SOAP `faultcode` and `faultstring` when the
/// detail is absent.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("<{code}>: {description}")]
pub struct RemoteFault {
    /// Remote-supplied error code (e.g., "1801")
    pub code: String,
    /// Human-readable description of the fault
    pub description: String,
}

impl RemoteFault {
    /// Create a fault from a code and a description.
    pub fn new(code: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            description: description.into(),
        }
    }
}

/// Errors raised by a [`SoapTransport`](crate::soap::SoapTransport) below the SOAP fault layer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// Connection to the endpoint could not be established
    #[error("Connection to {endpoint} failed: {reason}")]
    Unreachable {
        /// The URL that could not be reached
        endpoint: String,
        /// Reason for the connection failure
        reason: String,
    },

    /// The connection broke after the request may have been written
    #[error("Request to {endpoint} was interrupted: {reason}")]
    Interrupted {
        /// The URL the request was sent to
        endpoint: String,
        /// Reason for the interruption
        reason: String,
    },

    /// Request exceeded the configured timeout
    #[error("Request to {endpoint} timed out")]
    Timeout {
        /// The URL that timed out
        endpoint: String,
    },

    /// The endpoint refused the credentials (HTTP 401/403, or empty credentials)
    #[error("Endpoint {endpoint} rejected the credentials: {reason}")]
    Rejected {
        /// The URL that rejected the request
        endpoint: String,
        /// Reason for the rejection
        reason: String,
    },

    /// Unexpected HTTP status without a SOAP fault body
    #[error("Unexpected HTTP {status} from {endpoint}: {body}")]
    HttpStatus {
        /// The URL that returned the status
        endpoint: String,
        /// HTTP status code
        status: u16,
        /// Response body (possibly empty)
        body: String,
    },

    /// Response body was not a well-formed SOAP message
    #[error("Malformed response from {endpoint}: {reason}")]
    MalformedResponse {
        /// The URL that returned the response
        endpoint: String,
        /// What was wrong with the response
        reason: String,
    },

    /// Request envelope could not be written
    #[error("Failed to encode SOAP request: {0}")]
    Encode(String),

    /// Configured endpoint is not a usable URL
    #[error("Invalid endpoint URL '{url}': {reason}")]
    InvalidEndpoint {
        /// The URL as configured
        url: String,
        /// Parser error
        reason: String,
    },
}

/// Outcome of a failed [`SoapTransport::invoke`](crate::soap::SoapTransport::invoke).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvokeError {
    /// The remote service answered with a SOAP fault
    #[error(transparent)]
    Fault(#[from] RemoteFault),

    /// The call failed before a SOAP answer was obtained
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Errors surfaced by [`DnssecZoneClient`](crate::client::DnssecZoneClient).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// Session establishment failed; no client instance exists
    #[error("Authentication against {endpoint} failed: {reason}")]
    Authentication {
        /// The WSDL endpoint used for session setup
        endpoint: String,
        /// Reason for the failure
        reason: String,
    },

    /// The remote service reported a fault; the session remains usable
    #[error("{operation} failed with remote fault <{code}>: {description}")]
    RemoteOperation {
        /// Remote operation (e.g., `signZone`)
        operation: Operation,
        /// Remote-supplied error code
        code: String,
        /// Remote-supplied description
        description: String,
    },

    /// The call failed in transport; it may not have reached the remote service
    #[error("{operation} failed in transport: {source}")]
    Transport {
        /// Remote operation (e.g., `signZone`)
        operation: Operation,
        /// Underlying transport failure
        #[source]
        source: TransportError,
    },
}

/// How far a failed call is known to have travelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// No request left the client
    NotSent,
    /// The request may or may not have been received
    Unknown,
    /// The remote service received the request and answered
    Received,
}

impl TransportError {
    /// Whether a request failing with this error was delivered.
    #[must_use]
    pub fn delivery(&self) -> Delivery {
        match self {
            Self::HttpStatus { .. } | Self::MalformedResponse { .. } => Delivery::Received,
            Self::Timeout { .. } | Self::Interrupted { .. } => Delivery::Unknown,
            Self::Unreachable { .. }
            | Self::Rejected { .. }
            | Self::Encode(_)
            | Self::InvalidEndpoint { .. } => Delivery::NotSent,
        }
    }
}

impl ClientError {
    /// Returns `true` when the remote service reported a fault.
    #[must_use]
    pub fn is_remote_fault(&self) -> bool {
        matches!(self, Self::RemoteOperation { .. })
    }

    /// The operation that failed, or `None` for session failures.
    #[must_use]
    pub fn operation(&self) -> Option<Operation> {
        match self {
            Self::RemoteOperation { operation, .. } | Self::Transport { operation, .. } => {
                Some(*operation)
            }
            Self::Authentication { .. } => None,
        }
    }

    /// Whether the failed request was delivered to the remote service.
    #[must_use]
    pub fn delivery(&self) -> Delivery {
        match self {
            Self::RemoteOperation { .. } => Delivery::Received,
            Self::Transport { source, .. } => source.delivery(),
            Self::Authentication { .. } => Delivery::NotSent,
        }
    }

    /// Returns `true` when the request is known to have reached the remote service.
    ///
    /// A `false` result does not mean the request was never received: a timeout
    /// or an interrupted connection leaves delivery unknown. Use
    /// [`is_retry_safe`](Self::is_retry_safe) before re-sending.
    #[must_use]
    pub fn reached_remote(&self) -> bool {
        self.delivery() == Delivery::Received
    }

    /// Returns `true` when re-sending the failed call cannot duplicate a state change.
    ///
    /// Read-only operations are always safe to repeat. `signZone` and `unsignZone`
    /// are only safe when no request left the client.
    #[must_use]
    pub fn is_retry_safe(&self) -> bool {
        match self.operation() {
            Some(operation) if operation.is_mutating() => self.delivery() == Delivery::NotSent,
            _ => true,
        }
    }

    /// The remote fault code, if this error is a remote fault.
    #[must_use]
    pub fn fault_code(&self) -> Option<&str> {
        match self {
            Self::RemoteOperation { code, .. } => Some(code),
            _ => None,
        }
    }
}

/// Errors that can occur while loading [`ClientConfig`](crate::config::ClientConfig).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Required setting was not provided
    #[error("Missing required setting {0}")]
    Missing(&'static str),

    /// Setting was provided with an unusable value
    #[error("Invalid value '{value}' for {key}: {reason}")]
    Invalid {
        /// Setting name
        key: &'static str,
        /// Value as provided
        value: String,
        /// Why the value was rejected
        reason: String,
    },
}

#[cfg(test)]
#[path = "errors_tests.rs"]
mod errors_tests;
