// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! SOAP transport for the UltraDNS web service.
//!
//! This module provides the transport collaborator the client sits on:
//!
//! - [`SoapTransport`] - the seam between the client and the wire
//! - [`HttpSoapTransport`] - SOAP 1.1 over HTTPS with a WS-Security `UsernameToken`
//! - [`SoapValue`] - generic element tree carrying results unmodified
//!
//! # Architecture
//!
//! A session is opened once by fetching the service WSDL, which yields the SOAP
//! endpoint address and target namespace. Every call after that is a single
//! envelope POSTed to that endpoint. SOAP faults are decoded into
//! [`RemoteFault`](crate::errors::RemoteFault); everything else that goes wrong
//! is a [`TransportError`].

pub mod envelope;
pub mod http;
pub mod parse;
pub mod value;

pub use http::HttpSoapTransport;
pub use value::SoapValue;

use crate::errors::{InvokeError, TransportError};
use crate::types::{Credentials, RemoteCall};
use async_trait::async_trait;

/// Authenticated handle to the remote endpoint.
///
/// Produced by [`SoapTransport::open_session`] and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    endpoint: String,
    namespace: String,
    credentials: Credentials,
}

impl Session {
    pub fn new(
        endpoint: impl Into<String>,
        namespace: impl Into<String>,
        credentials: Credentials,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            namespace: namespace.into(),
            credentials,
        }
    }

    /// SOAP endpoint address that calls are POSTed to.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Target namespace of the service operations.
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Credentials attached to every call.
    #[must_use]
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }
}

/// Transport collaborator for [`DnssecZoneClient`](crate::client::DnssecZoneClient).
///
/// Implementations own marshaling and the wire; the client owns canonicalization
/// and error translation.
#[async_trait]
pub trait SoapTransport: Send + Sync {
    /// Establish a session for `credentials`.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint rejects the credentials or cannot be reached.
    async fn open_session(&self, credentials: &Credentials) -> Result<Session, TransportError>;

    /// Invoke one remote operation and return the response payload element.
    ///
    /// # Errors
    ///
    /// Returns [`InvokeError::Fault`] when the service answers with a SOAP fault,
    /// [`InvokeError::Transport`] for every other failure.
    async fn invoke(&self, session: &Session, call: &RemoteCall) -> Result<SoapValue, InvokeError>;

    /// URL that sessions are established against.
    fn endpoint(&self) -> &str;
}
