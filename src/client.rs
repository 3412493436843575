// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! DNSSEC zone management against the UltraDNS SOAP API.
//!
//! [`DnssecZoneClient`] holds one authenticated session and forwards six remote
//! operations. Every operation goes through the same dispatch step:
//!
//! 1. The zone name is canonicalized (trailing `.` appended if missing)
//! 2. The call is handed to the transport with all other arguments unchanged
//! 3. The remote result is returned unmodified
//! 4. A remote fault becomes [`ClientError::RemoteOperation`] and is logged
//! 5. Any other failure becomes [`ClientError::Transport`]
//!
//! Neither failure invalidates the session. Nothing is retried.
//!
//! # Example
//!
//! ```rust,no_run
//! use ultradnssec::client::DnssecZoneClient;
//! use ultradnssec::config::ClientConfig;
//! use ultradnssec::types::KeyType;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = ClientConfig::from_env()?;
//! let client = DnssecZoneClient::connect(&config).await?;
//!
//! let keys = client.get_dnssec_key_record_list("example.com", KeyType::Zsk).await?;
//! for key in &keys {
//!     println!("{}", key.name);
//! }
//! # Ok(())
//! # }
//! ```

use std::fmt;
use tracing::{error, info};

use crate::config::ClientConfig;
use crate::constants::{ARG_KEY_TYPE, ARG_ZONE_NAME};
use crate::errors::{ClientError, InvokeError};
use crate::soap::{HttpSoapTransport, Session, SoapTransport, SoapValue};
use crate::types::{Credentials, KeyType, Operation, RemoteCall, ZoneName};

/// Session-scoped façade over the UltraDNS zone-signing API.
///
/// The client is not meant to be shared between concurrent callers; the debug
/// flag can only be changed through `&mut self`.
#[derive(Debug)]
pub struct DnssecZoneClient<T: SoapTransport = HttpSoapTransport> {
    /// Transport collaborator
    transport: T,
    /// Authenticated session, fixed for the client's lifetime
    session: Session,
    /// Log canonicalized zone names
    debug: bool,
}

impl DnssecZoneClient<HttpSoapTransport> {
    /// Connect to the default UltraDNS endpoint with the given credentials.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Authentication`] if the session cannot be established.
    pub async fn new(username: &str, password: &str) -> Result<Self, ClientError> {
        Self::connect(&ClientConfig::new(username, password)).await
    }

    /// Connect using a full configuration (endpoint, timeout, debug flag, credentials).
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Authentication`] if the transport cannot be built or the
    /// session cannot be established.
    pub async fn connect(config: &ClientConfig) -> Result<Self, ClientError> {
        let transport = HttpSoapTransport::new(&config.wsdl_url, config.timeout).map_err(|e| {
            ClientError::Authentication {
                endpoint: config.wsdl_url.clone(),
                reason: e.to_string(),
            }
        })?;

        let mut client = Self::with_transport(transport, config.credentials.clone()).await?;
        client.set_debug(config.debug);
        Ok(client)
    }
}

impl<T: SoapTransport> DnssecZoneClient<T> {
    /// Establish a session through an arbitrary transport.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Authentication`] if the transport refuses the credentials
    /// or cannot reach the endpoint. No client is returned in that case.
    pub async fn with_transport(transport: T, credentials: Credentials) -> Result<Self, ClientError> {
        let session = match transport.open_session(&credentials).await {
            Ok(session) => session,
            Err(e) => {
                error!(
                    endpoint = %transport.endpoint(),
                    username = %credentials.username,
                    error = %e,
                    "Failed to establish UltraDNS session"
                );
                return Err(ClientError::Authentication {
                    endpoint: transport.endpoint().to_string(),
                    reason: e.to_string(),
                });
            }
        };

        info!(
            endpoint = %session.endpoint(),
            username = %credentials.username,
            "UltraDNS session ready"
        );

        Ok(Self {
            transport,
            session,
            debug: false,
        })
    }

    // ===== Debug mode =====

    /// Enable or disable logging of canonicalized zone names.
    pub fn set_debug(&mut self, enabled: bool) {
        self.debug = enabled;
    }

    /// Turn debug logging on.
    pub fn debug_on(&mut self) {
        self.set_debug(true);
    }

    /// Turn debug logging off.
    pub fn debug_off(&mut self) {
        self.set_debug(false);
    }

    /// Whether canonicalized zone names are being logged.
    #[must_use]
    pub fn is_debug(&self) -> bool {
        self.debug
    }

    // ===== Introspection =====

    /// The transport collaborator.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// The authenticated session.
    pub fn session(&self) -> &Session {
        &self.session
    }

    // ===== Remote operations =====

    /// Read uncommitted changes to the zone.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::RemoteOperation`] on a remote fault, [`ClientError::Transport`]
    /// on any other failure.
    pub async fn query_pending_changes(&self, zone: &str) -> Result<Vec<SoapValue>, ClientError> {
        self.dispatch(Operation::QueryPendingChanges, zone, &[])
            .await
            .map(SoapValue::into_children)
    }

    /// Read the zone's signing keys of the given type.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::RemoteOperation`] on a remote fault, [`ClientError::Transport`]
    /// on any other failure.
    pub async fn get_dnssec_key_record_list(
        &self,
        zone: &str,
        key_type: KeyType,
    ) -> Result<Vec<SoapValue>, ClientError> {
        self.dispatch(
            Operation::GetDnssecKeyRecordList,
            zone,
            &[(ARG_KEY_TYPE, key_type.as_str())],
        )
        .await
        .map(SoapValue::into_children)
    }

    /// Read the zone's DNSSEC policy set.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::RemoteOperation`] on a remote fault, [`ClientError::Transport`]
    /// on any other failure.
    pub async fn get_domain_dnssec_policies(&self, zone: &str) -> Result<Vec<SoapValue>, ClientError> {
        self.dispatch(Operation::GetDomainDnssecPolicies, zone, &[])
            .await
            .map(SoapValue::into_children)
    }

    /// Read the zone's delegation-signer records.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::RemoteOperation`] on a remote fault, [`ClientError::Transport`]
    /// on any other failure.
    pub async fn get_ds_records(&self, zone: &str) -> Result<Vec<SoapValue>, ClientError> {
        self.dispatch(Operation::GetDsRecords, zone, &[])
            .await
            .map(SoapValue::into_children)
    }

    /// Ask the remote service to begin signing the zone.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::RemoteOperation`] on a remote fault, [`ClientError::Transport`]
    /// on any other failure.
    pub async fn sign_zone(&self, zone: &str) -> Result<SoapValue, ClientError> {
        self.dispatch(Operation::SignZone, zone, &[]).await
    }

    /// Ask the remote service to remove signing from the zone.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::RemoteOperation`] on a remote fault, [`ClientError::Transport`]
    /// on any other failure.
    pub async fn un_sign_zone(&self, zone: &str) -> Result<SoapValue, ClientError> {
        self.dispatch(Operation::UnsignZone, zone, &[]).await
    }

    /// Canonicalize, invoke, and translate failures. Every operation goes through here.
    async fn dispatch(
        &self,
        operation: Operation,
        zone: &str,
        extra: &[(&'static str, &str)],
    ) -> Result<SoapValue, ClientError> {
        let zone = self.canonicalize(zone);

        let call = extra.iter().fold(
            RemoteCall::new(operation).arg(ARG_ZONE_NAME, zone.as_str()),
            |call, &(name, value)| call.arg(name, value),
        );

        match self.transport.invoke(&self.session, &call).await {
            Ok(result) => Ok(result),
            Err(InvokeError::Fault(fault)) => {
                error!(
                    operation = %operation,
                    zone = %zone,
                    code = %fault.code,
                    description = %fault.description,
                    "{fault}"
                );
                Err(ClientError::RemoteOperation {
                    operation,
                    code: fault.code,
                    description: fault.description,
                })
            }
            Err(InvokeError::Transport(source)) => {
                error!(
                    operation = %operation,
                    zone = %zone,
                    error = %source,
                    "UltraDNS call failed in transport"
                );
                Err(ClientError::Transport {
                    operation,
                    source,
                })
            }
        }
    }

    fn canonicalize(&self, zone: &str) -> ZoneName {
        let zone = ZoneName::new(zone);
        if self.debug {
            info!(zone = %zone, "Canonicalized zone name");
        }
        zone
    }
}

impl<T: SoapTransport> fmt::Display for DnssecZoneClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DnssecZoneClient(endpoint={}, namespace={}, user={}, debug={})",
            self.session.endpoint(),
            self.session.namespace(),
            self.session.credentials().username,
            if self.debug { "on" } else { "off" }
        )
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod client_tests;
