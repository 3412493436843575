// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! SOAP 1.1 over HTTP(S) transport.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client as HttpClient, StatusCode};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info};
use url::Url;

use super::envelope::build_envelope;
use super::parse::{parse_response, parse_service_description, ResponseBody};
use super::{Session, SoapTransport, SoapValue};
use crate::constants::{DEFAULT_SERVICE_NAMESPACE, SOAP_CONTENT_TYPE};
use crate::errors::{InvokeError, TransportError};
use crate::types::{Credentials, RemoteCall};

/// Transport that speaks SOAP 1.1 to the UltraDNS web service.
///
/// Sessions are opened by fetching the WSDL; the SOAP endpoint address and the
/// target namespace are read from it.
///
/// # Examples
///
/// ```rust,no_run
/// use std::time::Duration;
/// use ultradnssec::soap::HttpSoapTransport;
///
/// let transport = HttpSoapTransport::new(
///     "https://ultra-api.ultradns.com:8008/UltraDNS_WS/v01?wsdl",
///     Duration::from_secs(30),
/// )?;
/// # Ok::<(), ultradnssec::errors::TransportError>(())
/// ```
#[derive(Debug, Clone)]
pub struct HttpSoapTransport {
    /// HTTP client for API requests
    client: Arc<HttpClient>,
    /// Service description URL
    wsdl_url: Url,
}

impl HttpSoapTransport {
    /// Create a transport for the given WSDL URL with a per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL does not parse or the HTTP client cannot be built.
    pub fn new(wsdl_url: &str, timeout: Duration) -> Result<Self, TransportError> {
        let parsed = Url::parse(wsdl_url).map_err(|e| TransportError::InvalidEndpoint {
            url: wsdl_url.to_string(),
            reason: e.to_string(),
        })?;

        let client = HttpClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::Unreachable {
                endpoint: wsdl_url.to_string(),
                reason: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            client: Arc::new(client),
            wsdl_url: parsed,
        })
    }

    /// Resolve the SOAP endpoint from the WSDL's `address/@location`, or fall back to
    /// the WSDL URL without its query string.
    fn resolve_endpoint(&self, location: Option<&str>) -> Result<String, TransportError> {
        match location {
            Some(location) => self
                .wsdl_url
                .join(location)
                .map(String::from)
                .map_err(|e| TransportError::InvalidEndpoint {
                    url: location.to_string(),
                    reason: e.to_string(),
                }),
            None => {
                let mut endpoint = self.wsdl_url.clone();
                endpoint.set_query(None);
                Ok(endpoint.into())
            }
        }
    }
}

/// Classify a `reqwest` send failure.
///
/// Only a failed connect proves nothing was sent. Timeouts and broken
/// connections may have delivered the request.
fn request_error(endpoint: &str, e: &reqwest::Error) -> TransportError {
    if e.is_timeout() {
        TransportError::Timeout {
            endpoint: endpoint.to_string(),
        }
    } else if e.is_connect() {
        TransportError::Unreachable {
            endpoint: endpoint.to_string(),
            reason: e.to_string(),
        }
    } else {
        TransportError::Interrupted {
            endpoint: endpoint.to_string(),
            reason: e.to_string(),
        }
    }
}

/// Classify a failure reading the body once the status line has arrived.
fn body_error(endpoint: &str, status: StatusCode, e: &reqwest::Error) -> TransportError {
    TransportError::MalformedResponse {
        endpoint: endpoint.to_string(),
        reason: format!("failed to read HTTP {status} response body: {e}"),
    }
}

#[async_trait]
impl SoapTransport for HttpSoapTransport {
    async fn open_session(&self, credentials: &Credentials) -> Result<Session, TransportError> {
        let url = self.wsdl_url.as_str();

        if credentials.is_incomplete() {
            return Err(TransportError::Rejected {
                endpoint: url.to_string(),
                reason: "username and password are required".to_string(),
            });
        }

        info!(
            url = %url,
            username = %credentials.username,
            "Fetching UltraDNS service description"
        );

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| request_error(url, &e))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            error!(url = %url, status = %status, "Service description request rejected");
            return Err(TransportError::Rejected {
                endpoint: url.to_string(),
                reason: format!("HTTP {status}"),
            });
        }

        let text = response
            .text()
            .await
            .map_err(|e| body_error(url, status, &e))?;

        if !status.is_success() {
            error!(url = %url, status = %status, "Service description request failed");
            return Err(TransportError::HttpStatus {
                endpoint: url.to_string(),
                status: status.as_u16(),
                body: text,
            });
        }

        let description =
            parse_service_description(&text).map_err(|e| TransportError::MalformedResponse {
                endpoint: url.to_string(),
                reason: e.to_string(),
            })?;

        let endpoint = self.resolve_endpoint(description.endpoint.as_deref())?;
        let namespace = description
            .namespace
            .unwrap_or_else(|| DEFAULT_SERVICE_NAMESPACE.to_string());

        debug!(
            endpoint = %endpoint,
            namespace = %namespace,
            "UltraDNS session established"
        );

        Ok(Session::new(endpoint, namespace, credentials.clone()))
    }

    async fn invoke(&self, session: &Session, call: &RemoteCall) -> Result<SoapValue, InvokeError> {
        let endpoint = session.endpoint();
        let operation = call.operation.remote_name();
        let envelope = build_envelope(session, call)?;

        // The envelope carries the password, so only its size is logged
        info!(
            operation = %operation,
            url = %endpoint,
            request_len = envelope.len(),
            "SOAP request to UltraDNS"
        );

        let response = self
            .client
            .post(endpoint)
            .header(CONTENT_TYPE, SOAP_CONTENT_TYPE)
            .header("SOAPAction", "\"\"")
            .body(envelope)
            .send()
            .await
            .map_err(|e| request_error(endpoint, &e))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| body_error(endpoint, status, &e))?;

        // Faults arrive with HTTP 500, so the body is inspected before the status
        match (parse_response(&text), status.is_success()) {
            (Ok(ResponseBody::Fault(fault)), _) => {
                error!(
                    operation = %operation,
                    url = %endpoint,
                    status = %status,
                    code = %fault.code,
                    "SOAP fault from UltraDNS"
                );
                Err(InvokeError::Fault(fault))
            }
            (Ok(ResponseBody::Payload(payload)), true) => {
                info!(
                    operation = %operation,
                    url = %endpoint,
                    status = %status,
                    response_len = text.len(),
                    "SOAP request successful"
                );
                Ok(payload)
            }
            (_, false) => {
                error!(
                    operation = %operation,
                    url = %endpoint,
                    status = %status,
                    "SOAP request failed"
                );
                Err(TransportError::HttpStatus {
                    endpoint: endpoint.to_string(),
                    status: status.as_u16(),
                    body: text,
                }
                .into())
            }
            (Err(e), true) => {
                error!(
                    operation = %operation,
                    url = %endpoint,
                    error = %e,
                    "Malformed SOAP response"
                );
                Err(TransportError::MalformedResponse {
                    endpoint: endpoint.to_string(),
                    reason: e.to_string(),
                }
                .into())
            }
        }
    }

    fn endpoint(&self) -> &str {
        self.wsdl_url.as_str()
    }
}
