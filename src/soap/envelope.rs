// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! SOAP 1.1 request envelope construction with a WS-Security `UsernameToken`.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{SecondsFormat, Utc};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use super::Session;
use crate::constants::{
    SOAP_ENVELOPE_NS, WSSE_BASE64_BINARY, WSSE_NONCE_LEN, WSSE_NS, WSSE_PASSWORD_TEXT, WSU_NS,
};
use crate::errors::TransportError;
use crate::types::RemoteCall;

/// Per-request freshness values of a `UsernameToken`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenFreshness {
    /// Base64-encoded random nonce
    pub nonce: String,
    /// Creation timestamp (UTC, RFC 3339)
    pub created: String,
}

impl TokenFreshness {
    /// Generate a random nonce stamped with the current time.
    #[must_use]
    pub fn generate() -> Self {
        let nonce: [u8; WSSE_NONCE_LEN] = rand::random();
        Self {
            nonce: STANDARD.encode(nonce),
            created: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

/// Build the envelope for `call` with a freshly generated token.
///
/// # Errors
///
/// Returns [`TransportError::Encode`] if the XML writer fails.
pub fn build_envelope(session: &Session, call: &RemoteCall) -> Result<String, TransportError> {
    build_envelope_with(session, call, &TokenFreshness::generate())
}

/// Build the envelope for `call` using the given token freshness values.
///
/// # Errors
///
/// Returns [`TransportError::Encode`] if the XML writer fails.
pub fn build_envelope_with(
    session: &Session,
    call: &RemoteCall,
    freshness: &TokenFreshness,
) -> Result<String, TransportError> {
    let mut w = EnvelopeWriter::new();
    let credentials = session.credentials();

    w.event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    w.start(
        "soapenv:Envelope",
        &[
            ("xmlns:soapenv", SOAP_ENVELOPE_NS),
            ("xmlns:ns", session.namespace()),
        ],
    )?;

    w.start("soapenv:Header", &[])?;
    w.start(
        "wsse:Security",
        &[("xmlns:wsse", WSSE_NS), ("soapenv:mustUnderstand", "1")],
    )?;
    w.start("wsse:UsernameToken", &[("xmlns:wsu", WSU_NS)])?;
    w.text_element("wsse:Username", &[], &credentials.username)?;
    w.text_element(
        "wsse:Password",
        &[("Type", WSSE_PASSWORD_TEXT)],
        &credentials.password,
    )?;
    w.text_element(
        "wsse:Nonce",
        &[("EncodingType", WSSE_BASE64_BINARY)],
        &freshness.nonce,
    )?;
    w.text_element("wsu:Created", &[], &freshness.created)?;
    w.end("wsse:UsernameToken")?;
    w.end("wsse:Security")?;
    w.end("soapenv:Header")?;

    let operation = format!("ns:{}", call.operation.remote_name());
    w.start("soapenv:Body", &[])?;
    w.start(&operation, &[])?;
    for (name, value) in &call.args {
        w.text_element(name, &[], value)?;
    }
    w.end(&operation)?;
    w.end("soapenv:Body")?;
    w.end("soapenv:Envelope")?;

    w.finish()
}

/// Thin wrapper over `quick_xml::Writer` that maps write errors into [`TransportError`].
struct EnvelopeWriter {
    inner: Writer<Vec<u8>>,
}

impl EnvelopeWriter {
    fn new() -> Self {
        Self {
            inner: Writer::new(Vec::new()),
        }
    }

    fn event(&mut self, event: Event<'_>) -> Result<(), TransportError> {
        self.inner
            .write_event(event)
            .map_err(|e| TransportError::Encode(e.to_string()))
    }

    fn start(&mut self, name: &str, attributes: &[(&str, &str)]) -> Result<(), TransportError> {
        let start = BytesStart::new(name).with_attributes(attributes.iter().copied());
        self.event(Event::Start(start))
    }

    fn end(&mut self, name: &str) -> Result<(), TransportError> {
        self.event(Event::End(BytesEnd::new(name)))
    }

    fn text_element(
        &mut self,
        name: &str,
        attributes: &[(&str, &str)],
        text: &str,
    ) -> Result<(), TransportError> {
        self.start(name, attributes)?;
        self.event(Event::Text(BytesText::new(text)))?;
        self.end(name)
    }

    fn finish(self) -> Result<String, TransportError> {
        String::from_utf8(self.inner.into_inner()).map_err(|e| TransportError::Encode(e.to_string()))
    }
}

#[cfg(test)]
#[path = "envelope_tests.rs"]
mod envelope_tests;
