// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Parsing of SOAP responses, faults and service descriptions.
//!
//! Documents are read with `quick-xml` into a [`SoapValue`] tree. Namespace
//! prefixes are dropped, so lookups use local names only (`Envelope`, `Body`,
//! `Fault`, ...).

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use thiserror::Error;

use super::SoapValue;
use crate::constants::ULTRA_FAULT_DETAIL;
use crate::errors::RemoteFault;

/// XML could not be read into a [`SoapValue`] tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct XmlError(pub String);

/// Decoded SOAP response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseBody {
    /// First element of the body (the `<op>Response` wrapper)
    Payload(SoapValue),
    /// The body carried a `Fault`
    Fault(RemoteFault),
}

/// Location details extracted from a WSDL document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceDescription {
    /// `address/@location` of the first service port
    pub endpoint: Option<String>,
    /// `definitions/@targetNamespace`
    pub namespace: Option<String>,
}

/// Parse a complete XML document into its root element.
///
/// # Errors
///
/// Returns an error if the document is not well-formed or has no root element.
pub fn parse_document(xml: &str) -> Result<SoapValue, XmlError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<SoapValue> = Vec::new();
    let mut root: Option<SoapValue> = None;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| XmlError(format!("at byte {}: {e}", reader.buffer_position())))?;

        match event {
            Event::Start(start) => stack.push(element_from(&start)?),
            Event::Empty(start) => {
                let element = element_from(&start)?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| XmlError("unbalanced closing tag".to_string()))?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::Text(text) => {
                let text = text
                    .unescape()
                    .map_err(|e| XmlError(format!("invalid text content: {e}")))?;
                append_text(&mut stack, &text);
            }
            Event::CData(cdata) => {
                let bytes = cdata.into_inner();
                append_text(&mut stack, &String::from_utf8_lossy(&bytes));
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !stack.is_empty() {
        return Err(XmlError("unexpected end of document".to_string()));
    }
    root.ok_or_else(|| XmlError("document has no root element".to_string()))
}

/// Parse a SOAP response envelope.
///
/// # Errors
///
/// Returns an error if the document is not a SOAP envelope with a non-empty body.
pub fn parse_response(xml: &str) -> Result<ResponseBody, XmlError> {
    let envelope = parse_document(xml)?;
    if envelope.name != "Envelope" {
        return Err(XmlError(format!(
            "expected SOAP Envelope, found <{}>",
            envelope.name
        )));
    }

    let body = envelope
        .children
        .into_iter()
        .find(|c| c.name == "Body")
        .ok_or_else(|| XmlError("SOAP envelope has no Body".to_string()))?;

    let payload = body
        .children
        .into_iter()
        .next()
        .ok_or_else(|| XmlError("SOAP Body is empty".to_string()))?;

    if payload.name == "Fault" {
        Ok(ResponseBody::Fault(fault_from(&payload)))
    } else {
        Ok(ResponseBody::Payload(payload))
    }
}

/// Extract the SOAP endpoint and target namespace from a WSDL document.
///
/// # Errors
///
/// Returns an error if the document is not well-formed or is not a WSDL `definitions` element.
pub fn parse_service_description(xml: &str) -> Result<ServiceDescription, XmlError> {
    let definitions = parse_document(xml)?;
    if definitions.name != "definitions" {
        return Err(XmlError(format!(
            "expected WSDL definitions, found <{}>",
            definitions.name
        )));
    }

    let endpoint = definitions
        .find("service")
        .and_then(|service| find_with_attribute(service, "address", "location"))
        .map(str::to_string);

    Ok(ServiceDescription {
        endpoint,
        namespace: definitions.attribute("targetNamespace").map(str::to_string),
    })
}

/// Decode a `Fault` element.
///
/// Prefers the UltraDNS detail (`errorCode`/`errorDescription`) and falls back to
/// the SOAP `faultcode`/`faultstring`.
#[must_use]
pub fn fault_from(fault: &SoapValue) -> RemoteFault {
    let detail = fault
        .child("detail")
        .and_then(|d| d.find(ULTRA_FAULT_DETAIL));

    if let Some(detail) = detail {
        if let Some(code) = detail.child_text("errorCode") {
            let description = detail.child_text("errorDescription").unwrap_or_default();
            return RemoteFault::new(code, description);
        }
    }

    RemoteFault::new(
        fault.child_text("faultcode").unwrap_or("Unknown"),
        fault.child_text("faultstring").unwrap_or_default(),
    )
}

fn find_with_attribute<'a>(value: &'a SoapValue, name: &str, attribute: &str) -> Option<&'a str> {
    if value.name == name {
        if let Some(found) = value.attribute(attribute) {
            return Some(found);
        }
    }
    value
        .children
        .iter()
        .find_map(|c| find_with_attribute(c, name, attribute))
}

fn element_from(start: &BytesStart<'_>) -> Result<SoapValue, XmlError> {
    let mut element = SoapValue::new(String::from_utf8_lossy(start.local_name().as_ref()));

    for attr in start.attributes() {
        let attr = attr.map_err(|e| XmlError(format!("invalid attribute: {e}")))?;
        if attr.key.as_namespace_binding().is_some() {
            continue;
        }
        let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|e| XmlError(format!("invalid attribute value: {e}")))?;
        element.attributes.insert(key, value.into_owned());
    }

    Ok(element)
}

fn attach(
    stack: &mut [SoapValue],
    root: &mut Option<SoapValue>,
    element: SoapValue,
) -> Result<(), XmlError> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None if root.is_none() => *root = Some(element),
        None => return Err(XmlError("multiple root elements".to_string())),
    }
    Ok(())
}

fn append_text(stack: &mut [SoapValue], text: &str) {
    if let Some(current) = stack.last_mut() {
        current.text.get_or_insert_with(String::new).push_str(text);
    }
}

#[cfg(test)]
#[path = "parse_tests.rs"]
mod parse_tests;
