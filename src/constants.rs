// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Global constants for the UltraDNS DNSSEC client.
//!
//! This module contains all string and numeric constants used throughout the codebase.
//! Constants are organized by category for easy maintenance.

// ============================================================================
// UltraDNS Endpoint Constants
// ============================================================================

/// Versioned WSDL URL of the UltraDNS SOAP web service
pub const DEFAULT_WSDL_URL: &str = "https://ultra-api.ultradns.com:8008/UltraDNS_WS/v01?wsdl";

/// Target namespace of the UltraDNS v01 service, used when the WSDL omits one
pub const DEFAULT_SERVICE_NAMESPACE: &str = "http://webservice.api.ultra.neustar.com/v01/";

/// Default per-request timeout (30 seconds)
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

// ============================================================================
// SOAP / WS-Security Constants
// ============================================================================

/// SOAP 1.1 envelope namespace
pub const SOAP_ENVELOPE_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";

/// WS-Security extension namespace
pub const WSSE_NS: &str =
    "http://docs.oasis-open.org/wss/2004/01/oasis-200401-wss-wssecurity-secext-1.0.xsd";

/// WS-Security utility namespace (`wsu:Created`)
pub const WSU_NS: &str =
    "http://docs.oasis-open.org/wss/2004/01/oasis-200401-wss-wssecurity-utility-1.0.xsd";

/// `Type` attribute value for a plain-text `UsernameToken` password
pub const WSSE_PASSWORD_TEXT: &str =
    "http://docs.oasis-open.org/wss/2004/01/oasis-200401-wss-username-token-profile-1.0#PasswordText";

/// `EncodingType` attribute value for a base64 `UsernameToken` nonce
pub const WSSE_BASE64_BINARY: &str =
    "http://docs.oasis-open.org/wss/2004/01/oasis-200401-wss-soap-message-security-1.0#Base64Binary";

/// Number of random bytes in a `UsernameToken` nonce
pub const WSSE_NONCE_LEN: usize = 16;

/// Content type of SOAP 1.1 requests
pub const SOAP_CONTENT_TYPE: &str = "text/xml; charset=utf-8";

/// Element name of the detail payload UltraDNS attaches to its faults
pub const ULTRA_FAULT_DETAIL: &str = "UltraWSException";

// ============================================================================
// Remote Argument Names
// ============================================================================

/// Element name of the zone argument on every remote operation
pub const ARG_ZONE_NAME: &str = "zoneName";

/// Element name of the key type argument on `getDnssecKeyRecordList`
pub const ARG_KEY_TYPE: &str = "keyType";

// ============================================================================
// Configuration Environment Variables
// ============================================================================

/// Account username
pub const ENV_USERNAME: &str = "ULTRADNS_USERNAME";

/// Account password
pub const ENV_PASSWORD: &str = "ULTRADNS_PASSWORD";

/// WSDL URL override
pub const ENV_WSDL_URL: &str = "ULTRADNS_WSDL_URL";

/// Request timeout override in seconds
pub const ENV_TIMEOUT_SECS: &str = "ULTRADNS_TIMEOUT_SECS";

/// Enables debug logging of canonicalized zone names
pub const ENV_DEBUG: &str = "ULTRADNS_DEBUG";
