// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! # ultradnssec - DNSSEC zone management for UltraDNS
//!
//! A client for the DNSSEC operations of the UltraDNS SOAP web service.
//!
//! ## Overview
//!
//! The crate authenticates once against the UltraDNS WSDL endpoint using a
//! WS-Security `UsernameToken`, then forwards six remote calls:
//!
//! - Query pending changes to a zone
//! - List DNSSEC keys (ZSK or KSK)
//! - Fetch the zone's DNSSEC policies
//! - Fetch DS records
//! - Sign and unsign a zone
//!
//! Zone names are always sent fully qualified. Remote faults come back as typed
//! errors, separate from transport failures.
//!
//! ## Modules
//!
//! - [`client`] - The `DnssecZoneClient` façade
//! - [`soap`] - Transport seam, HTTP transport, envelope and response handling
//! - [`types`] - Zone names, key types, credentials, operations
//! - [`errors`] - Error types
//! - [`config`] - Environment-driven configuration
//! - [`constants`] - Endpoint, namespace and environment variable names
//!
//! ## Example
//!
//! ```rust,no_run
//! use ultradnssec::client::DnssecZoneClient;
//!
//! # async fn example() -> Result<(), ultradnssec::errors::ClientError> {
//! let mut client = DnssecZoneClient::new("username", "password").await?;
//! client.debug_on();
//!
//! let ds_records = client.get_ds_records("example.com").await?;
//! println!("{} DS records", ds_records.len());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod constants;
pub mod errors;
pub mod soap;
pub mod types;
