// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info};
use ultradnssec::{client::DnssecZoneClient, config::ClientConfig, types::KeyType};

/// Manage DNSSEC for UltraDNS zones.
///
/// Credentials and endpoint are read from `ULTRADNS_USERNAME`, `ULTRADNS_PASSWORD`,
/// `ULTRADNS_WSDL_URL`, `ULTRADNS_TIMEOUT_SECS` and `ULTRADNS_DEBUG`.
#[derive(Debug, Parser)]
#[command(name = "ultradnssec", version, about)]
struct Cli {
    /// Log canonicalized zone names
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Query uncommitted changes to a zone
    PendingChanges { zone: String },
    /// List DNSSEC keys of a zone
    Keys {
        zone: String,
        /// ZSK or KSK
        #[arg(long, default_value = "ZSK")]
        key_type: KeyType,
    },
    /// Show the zone's DNSSEC policies
    Policies { zone: String },
    /// Show the zone's DS records
    DsRecords { zone: String },
    /// Sign a zone
    Sign { zone: String },
    /// Remove signing from a zone
    Unsign { zone: String },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async_main(cli))
}

async fn async_main(cli: Cli) -> Result<()> {
    // Respects RUST_LOG (default: info) and RUST_LOG_FORMAT (json|text)
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let log_format = std::env::var("RUST_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    match log_format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_file(true)
                .with_line_number(true)
                .with_target(false)
                .with_writer(std::io::stderr)
                .json()
                .init();
        }
        _ => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_file(true)
                .with_line_number(true)
                .with_target(false)
                .with_writer(std::io::stderr)
                .with_ansi(true)
                .compact()
                .init();
        }
    }

    debug!("Logging initialized with file and line number tracking");

    let mut config = ClientConfig::from_env().context("Failed to load UltraDNS configuration")?;
    config.debug |= cli.debug;

    info!(wsdl_url = %config.wsdl_url, "Connecting to UltraDNS");
    let client = DnssecZoneClient::connect(&config).await?;
    debug!(client = %client, "Client ready");

    let output = match cli.command {
        Command::PendingChanges { zone } => {
            serde_json::to_value(client.query_pending_changes(&zone).await?)?
        }
        Command::Keys { zone, key_type } => serde_json::to_value(
            client
                .get_dnssec_key_record_list(&zone, key_type)
                .await?,
        )?,
        Command::Policies { zone } => {
            serde_json::to_value(client.get_domain_dnssec_policies(&zone).await?)?
        }
        Command::DsRecords { zone } => serde_json::to_value(client.get_ds_records(&zone).await?)?,
        Command::Sign { zone } => serde_json::to_value(client.sign_zone(&zone).await?)?,
        Command::Unsign { zone } => serde_json::to_value(client.un_sign_zone(&zone).await?)?,
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
