use std::sync::Arc;

use clap::{Parser, Subcommand};
use dynv6_dns::auth::credentials::EnvCredentialManager;
use dynv6_dns::config::Config;
use dynv6_dns::{DNSProvider, DNSRecord, DNSRecordType, Dynv6Provider};
use log::{error, info};
use tokio::signal;
use tokio_util::sync::CancellationToken;

/// Manage dynv6 zones and records. The API token is read from DYNV6_TOKEN.
#[derive(Parser, Debug)]
#[command(author, version, about, rename_all = "kebab-case")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List all zones of the account
    Zones,
    /// Show a single zone by name or ID
    Zone { zone: String },
    /// List the records of a zone
    Records { zone: String },
    /// Create records
    Add(RecordArgs),
    /// Create or update the record with the same type and name
    Set(RecordArgs),
    /// Delete the record with the same type, name and value
    Delete(RecordArgs),
}

#[derive(clap::Args, Debug)]
struct RecordArgs {
    /// Zone name or ID
    zone: String,
    /// Record type (A, AAAA, CNAME, TXT, ...)
    #[arg(value_name = "TYPE")]
    record_type: String,
    /// Record name, relative or fully qualified
    name: String,
    value: String,
    /// Existing record ID
    #[arg(long)]
    id: Option<String>,
}

impl RecordArgs {
    fn record(&self) -> DNSRecord {
        let rec = DNSRecord::new(
            DNSRecordType::from(self.record_type.as_str()),
            &self.name,
            &self.value,
        );
        match &self.id {
            Some(id) => rec.with_id(id),
            None => rec,
        }
    }
}

fn print_records(records: &[DNSRecord]) {
    for rec in records {
        println!(
            "{}\t{}\t{}\t{}\t{}",
            rec.id,
            rec.record_type,
            rec.name,
            rec.ttl.as_secs(),
            rec.value
        );
    }
}

async fn run(provider: Dynv6Provider, command: Command) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Command::Zones => {
            for zone in provider.get_zones().await? {
                println!("{}\t{}", zone.id, zone.name);
            }
        }
        Command::Zone { zone } => {
            let zone = provider.resolve_zone(&zone).await?;
            println!("id:           {}", zone.id);
            println!("name:         {}", zone.name);
            println!("ipv4 address: {}", zone.ipv4_address.unwrap_or_default());
            println!("ipv6 prefix:  {}", zone.ipv6_prefix.unwrap_or_default());
            if let Some(created_at) = zone.created_at {
                println!("created:      {}", created_at.to_rfc3339());
            }
            if let Some(updated_at) = zone.updated_at {
                println!("updated:      {}", updated_at.to_rfc3339());
            }
        }
        Command::Records { zone } => {
            print_records(&provider.list_records(&zone).await?);
        }
        Command::Add(args) => {
            print_records(&provider.append_records(&args.zone, vec![args.record()]).await?);
        }
        Command::Set(args) => {
            print_records(&provider.set_records(&args.zone, vec![args.record()]).await?);
        }
        Command::Delete(args) => {
            let deleted = provider
                .delete_records(&args.zone, vec![args.record()])
                .await?;
            if deleted.is_empty() {
                info!("No matching record found");
            }
            print_records(&deleted);
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::from_env();
    let cancel = CancellationToken::new();
    let provider = Dynv6Provider::new(config, Arc::new(EnvCredentialManager))?
        .with_cancellation(cancel.clone());

    // Abort the in-flight request on Ctrl-C
    tokio::spawn(async move {
        match signal::ctrl_c().await {
            Ok(()) => {
                info!("Shutdown signal received");
                cancel.cancel();
            }
            Err(e) => error!("Failed to listen for shutdown signal: {}", e),
        }
    });

    run(provider, cli.command).await
}
