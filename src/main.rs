use clap::Parser;
use eventbook::application::engine::{BookingEngine, EventDetails, GuestDraft, NewEvent};
use eventbook::domain::context::Actor;
use eventbook::domain::ports::CatalogStore;
use eventbook::error::{BookingError, Result};
use eventbook::infrastructure::in_memory::{
    InMemoryAuditLog, InMemoryCatalog, InMemoryEventStore,
};
use eventbook::interfaces::csv::catalog_reader::{CatalogItem, CatalogReader};
use eventbook::interfaces::csv::instruction_reader::{Instruction, InstructionReader, Op};
use eventbook::interfaces::csv::statement_writer::StatementWriter;
use miette::IntoDiagnostic;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Catalog CSV file (venues, packages, vendors)
    catalog: PathBuf,

    /// Booking instructions CSV file
    instructions: PathBuf,

    /// Path to persistent database (optional). If provided, uses RocksDB.
    #[cfg(feature = "storage-rocksdb")]
    #[arg(long)]
    db_path: Option<PathBuf>,
}

async fn load_catalog(catalog: &dyn CatalogStore, path: &Path) -> miette::Result<()> {
    let file = File::open(path).into_diagnostic()?;
    for item in CatalogReader::new(file).items() {
        match item.into_diagnostic()? {
            CatalogItem::Venue(venue) => catalog.store_venue(venue).await.into_diagnostic()?,
            CatalogItem::Package(package) => {
                catalog.store_package(package).await.into_diagnostic()?
            }
            CatalogItem::Vendor(vendor) => catalog.store_vendor(vendor).await.into_diagnostic()?,
        }
    }
    Ok(())
}

fn required<T>(value: Option<T>, what: &str) -> Result<T> {
    value.ok_or_else(|| BookingError::validation(format!("Instruction requires {what}")))
}

async fn apply(engine: &BookingEngine, ins: Instruction) -> Result<()> {
    let client = Actor::client(ins.client);
    match ins.op {
        Op::Create => {
            engine
                .create_event(
                    client,
                    NewEvent {
                        id: ins.event,
                        name: ins
                            .arg
                            .unwrap_or_else(|| format!("Event {}", ins.event)),
                        event_type: "General".into(),
                        event_date: required(ins.date, "a date")?,
                        expected_guest_count: required(ins.qty, "a guest count")?,
                        package_id: None,
                        venue_id: None,
                        special_requests: None,
                    },
                )
                .await?;
        }
        Op::Details => {
            let current = engine.get_event(client, ins.event).await?;
            engine
                .update_details(
                    client,
                    ins.event,
                    EventDetails {
                        name: ins.arg.unwrap_or(current.name),
                        event_type: current.event_type,
                        event_date: ins.date.unwrap_or(current.event_date),
                        expected_guest_count: ins.qty.unwrap_or(current.expected_guest_count),
                    },
                )
                .await?;
        }
        Op::Package => {
            engine.set_package(client, ins.event, ins.item).await?;
        }
        Op::Venue => {
            engine.set_venue(client, ins.event, ins.item).await?;
        }
        Op::Vendor => {
            engine
                .add_vendor(
                    client,
                    ins.event,
                    required(ins.item, "a vendor id")?,
                    ins.qty.unwrap_or(1),
                    ins.amount,
                    None,
                )
                .await?;
        }
        Op::Unvendor => {
            engine
                .remove_vendor(client, ins.event, required(ins.item, "a vendor id")?)
                .await?;
        }
        Op::Guest => {
            let name = required(ins.arg, "a guest name")?;
            let (first, last) = name.split_once(' ').unwrap_or((name.as_str(), ""));
            engine
                .add_guest(
                    client,
                    ins.event,
                    GuestDraft {
                        first_name: first.to_string(),
                        last_name: last.to_string(),
                        email: None,
                        phone: None,
                        plus_one_count: ins.qty.unwrap_or(0),
                    },
                )
                .await?;
        }
        Op::Unguest => {
            engine
                .remove_guest(client, ins.event, required(ins.item, "a guest id")?)
                .await?;
        }
        Op::Pay => {
            engine
                .record_payment(
                    client,
                    ins.event,
                    required(ins.amount, "an amount")?,
                    ins.arg.as_deref().unwrap_or("Unknown"),
                )
                .await?;
        }
        Op::Status => {
            let status = required(ins.arg, "a status")?.parse()?;
            engine
                .update_status(Actor::admin(ins.client), ins.event, status, None)
                .await?;
        }
        Op::Delete => {
            engine.delete_event(client, ins.event).await?;
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    #[cfg(feature = "storage-rocksdb")]
    let engine = if let Some(db_path) = &cli.db_path {
        let store = eventbook::infrastructure::rocksdb::RocksDbStore::open(db_path)
            .into_diagnostic()?;
        load_catalog(&store, &cli.catalog).await?;
        BookingEngine::new(
            Box::new(store.clone()),
            Box::new(store.clone()),
            Box::new(store),
        )
    } else {
        let catalog = InMemoryCatalog::new();
        load_catalog(&catalog, &cli.catalog).await?;
        BookingEngine::new(
            Box::new(InMemoryEventStore::new()),
            Box::new(catalog),
            Box::new(InMemoryAuditLog::new()),
        )
    };

    #[cfg(not(feature = "storage-rocksdb"))]
    let engine = {
        let catalog = InMemoryCatalog::new();
        load_catalog(&catalog, &cli.catalog).await?;
        BookingEngine::new(
            Box::new(InMemoryEventStore::new()),
            Box::new(catalog),
            Box::new(InMemoryAuditLog::new()),
        )
    };

    let file = File::open(&cli.instructions).into_diagnostic()?;
    for result in InstructionReader::new(file).instructions() {
        match result {
            Ok(ins) => {
                if let Err(e) = apply(&engine, ins).await {
                    eprintln!("Error processing instruction: {e}");
                }
            }
            Err(e) => {
                eprintln!("Error reading instruction: {e}");
            }
        }
    }

    let statements = engine.statements().await.into_diagnostic()?;

    let stdout = io::stdout();
    let mut writer = StatementWriter::new(stdout.lock());
    writer.write_statements(statements).into_diagnostic()?;

    Ok(())
}
