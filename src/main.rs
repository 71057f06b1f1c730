use cashdesk::application::customers::CustomerRepository;
use cashdesk::application::payout::PayoutService;
use cashdesk::config::ServiceConfig;
use cashdesk::domain::filters::CustomerFilters;
use cashdesk::domain::notification::Notifications;
use cashdesk::domain::ports::CustomerStoreBox;
use cashdesk::domain::validation::DeclarativeCustomerValidator;
use cashdesk::infrastructure::cache::MemoryCache;
use cashdesk::infrastructure::in_memory::InMemoryCustomerStore;
use cashdesk::interfaces::csv::customer_reader::CustomerReader;
use cashdesk::interfaces::csv::customer_writer::CustomerWriter;
use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result, miette};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to persistent database (optional). If provided, uses RocksDB.
    #[arg(long, global = true)]
    db_path: Option<PathBuf>,

    /// JSON file with service settings (cache expiration).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List every banknote combination for an amount in EUR
    Payout {
        #[arg(allow_negative_numbers = true)]
        amount: i64,
    },
    /// Manage the customer collection
    #[command(subcommand)]
    Customers(CustomersCommand),
}

#[derive(Subcommand)]
enum CustomersCommand {
    /// Add customers from a CSV file with an Id,FirstName,LastName,Age header
    Add { input: PathBuf },
    /// List stored customers as CSV
    List {
        #[arg(long)]
        id: Option<i32>,
        #[arg(long)]
        name: Option<String>,
        #[arg(long, allow_negative_numbers = true)]
        age: Option<i32>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Payout { amount } => payout(amount),
        Command::Customers(command) => {
            let config = match &cli.config {
                Some(path) => ServiceConfig::from_json_file(path).into_diagnostic()?,
                None => ServiceConfig::default(),
            };
            let repository = CustomerRepository::with_config(
                open_store(cli.db_path.as_deref())?,
                Arc::new(MemoryCache::new(config.cache_sliding_ttl())),
                Box::new(DeclarativeCustomerValidator),
                &config,
            );
            match command {
                CustomersCommand::Add { input } => add_customers(&repository, &input).await,
                CustomersCommand::List { id, name, age } => {
                    list_customers(&repository, CustomerFilters { id, name, age }).await
                }
            }
        }
    }
}

#[cfg(feature = "storage-rocksdb")]
fn open_store(db_path: Option<&Path>) -> Result<CustomerStoreBox> {
    use cashdesk::infrastructure::rocksdb::RocksDbCustomerStore;

    Ok(match db_path {
        Some(path) => Box::new(RocksDbCustomerStore::open(path).into_diagnostic()?),
        None => Box::new(InMemoryCustomerStore::new()),
    })
}

#[cfg(not(feature = "storage-rocksdb"))]
fn open_store(db_path: Option<&Path>) -> Result<CustomerStoreBox> {
    if db_path.is_some() {
        eprintln!(
            "WARNING: Persistent storage requested via --db-path, but 'storage-rocksdb' feature is not enabled. Falling back to In-Memory storage."
        );
    }
    Ok(Box::new(InMemoryCustomerStore::new()))
}

fn payout(amount: i64) -> Result<()> {
    let mut notifications = Notifications::new();
    let combinations = PayoutService::default()
        .get_payout_combinations(amount, &mut notifications)
        .into_diagnostic()?;

    report(&notifications);
    if combinations.is_empty() {
        return Err(miette!(
            "Unable to dispense the requested value with available denominations."
        ));
    }

    for combination in combinations {
        println!("{combination}");
    }
    Ok(())
}

async fn add_customers(repository: &CustomerRepository, input: &Path) -> Result<()> {
    let file = File::open(input).into_diagnostic()?;
    let mut candidates = Vec::new();
    for customer in CustomerReader::new(file).customers() {
        match customer {
            Ok(customer) => candidates.push(customer),
            Err(e) => eprintln!("Error reading customer: {}", e),
        }
    }

    let mut notifications = Notifications::new();
    let stored = repository.add_customers(candidates, &mut notifications).await;
    report(&notifications);

    if let Some(failure) = notifications.first_with_status() {
        return Err(miette!("{}", failure.message));
    }
    let Some(customers) = stored else {
        return Err(miette!("No customers were added"));
    };

    let stdout = io::stdout();
    let mut writer = CustomerWriter::new(stdout.lock());
    writer.write_customers(&customers).into_diagnostic()?;
    Ok(())
}

async fn list_customers(repository: &CustomerRepository, filters: CustomerFilters) -> Result<()> {
    let customers = repository.list_customers(&filters).await.into_diagnostic()?;
    if customers.is_empty() {
        return Ok(());
    }

    let stdout = io::stdout();
    let mut writer = CustomerWriter::new(stdout.lock());
    writer.write_customers(&customers).into_diagnostic()?;
    Ok(())
}

fn report(notifications: &Notifications) {
    for notification in notifications.all() {
        eprintln!("{}: {}", notification.key, notification.message);
    }
}
