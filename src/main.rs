//! Payment Aggregator - deposit-flow orchestrator CLI
//!
//! Opens an authenticated session with the configured payment aggregator,
//! discovers the payer's eligible bank accounts, lets the operator choose
//! one, submits the deposit, persists the resulting record, and notifies
//! the configured callback URL.
//!
//! Exit codes:
//!   0 - Deposit completed and persisted
//!   1 - Runtime error (configuration, provider, database, ...)

mod callback;
mod cli;
mod config;
mod error;
mod flow;
mod models;
mod provider;
mod registry;
mod selector;
mod storage;

use anyhow::{Context, Result};
use cli::Args;
use config::Config;
use storage::{MongoPaymentStore, PaymentStore};
use tracing::{debug, error, info};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Initialize logging
    init_logging(&args);

    info!("Payment Aggregator v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    // Run the deposit flow
    match run_deposit(args).await {
        Ok(()) => Ok(()),
        Err(e) => {
            error!("Deposit failed: {}", e);
            eprintln!("\n❌ Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Initialize logging based on verbosity settings.
fn init_logging(args: &Args) {
    let level = args.log_level();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Run the complete deposit workflow: configure, connect, flow, persist,
/// notify.
async fn run_deposit(args: Args) -> Result<()> {
    // Load the .env file; fall back to the process environment
    match dotenvy::from_path(&args.env_file) {
        Ok(()) => info!(".env file loaded from {}", args.env_file.display()),
        Err(_) => info!("No .env file found, using system environment variables"),
    }

    let config = Config::from_env();

    let provider_name = args
        .provider
        .clone()
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| config.aggregator.clone());
    if provider_name.is_empty() {
        anyhow::bail!(
            "No aggregator selected; set AGGREGATOR or pass --provider (known: {})",
            registry::known_providers().join(", ")
        );
    }

    // Step 1: Connect to storage
    let store = MongoPaymentStore::connect(&config.database)
        .await
        .context("Failed to connect to MongoDB")?;

    // Step 2: Start the callback listener alongside the flow. It shares
    // nothing with the flow but the database.
    if !args.no_listener {
        let addr = config.callback.listen_addr();
        tokio::spawn(async move {
            if let Err(e) = callback::serve(addr).await {
                error!("Callback listener failed: {}", e);
            }
        });
    }

    // Step 3: Build the flow runner and execute the deposit
    let runner = registry::flow_runner(&provider_name, &config)?;
    let (response, record) = runner.run_deposit_flow(args.amount).await?;

    info!("Deposit succeeded: {:?}", response);
    println!(
        "\n✅ Deposit submitted: transaction {} via {}",
        record.transaction_id, record.aggregator
    );

    // Step 4: Persist the record
    store
        .insert(record.clone())
        .await
        .context("Failed to insert payment")?;
    info!("Payment inserted successfully");

    // Step 5: Notify the external system (best-effort)
    callback::notify(&config.callback.url, &record).await;

    // Keep the listener alive until the operator stops us
    if !args.no_listener {
        println!("Callback listener running on {}. Press Ctrl-C to exit.", config.callback.listen_addr());
        tokio::signal::ctrl_c()
            .await
            .context("Failed to listen for shutdown signal")?;
        info!("Shutdown signal received, exiting");
    }

    Ok(())
}
