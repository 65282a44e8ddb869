use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lumber_ledger::api::{self, AppState};
use lumber_ledger::config::AppConfig;
use lumber_ledger::models::NewRecordInput;
use lumber_ledger::report::ReportBuilder;
use lumber_ledger::sessions::SessionRegistry;
use lumber_ledger::store::RecordStore;

#[derive(Parser)]
#[command(name = "lumber")]
#[command(about = "Lumber volume tally with PDF export")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server for the entry form
    Serve {
        /// Port for HTTP API
        #[arg(short, long, default_value = "3000")]
        port: u16,
    },
    /// Render a report from a JSON array of records
    Report {
        /// JSON file with records ({species, count, width_cm, thickness_cm, length_cm})
        #[arg(short, long)]
        input: PathBuf,

        /// Output file (defaults to <prefix>_<date>.pdf)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG")
            .unwrap_or_else(|_| "lumber_ledger=debug,tower_http=debug".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let config = AppConfig::from_env();

    match cli.command {
        Some(Commands::Serve { port }) => serve(&config, port).await?,
        Some(Commands::Report { input, output }) => report(&config, input, output).await?,
        None => serve(&config, 3000).await?,
    }

    Ok(())
}

async fn serve(config: &AppConfig, port: u16) -> anyhow::Result<()> {
    tracing::info!("Starting lumber ledger server on port {}", port);

    let state = AppState::with_sessions(
        SessionRegistry::with_idle_timeout(config.session_idle),
        ReportBuilder::from_config(config),
    );
    let app = api::create_router(state);

    let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port)).await?;
    tracing::info!("Lumber ledger listening on http://127.0.0.1:{}", port);

    axum::serve(listener, app).await?;
    Ok(())
}

async fn report(config: &AppConfig, input: PathBuf, output: Option<PathBuf>) -> anyhow::Result<()> {
    let content = tokio::fs::read_to_string(&input)
        .await
        .with_context(|| format!("Failed to read {}", input.display()))?;
    let inputs: Vec<NewRecordInput> =
        serde_json::from_str(&content).context("Failed to parse record list")?;

    let mut store = RecordStore::new();
    for (i, record) in inputs.into_iter().enumerate() {
        if let Err(e) = store.append(record) {
            tracing::warn!("Skipping record {}: {}", i + 1, e);
        }
    }
    anyhow::ensure!(!store.is_empty(), "No valid records to export");

    let builder = ReportBuilder::from_config(config);
    let today = chrono::Local::now().date_naive();
    let report = builder.export(store.list(), today).await?;

    let path = output.unwrap_or_else(|| PathBuf::from(&report.file_name));
    tokio::fs::write(&path, &report.bytes)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;

    println!("Wrote {} ({} records)", path.display(), store.len());
    Ok(())
}
