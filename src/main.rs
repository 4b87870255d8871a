//! Troubleshoot wizard host binary.
//!
//! Loads the wizard catalog and the saved diagnosis history, then prints both
//! as one JSON document to stdout. All logs go to stderr.
//!
//! Coverage is excluded because the main function only wires together
//! components that are tested on their own.

// Enable the coverage attribute when running with nightly for llvm-cov exclusions
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use tracing_subscriber::filter::EnvFilter;
use troubleshoot_wizard::catalog::{DirectorySource, EmbeddedSource, GraphSource, WizardCatalog};
use troubleshoot_wizard::config::{Config, DEFAULT_LOG_LEVEL};
use troubleshoot_wizard::error::AppError;
use troubleshoot_wizard::history::DiagnosisStore;
use troubleshoot_wizard::storage::SqliteStorage;

#[cfg_attr(coverage_nightly, coverage(off))]
#[tokio::main]
async fn main() {
    let config = Config::from_env();
    let filter = config
        .as_ref()
        .map_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL), Config::env_filter);
    init_logging(filter);

    tracing::info!("troubleshoot-wizard starting...");

    let result = match config {
        Ok(config) => run(config).await,
        Err(e) => Err(e.into()),
    };
    if let Err(e) = result {
        tracing::error!("{e}");
        std::process::exit(1);
    }

    tracing::info!("troubleshoot-wizard done");
}

/// Install the stderr subscriber (stdout carries the export).
#[cfg_attr(coverage_nightly, coverage(off))]
fn init_logging(filter: EnvFilter) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false);
    if std::env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json")) {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
async fn run(config: Config) -> Result<(), AppError> {
    tracing::info!(
        database = %config.database_path,
        max_records = config.max_records,
        strict_graphs = config.strict_graphs,
        "Configuration loaded"
    );

    let directory = config.wizard_dir.as_deref().map(DirectorySource::new);
    let mut sources: Vec<&dyn GraphSource> = Vec::with_capacity(2);
    sources.push(&EmbeddedSource);
    if let Some(dir) = &directory {
        sources.push(dir);
    }
    let catalog = WizardCatalog::load_all(&sources, config.dead_end_policy());
    for declined in catalog.declined() {
        tracing::warn!(wizard = %declined.wizard, error = %declined.error, "Wizard not offered");
    }

    let storage = SqliteStorage::new(&config.database_path, config.history_key.clone()).await?;
    let store = DiagnosisStore::open(storage, config.max_records).await;

    let export = serde_json::json!({
        "wizards": catalog.summaries(),
        "declined": catalog
            .declined()
            .iter()
            .map(|d| serde_json::json!({ "wizard": d.wizard, "error": d.error.to_string() }))
            .collect::<Vec<_>>(),
        "history": store.list(),
    });
    println!("{}", serde_json::to_string_pretty(&export)?);
    Ok(())
}
