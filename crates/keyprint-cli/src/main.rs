use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;

use keyprint_core::aggregator::{Aggregator, ProductionConfig, RunConfig};
use keyprint_core::bridge::Adb;
use keyprint_core::inspector::{CertificateInspector, Keytool};

mod guide;
mod output;
mod report;

#[derive(Parser)]
#[command(name = "keyprint")]
#[command(
    about = "Report Android signing certificate fingerprints for cloud console registration",
    long_about = None
)]
struct Cli {
    /// Path to a production keystore to inspect
    #[arg(long)]
    keystore: Option<PathBuf>,

    /// Certificate alias inside the production keystore (default: production)
    #[arg(long)]
    alias: Option<String>,

    /// Store password for the production keystore
    #[arg(long, env = "KEYPRINT_STORE_PASS", hide_env_values = true)]
    store_pass: Option<String>,

    /// Key password (defaults to the store password)
    #[arg(long, env = "KEYPRINT_KEY_PASS", hide_env_values = true)]
    key_pass: Option<String>,

    /// Package id of an app installed on a connected device
    #[arg(long)]
    package: Option<String>,

    /// Write a plain-text fingerprint summary to this file
    #[arg(long)]
    summary: Option<PathBuf>,

    /// Emit records as JSON instead of tables
    #[arg(long)]
    json: bool,

    /// Skip the console setup walkthrough
    #[arg(long)]
    no_guide: bool,
}

impl Cli {
    fn production_config(&self) -> Result<Option<ProductionConfig>> {
        let Some(path) = self.keystore.clone() else {
            return Ok(None);
        };

        // Prompting is deliberately not supported; credentials come from
        // flags or the environment.
        let Some(store_password) = self.store_pass.clone() else {
            bail!("--keystore requires --store-pass (or KEYPRINT_STORE_PASS)");
        };

        Ok(Some(ProductionConfig {
            path,
            alias: self.alias.clone(),
            store_password,
            key_password: self.key_pass.clone(),
        }))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let inspector = Keytool::new();
    inspector
        .preflight()
        .await
        .context("keytool is required; install a JDK and make sure it is on PATH")?;

    let config = RunConfig {
        production: cli.production_config()?,
        package: cli.package.clone(),
        ..Default::default()
    };

    let outcome = Aggregator::new(inspector, Adb::new())
        .run_all(&config)
        .await;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&outcome.records)?);
    } else {
        report::render(&outcome);
    }

    if let Some(path) = &cli.summary {
        report::write_summary(path, &outcome)
            .with_context(|| format!("Failed to write summary to {}", path.display()))?;
        if !cli.json {
            output::print_success(&format!("Summary written to {}", path.display()));
        }
    }

    if !cli.no_guide && !cli.json {
        guide::print_setup_guide();
    }

    if outcome.records.is_empty() {
        output::print_error("No signing fingerprints could be extracted from any source");
        std::process::exit(1);
    }

    Ok(())
}
