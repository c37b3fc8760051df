//! CLI entrypoint: snapshot holders for one environment and register them.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use snapshot_registrar::blockchain::{AccountSource, ApiProvider, ProxyProvider};
use snapshot_registrar::config::{SnapshotConfig, DEFAULT_CONFIG_PATH};
use snapshot_registrar::snapshot::{self, export, ScanOptions, SnapshotSubmitter, BATCH_SIZE};
use snapshot_registrar::utils::init_logging;
use snapshot_registrar::wallet::{Account, AdminSigner, DEFAULT_PEM_PATH};
use snapshot_registrar::Error;

#[derive(Debug, Parser)]
#[command(name = "register-snapshot", author, version, about = "Snapshot holders and register them in the membership contract", long_about = None)]
struct Args {
    /// Environment section of the configuration file (e.g. devnet, mainnet)
    env: Option<String>,

    /// Path to the configuration store (JSON)
    #[arg(short, long, env = "SNAPSHOT_CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Path to the administrative wallet PEM
    #[arg(long, env = "SNAPSHOT_PEM", default_value = DEFAULT_PEM_PATH)]
    pem: PathBuf,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Scan and report without signing or sending anything
    #[arg(long)]
    dry_run: bool,

    /// Also write the snapshot to this CSV file
    #[arg(long, value_name = "CSV")]
    export: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level);

    let env = args.env.clone().unwrap_or_default();
    let config = match SnapshotConfig::from_file(&args.config, &env) {
        | Ok(config) => config,
        | Err(Error::ConfigError(reason)) => {
            log::error!("Invalid '{}' config: {}", env, reason);
            return Ok(());
        }
        | Err(e) => return Err(anyhow::Error::new(e).context("Failed to load configuration")),
    };

    let api = ApiProvider::new(&config.api_url).context("Failed to create API client")?;
    let proxy = ProxyProvider::new(&config.proxy_url).context("Failed to create proxy client")?;

    let members = snapshot::take_snapshot(&api, &config, ScanOptions::default())
        .await
        .context("Holder scan failed")?;
    log::info!("{} have been included in the snapshot.", members.len());

    if let Some(path) = &args.export {
        export::write_csv(path, members.members()).context("Failed to export snapshot")?;
        log::info!("Snapshot written to {}", path.display());
    }

    let batch_count = snapshot::batches(members.members(), BATCH_SIZE).len();
    if args.dry_run {
        log::info!("Dry run: {} batches would be registered in {}", batch_count, config.contract_address);
        return Ok(());
    }

    log::info!("Registering snapshot batches in smart contract ...");
    let signer = AdminSigner::from_pem_file(&args.pem).context("Failed to load admin key")?;
    let nonce = api
        .account_nonce(signer.address())
        .await
        .context("Failed to fetch admin account")?;
    let mut account = Account::new(signer.address().clone(), nonce);
    log::info!("Sending from {} starting at nonce {}", account.address(), nonce);

    let submitter = SnapshotSubmitter::new(&proxy, &signer, config.contract_address.clone());
    submitter
        .submit_all(&mut account, members.members(), BATCH_SIZE)
        .await
        .context("Batch registration failed")?;

    log::info!("Done! Snapshot of total {} members registered!", members.len());
    Ok(())
}
