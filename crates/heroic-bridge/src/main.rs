//! Heroic Crafting bridge binary.
//!
//! The host module shells out to this binary to resolve a payment. It
//! reads one JSON [`request::PaymentRequest`] from stdin and writes the
//! resulting `PaymentOutcome` as one line of JSON to stdout. Logs go to
//! stderr so they never mix with the response.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `HEROIC_CONFIG`, else `heroic-crafting.yaml`
//!    in the working directory, else defaults
//! 2. Initialize structured logging at the configured level
//! 3. Read and resolve the request
//! 4. Write the outcome

mod error;
mod request;

use std::io::{Read, Write};
use std::path::PathBuf;

use anyhow::Context;
use heroic_crafting::CraftingConfig;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::BridgeError;
use crate::request::PaymentRequest;

/// Environment variable naming the configuration file.
const CONFIG_PATH_ENV: &str = "HEROIC_CONFIG";

/// Configuration file read when `HEROIC_CONFIG` is unset.
const DEFAULT_CONFIG_PATH: &str = "heroic-crafting.yaml";

fn main() -> anyhow::Result<()> {
    let config = load_config().context("loading configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&config.logging.level).unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();

    info!(
        platinum_policy = ?config.accounting.platinum_policy,
        default_payment_policy = ?config.accounting.default_payment_policy,
        custom_schedule = config.accounting.hourly_spending_limit.is_some(),
        "heroic-bridge starting"
    );

    let accounting = config.accounting().context("building accounting context")?;

    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .context("reading request from stdin")?;
    let request: PaymentRequest = serde_json::from_str(&input).context("parsing request")?;

    let outcome = request::resolve(
        &accounting,
        config.accounting.default_payment_policy,
        request,
    )?;
    info!(
        can_pay = outcome.can_pay,
        remove_copper = outcome.remove_copper,
        trove_updates = outcome.trove_updates.len(),
        "request resolved"
    );

    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer(&mut stdout, &outcome).map_err(BridgeError::from)?;
    writeln!(stdout).map_err(BridgeError::from)?;
    Ok(())
}

/// Load configuration.
///
/// An explicit `HEROIC_CONFIG` path must exist. The default path is
/// optional.
fn load_config() -> Result<CraftingConfig, BridgeError> {
    if let Some(path) = std::env::var_os(CONFIG_PATH_ENV) {
        return Ok(CraftingConfig::from_file(&PathBuf::from(path))?);
    }

    let default_path = PathBuf::from(DEFAULT_CONFIG_PATH);
    if default_path.exists() {
        Ok(CraftingConfig::from_file(&default_path)?)
    } else {
        let mut config = CraftingConfig::default();
        config.apply_env_overrides();
        Ok(config)
    }
}
