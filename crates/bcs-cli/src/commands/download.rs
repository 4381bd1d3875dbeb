//! `bcs download` command implementation
//!
//! Saves the raw bulk stream for one customer to a local file, for later
//! use with `bcs parse`.

use bcs_client::Client;
use colored::Colorize;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};

use crate::config::CliConfig;
use crate::error::Result;
use crate::progress::{create_download_spinner, format_bytes};

/// Download the bulk stream for `customer_id` into `filename`
pub async fn run(
    config: &CliConfig,
    customer_id: String,
    api_key: String,
    filename: PathBuf,
    timeout_secs: u64,
) -> Result<()> {
    let client_config = config.client_config(&api_key, Duration::from_secs(timeout_secs))?;
    let client = Client::new(client_config)?;

    info!(customer_id = %customer_id, file = %filename.display(), "Starting bulk download");

    let file = tokio::fs::File::create(&filename).await?;
    let spinner = create_download_spinner(&format!("Downloading to {}", filename.display()));
    let mut writer = spinner.wrap_async_write(file);

    let result = client.bulk().download(&customer_id, &mut writer).await;
    spinner.finish_and_clear();
    drop(writer);

    let written = match result {
        Ok(written) => written,
        Err(err) => {
            // Partial downloads are removed.
            if let Err(remove_err) = tokio::fs::remove_file(&filename).await {
                warn!(error = %remove_err, file = %filename.display(), "Could not remove partial download");
            }
            return Err(err.into());
        },
    };

    println!(
        "{} {} to {}",
        "✓".green(),
        format_bytes(written),
        filename.display()
    );

    Ok(())
}
