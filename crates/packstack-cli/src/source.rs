//! # Pack Input
//!
//! Loads a pack document either from a local JSON file or, with
//! `--remote <ID>`, from the Packstack pack API.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use clap::Args;

use packstack_client::{PackApiConfig, PackClient};
use packstack_core::{PackData, PackId};

/// Where to read the pack from.
#[derive(Args, Debug)]
pub struct SourceArgs {
    /// Path to a pack JSON document.
    #[arg(value_name = "PACK_JSON", required_unless_present = "remote", conflicts_with = "remote")]
    pub file: Option<PathBuf>,

    /// Fetch the pack with this id from the pack API.
    #[arg(long, value_name = "ID")]
    pub remote: Option<String>,

    /// Pack API base URL (overrides PACKSTACK_API_URL / API_URL).
    #[arg(long, value_name = "URL", requires = "remote")]
    pub api_url: Option<String>,
}

/// Load the pack selected by `args`.
pub fn load_pack(args: &SourceArgs) -> Result<PackData> {
    match (&args.file, &args.remote) {
        (Some(path), _) => load_file(path),
        (None, Some(id)) => load_remote(id, args.api_url.as_deref()),
        (None, None) => bail!("either PACK_JSON or --remote <ID> is required"),
    }
}

/// Read and parse a pack JSON file.
pub fn load_file(path: &Path) -> Result<PackData> {
    if !path.exists() {
        bail!("pack file not found: {}", path.display());
    }
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read pack file: {}", path.display()))?;
    PackData::from_json(&text)
        .with_context(|| format!("failed to parse pack JSON: {}", path.display()))
}

fn load_remote(id: &str, api_url: Option<&str>) -> Result<PackData> {
    let config = match api_url {
        Some(url) => PackApiConfig::with_base_url(url)?,
        None => PackApiConfig::from_env()?,
    };
    tracing::info!(base_url = %config.base_url, pack_id = id, "fetching pack");
    let client = PackClient::new(config)?;
    let id = PackId::from(id);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;

    match runtime.block_on(client.fetch_pack(&id)) {
        Ok(Some(data)) => Ok(data),
        Ok(None) => Err(anyhow!("pack {id} not found")),
        Err(e) => {
            tracing::warn!(pack_id = %id, "pack API request failed: {e}");
            Err(anyhow!("pack {id} not found"))
        }
    }
}
