//! Collections command handler

use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use taskbridge_core::{Config, TaskApi};

use crate::output::Output;

use super::sync::client;

/// List remote collections, from the cache unless a refresh is asked for
pub async fn list(refresh: bool, config_path: Option<&PathBuf>, output: &Output) -> Result<()> {
    let mut config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;

    if !refresh && !config.cached_collections.is_empty() {
        output.print_collections(&config.cached_collections);
        return Ok(());
    }

    if config.api_token.as_deref().map_or(true, str::is_empty) {
        bail!(
            "API token not configured. Set it with:\n  \
             taskbridge config set api_token <token>"
        );
    }

    let collections = client(&config)?
        .list_collections()
        .await
        .context("Failed to fetch collections")?;

    config.cached_collections = collections;
    let save_path = config_path
        .cloned()
        .unwrap_or_else(Config::config_file_path);
    config
        .save_to_path(&save_path)
        .context("Failed to save configuration")?;

    output.print_collections(&config.cached_collections);
    Ok(())
}
