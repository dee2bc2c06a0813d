//! Sync command handler

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use taskbridge_core::{Config, FileOutline, RemoteClient, SyncEngine};

use crate::output::Output;

/// Build a client from the configured token and base URL
pub fn client(config: &Config) -> Result<RemoteClient> {
    let token = config.api_token.as_deref().unwrap_or_default();
    RemoteClient::new(config.effective_base_url(), token)
        .context("Failed to create remote client")
}

/// Run one sync pass over an outline file
pub async fn sync(file: &Path, config_path: Option<&PathBuf>, output: &Output) -> Result<()> {
    let config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;
    config.validate_for_sync()?;

    debug!(
        "Syncing {:?} with {} tag mapping(s)",
        file,
        config.tag_mappings.len()
    );

    let engine = SyncEngine::new(client(&config)?, config.tag_mappings.clone());
    let source = FileOutline::new(file);
    let result = engine.sync_source(&source, output).await?;

    output.print_sync_result(&result);

    Ok(())
}
