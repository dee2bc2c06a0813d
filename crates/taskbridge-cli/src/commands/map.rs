//! Tag mapping command handlers

use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use taskbridge_core::{normalize_tag, Config, TagMapping};

use crate::output::Output;

fn load(config_path: Option<&PathBuf>) -> Result<Config> {
    Config::load_with_cli_override(config_path).context("Failed to load configuration")
}

fn save(config: &Config, config_path: Option<&PathBuf>) -> Result<()> {
    let save_path = config_path
        .cloned()
        .unwrap_or_else(Config::config_file_path);
    config
        .save_to_path(&save_path)
        .context("Failed to save configuration")
}

/// Add a mapping, or retarget the tag if it is already mapped
pub fn add(
    tag: String,
    collection_id: String,
    name: Option<String>,
    config_path: Option<&PathBuf>,
    output: &Output,
) -> Result<()> {
    let mut config = load(config_path)?;
    let tag = normalize_tag(&tag);
    let name = name
        .or_else(|| config.collection_name(&collection_id).map(str::to_string))
        .unwrap_or_default();

    let replaced = config.add_mapping(TagMapping::new(tag.clone(), collection_id.clone(), name));
    save(&config, config_path)?;

    let verb = if replaced { "Updated" } else { "Added" };
    output.success(&format!("{} mapping {} -> {}", verb, tag, collection_id));
    Ok(())
}

/// Remove the mapping for a tag
pub fn remove(tag: String, config_path: Option<&PathBuf>, output: &Output) -> Result<()> {
    let mut config = load(config_path)?;
    let tag = normalize_tag(&tag);

    if !config.remove_mapping(&tag) {
        bail!("No mapping for tag '{}'", tag);
    }
    save(&config, config_path)?;

    output.success(&format!("Removed mapping for {}", tag));
    Ok(())
}

/// List mappings in match order
pub fn list(config_path: Option<&PathBuf>, output: &Output) -> Result<()> {
    let config = load(config_path)?;
    output.print_mappings(&config.tag_mappings);
    Ok(())
}
