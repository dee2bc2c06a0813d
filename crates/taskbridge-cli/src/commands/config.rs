//! Config command handlers

use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use taskbridge_core::Config;

use crate::output::{Output, OutputFormat};

const NOT_SET: &str = "(not set)";

/// Show current configuration
pub fn show(config_path: Option<&PathBuf>, output: &Output) -> Result<()> {
    let config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;
    let effective_path = config_path
        .cloned()
        .unwrap_or_else(Config::config_file_path);

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "api_token": config.masked_token(),
                    "base_url": config.effective_base_url(),
                    "log_file": config.log_file,
                    "tag_mappings": config.tag_mappings,
                    "config_file": effective_path,
                })
            );
        }
        OutputFormat::Quiet => {
            println!("{}", effective_path.display());
        }
        OutputFormat::Human => {
            println!("Configuration:");
            println!(
                "  api_token:    {}",
                config.masked_token().unwrap_or_else(|| NOT_SET.to_string())
            );
            println!("  base_url:     {}", config.effective_base_url());
            println!(
                "  log_file:     {}",
                config
                    .log_file
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| NOT_SET.to_string())
            );
            println!("  tag_mappings: {}", config.tag_mappings.len());
            println!();
            println!("Config file: {}", effective_path.display());
        }
    }

    Ok(())
}

/// `None` for the values that clear a setting
fn optional(value: &str) -> Option<String> {
    if value.is_empty() || value == "none" {
        None
    } else {
        Some(value.to_string())
    }
}

/// Set a configuration value
pub fn set(
    key: String,
    value: String,
    config_path: Option<&PathBuf>,
    output: &Output,
) -> Result<()> {
    let mut config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;

    match key.as_str() {
        "api_token" => {
            config.api_token = optional(&value);
        }
        "base_url" => {
            config.base_url = optional(&value);
        }
        "log_file" => {
            config.log_file = optional(&value).map(PathBuf::from);
        }
        _ => {
            bail!(
                "Unknown configuration key: '{}'\n\
                 Valid keys: api_token, base_url, log_file",
                key
            );
        }
    }

    // Save to the CLI-specified path or default
    let save_path = config_path
        .cloned()
        .unwrap_or_else(Config::config_file_path);
    config
        .save_to_path(&save_path)
        .context("Failed to save configuration")?;

    // Never echo the token back
    let shown = if key == "api_token" {
        config.masked_token().unwrap_or_else(|| NOT_SET.to_string())
    } else {
        value
    };
    output.success(&format!("Set {} = {}", key, shown));

    Ok(())
}
