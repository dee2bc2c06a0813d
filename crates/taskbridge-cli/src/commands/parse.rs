//! Parse command handler

use std::path::Path;

use anyhow::{Context, Result};

use taskbridge_core::outline::parse_content;

use crate::output::Output;

/// Show what the codec extracts from a file, without touching the network
pub fn parse(file: &Path, output: &Output) -> Result<()> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read outline: {:?}", file))?;

    output.print_tasks(&parse_content(&content));
    Ok(())
}
