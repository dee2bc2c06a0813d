//! taskbridge CLI
//!
//! Command-line interface for syncing a task outline with Todoist.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use taskbridge_core::Config;

mod commands;
mod logging;
mod output;

use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "taskbridge")]
#[command(about = "taskbridge - Sync a plain-text task outline with Todoist")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use this config file instead of the default
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sync an outline file: pull completions, then push tasks
    Sync {
        /// Outline file to sync
        file: PathBuf,
    },
    /// List remote collections (projects)
    Collections {
        /// Fetch from the server and update the cache
        #[arg(short, long)]
        refresh: bool,
    },
    /// Manage tag to collection mappings
    Map {
        #[command(subcommand)]
        command: MapCommands,
    },
    /// Show or set configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
    /// Show the tasks found in an outline file
    Parse {
        /// Outline file to read
        file: PathBuf,
    },
}

#[derive(Subcommand)]
enum MapCommands {
    /// Map a tag to a collection
    Add {
        /// Tag, with or without the leading '#'
        tag: String,
        /// Target collection ID
        collection_id: String,
        /// Display name (defaults to the cached collection name)
        #[arg(short, long)]
        name: Option<String>,
    },
    /// Remove the mapping for a tag
    #[command(alias = "rm")]
    Remove {
        /// Tag, with or without the leading '#'
        tag: String,
    },
    /// List mappings in match order
    #[command(alias = "ls")]
    List,
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (api_token, base_url, log_file)
        key: String,
        /// Configuration value
        value: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));
    let config_path = cli.config.as_ref();

    // A broken config file still gets reported by the command itself
    let log_config = Config::load_with_cli_override(config_path).unwrap_or_default();
    logging::init(&log_config, cli.verbose);

    match cli.command {
        Commands::Sync { file } => commands::sync::sync(&file, config_path, &output).await,
        Commands::Collections { refresh } => {
            commands::collections::list(refresh, config_path, &output).await
        }
        Commands::Map { command } => handle_map_command(command, config_path, &output),
        Commands::Config { command } => handle_config_command(command, config_path, &output),
        Commands::Parse { file } => commands::parse::parse(&file, &output),
    }
}

fn handle_map_command(
    command: MapCommands,
    config_path: Option<&PathBuf>,
    output: &Output,
) -> Result<()> {
    match command {
        MapCommands::Add {
            tag,
            collection_id,
            name,
        } => commands::map::add(tag, collection_id, name, config_path, output),
        MapCommands::Remove { tag } => commands::map::remove(tag, config_path, output),
        MapCommands::List => commands::map::list(config_path, output),
    }
}

fn handle_config_command(
    command: Option<ConfigCommands>,
    config_path: Option<&PathBuf>,
    output: &Output,
) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::show(config_path, output),
        Some(ConfigCommands::Set { key, value }) => {
            commands::config::set(key, value, config_path, output)
        }
    }
}
