//! Logging setup
//!
//! Logs go to stderr, or to `log_file` when configured. `RUST_LOG` wins over
//! the level picked from `--verbose`.

use std::fs::File;

use tracing::info;
use tracing_subscriber::EnvFilter;

use taskbridge_core::Config;

/// Level used when `RUST_LOG` is not set
fn default_level(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "warn"
    }
}

fn env_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = default_level(verbose);
        EnvFilter::new(format!(
            "taskbridge_core={},taskbridge_cli={}",
            level, level
        ))
    })
}

/// Install the global subscriber
pub fn init(config: &Config, verbose: bool) {
    let filter = env_filter(verbose);

    if let Some(ref log_path) = config.log_file {
        match File::create(log_path) {
            Ok(log_file) => {
                // Ignore error if already initialized
                let _ = tracing_subscriber::fmt()
                    .with_env_filter(filter)
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(log_file)
                    .try_init();
                info!("Logging to {:?}", log_path);
                return;
            }
            Err(e) => {
                eprintln!("Warning: Could not create log file {:?}: {}", log_path, e);
            }
        }
    }

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_level() {
        assert_eq!(default_level(false), "warn");
        assert_eq!(default_level(true), "debug");
    }
}
