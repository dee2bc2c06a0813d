//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)

use serde::Serialize;

use taskbridge_core::{Collection, Notifier, SyncResult, TagMapping, TaskRecord};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    /// The output format
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Print any serializable value as pretty JSON
    pub fn print_json<T: Serialize + ?Sized>(&self, value: &T) {
        match serde_json::to_string_pretty(value) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("Failed to serialize output: {}", e),
        }
    }

    /// Print the result of a sync pass
    pub fn print_sync_result(&self, result: &SyncResult) {
        if let Some(text) = self.sync_result_text(result) {
            println!("{}", text);
        }
    }

    /// Machine-readable sync result; human output gets the summary through
    /// the notifier instead
    fn sync_result_text(&self, result: &SyncResult) -> Option<String> {
        match self.format {
            OutputFormat::Human => None,
            OutputFormat::Json => serde_json::to_string_pretty(result).ok(),
            OutputFormat::Quiet => Some(format!(
                "{} {} {} {}",
                result.created, result.updated, result.completed, result.failed
            )),
        }
    }

    /// Print remote collections
    pub fn print_collections(&self, collections: &[Collection]) {
        match self.format {
            OutputFormat::Human => {
                if collections.is_empty() {
                    println!("No collections found.");
                    return;
                }
                for collection in collections {
                    println!("{} | {}", collection.id, collection.name);
                }
                println!("\n{} collection(s)", collections.len());
            }
            OutputFormat::Json => self.print_json(collections),
            OutputFormat::Quiet => {
                for collection in collections {
                    println!("{}", collection.id);
                }
            }
        }
    }

    /// Print tag mappings in match order
    pub fn print_mappings(&self, mappings: &[TagMapping]) {
        match self.format {
            OutputFormat::Human => {
                if mappings.is_empty() {
                    println!("No tag mappings configured.");
                    return;
                }
                for (i, mapping) in mappings.iter().enumerate() {
                    let name = if mapping.name.is_empty() {
                        String::new()
                    } else {
                        format!(" ({})", mapping.name)
                    };
                    println!(
                        "{}. {} -> {}{}",
                        i + 1,
                        mapping.tag,
                        mapping.collection_id,
                        name
                    );
                }
            }
            OutputFormat::Json => self.print_json(mappings),
            OutputFormat::Quiet => {
                for mapping in mappings {
                    println!("{}\t{}", mapping.tag, mapping.collection_id);
                }
            }
        }
    }

    /// Print parsed task records
    pub fn print_tasks(&self, tasks: &[TaskRecord]) {
        match self.format {
            OutputFormat::Human => {
                if tasks.is_empty() {
                    println!("No tasks found.");
                    return;
                }
                for task in tasks {
                    println!("{}", describe_task(task));
                }
                println!("\n{} task(s)", tasks.len());
            }
            OutputFormat::Json => self.print_json(tasks),
            OutputFormat::Quiet => {
                for task in tasks {
                    println!("{}", task.line_number);
                }
            }
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("✓ {}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"status": "success", "message": message})
                );
            }
            OutputFormat::Quiet => {}
        }
    }
}

impl Notifier for Output {
    fn notify(&self, message: &str) {
        // JSON mode prints the full result instead
        if self.format == OutputFormat::Human {
            println!("{}", message);
        }
    }
}

/// One-line description of a parsed task
fn describe_task(task: &TaskRecord) -> String {
    let checkbox = if task.is_completed { "[x]" } else { "[ ]" };
    let mut line = format!(
        "{:>4} {}{} {} (p{})",
        task.line_number + 1,
        "  ".repeat(task.indent_level),
        checkbox,
        task.title,
        task.priority.tier()
    );

    if !task.tags.is_empty() {
        line.push_str(&format!(" {}", task.tags.join(" ")));
    }
    if let Some(due) = task.due_date {
        line.push_str(&format!(" due {}", due));
    }
    if let Some(scheduled) = task.scheduled_date {
        line.push_str(&format!(" scheduled {}", scheduled));
    }
    if let Some(ref id) = task.remote_id {
        line.push_str(&format!(" [{}]", id));
    }
    line
}
