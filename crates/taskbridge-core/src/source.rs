//! Where outline text comes from and where the summary goes

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

/// A document that can be read and replaced as a whole
pub trait OutlineSource {
    fn read(&self) -> Result<String>;

    fn replace(&self, text: &str) -> Result<()>;
}

/// Receives the short status message at the end of a sync
pub trait Notifier {
    fn notify(&self, message: &str);
}

/// Outline stored in a file on disk
#[derive(Debug, Clone)]
pub struct FileOutline {
    path: PathBuf,
}

impl FileOutline {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl OutlineSource for FileOutline {
    fn read(&self) -> Result<String> {
        std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read outline: {:?}", self.path))
    }

    fn replace(&self, text: &str) -> Result<()> {
        debug!("Writing {} bytes to {:?}", text.len(), self.path);
        std::fs::write(&self.path, text)
            .with_context(|| format!("Failed to write outline: {:?}", self.path))
    }
}
