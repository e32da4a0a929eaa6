use std::path::{Path, PathBuf};

use eyre::Result;
use tracing::debug;

/// A rendered source file that can be written below a base directory.
pub trait GeneratedFile {
    /// Get the file path relative to the base directory
    fn path(&self, base: &Path) -> PathBuf;

    /// Get the rules for writing this file
    fn rules(&self) -> FileRules {
        FileRules::default()
    }

    /// Render the file content
    fn render(&self) -> crate::Result<String>;

    /// Write the file to disk
    fn write(&self, base: &Path) -> Result<WriteResult> {
        let path = self.path(base);

        if self.rules().overwrite == Overwrite::IfMissing && path.exists() {
            debug!(path = %path.display(), "file exists, skipping");
            return Ok(WriteResult::Skipped);
        }

        let content = self.render()?;
        write_file(&path, &content)?;
        debug!(path = %path.display(), bytes = content.len(), "wrote file");
        Ok(WriteResult::Written)
    }
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;
    Ok(())
}

/// Result of a write operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteResult {
    /// File was written
    Written,
    /// File was skipped (already exists)
    Skipped,
}

/// Rules that determine how a file should be written
#[derive(Debug, Clone, Default)]
pub struct FileRules {
    pub overwrite: Overwrite,
}

/// How to handle existing files
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Overwrite {
    /// Always overwrite (generated code)
    #[default]
    Always,
    /// Only create if file doesn't exist (stubs)
    IfMissing,
}
