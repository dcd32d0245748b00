use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use oae_batch::BatchKind;
use oae_core::ErrorRecord;
use serde::Serialize;

/// JSON document emitted at the end of a batch run.
#[derive(Debug, Serialize)]
pub struct BatchReport<R> {
    pub generated_at: DateTime<Utc>,
    pub kind: &'static str,
    pub cancelled: bool,
    pub results: Vec<R>,
    pub errors: Vec<ErrorRecord>,
}

impl<R: Serialize> BatchReport<R> {
    pub fn new(kind: BatchKind, results: Vec<R>, errors: Vec<ErrorRecord>) -> Self {
        Self {
            generated_at: Utc::now(),
            kind: kind.as_str(),
            cancelled: false,
            results,
            errors,
        }
    }

    /// `{kind}-{YYYYmmdd-HHMMSS}.json`
    pub fn default_file_name(&self) -> String {
        format!("{}-{}.json", self.kind, self.generated_at.format("%Y%m%d-%H%M%S"))
    }

    /// Write pretty JSON to `path` (parent directories are created), or stdout when `None`.
    pub fn write(&self, path: Option<&Path>) -> Result<Option<PathBuf>> {
        let json = serde_json::to_string_pretty(self).context("failed to serialise report")?;
        match path {
            Some(path) => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    std::fs::create_dir_all(parent)
                        .with_context(|| format!("failed to create {}", parent.display()))?;
                }
                std::fs::write(path, json)
                    .with_context(|| format!("failed to write {}", path.display()))?;
                Ok(Some(path.to_path_buf()))
            }
            None => {
                println!("{json}");
                Ok(None)
            }
        }
    }
}
