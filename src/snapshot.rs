//! Baseline snapshot file and its companion HTML report.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::audit::ResultSet;

pub const DEFAULT_SNAPSHOT_FILE: &str = "lighthouse.json";

/// Filesystem location of a baseline snapshot.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Read and parse the baseline.
    pub fn load(&self) -> Result<ResultSet> {
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Error reading file {}", self.path.display()))?;
        ResultSet::from_json(&content)
            .with_context(|| format!("Error reading file {}", self.path.display()))
    }

    /// Replace the baseline with `json`, written verbatim.
    pub fn write(&self, json: &str) -> Result<()> {
        write_file(&self.path, json)
    }

    /// `<snapshot>.html`, e.g. `lighthouse.json.html`.
    pub fn report_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_os_string();
        name.push(".html");
        PathBuf::from(name)
    }

    pub fn write_report(&self, html: &str) -> Result<PathBuf> {
        let path = self.report_path();
        write_file(&path, html)?;
        Ok(path)
    }
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).with_context(|| format!("Error saving file {}", path.display()))
}
