//! The ignore list side file (`.lighthouseignore`).

use anyhow::{Context, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

pub const DEFAULT_IGNORE_FILE: &str = ".lighthouseignore";

/// Check identifiers exempted from failure.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IgnoreList {
    checks: Vec<String>,
}

impl IgnoreList {
    pub fn new<I, S>(checks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut list = Self::default();
        for check in checks {
            list.add(check);
        }
        list
    }

    /// Load from `path`. `None` when the file does not exist.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e).with_context(|| format!("Error reading file {}", path.display()))
            }
        };
        let checks: Vec<String> = serde_json::from_str(&content)
            .with_context(|| format!("Error reading file {}", path.display()))?;

        Ok(Some(Self::new(checks)))
    }

    /// Write as a compact JSON array.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string(&self.checks)?;
        fs::write(path, json).with_context(|| format!("Error saving file {}", path.display()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.checks.iter().any(|c| c == id)
    }

    /// Append `id` unless already present. Returns whether it was added.
    pub fn add(&mut self, id: impl Into<String>) -> bool {
        let id = id.into();
        if self.contains(&id) {
            return false;
        }
        self.checks.push(id);
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.checks.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.checks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }
}
