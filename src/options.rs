//! Run configuration, resolved once from the command line.

use std::path::PathBuf;

use crate::ignore::DEFAULT_IGNORE_FILE;
use crate::runner::DEFAULT_LIGHTHOUSE_BIN;
use crate::snapshot::DEFAULT_SNAPSHOT_FILE;

pub const DEFAULT_CATEGORIES: &str = "performance,accessibility,best-practices,seo";

/// Options for a gated audit run
#[derive(Debug, Clone)]
pub struct AuditOptions {
    /// Address to audit
    pub url: String,
    /// Allowed fractional score regression (0.2 = 20%)
    pub variability: f64,
    /// Lighthouse categories to run
    pub categories: Vec<String>,
    /// Baseline snapshot path
    pub snapshot: PathBuf,
    /// Ignore list side file
    pub ignore_file: PathBuf,
    /// Interactive prompts, verbose logging, ignore file persistence
    pub debug: bool,
    /// Accept every proposed action without prompting
    pub assume_yes: bool,
    /// Where to write the JSON summary, if anywhere
    pub summary: Option<PathBuf>,
    /// Lighthouse executable
    pub lighthouse_bin: PathBuf,
}

impl Default for AuditOptions {
    fn default() -> Self {
        Self {
            url: String::new(),
            variability: 0.0,
            categories: parse_categories(DEFAULT_CATEGORIES),
            snapshot: PathBuf::from(DEFAULT_SNAPSHOT_FILE),
            ignore_file: PathBuf::from(DEFAULT_IGNORE_FILE),
            debug: false,
            assume_yes: false,
            summary: None,
            lighthouse_bin: PathBuf::from(DEFAULT_LIGHTHOUSE_BIN),
        }
    }
}

/// Split a comma-separated category list, dropping blanks.
pub fn parse_categories(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse a variability fraction in `[0, 1)`.
pub fn parse_variability(raw: &str) -> Result<f64, String> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| format!("`{}` is not a number", raw))?;

    if !value.is_finite() || !(0.0..1.0).contains(&value) {
        return Err(format!(
            "variability must be a fraction in [0, 1), got {}",
            value
        ));
    }

    Ok(value)
}
