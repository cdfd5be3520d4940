//! Comparison report - console rendering and JSON summary

use anyhow::{Context, Result};
use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::comparator::{Action, Comparison, Failure};

/// Persisted record of one gated run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    /// Audited URL
    pub url: String,
    /// Baseline snapshot path
    pub snapshot: String,
    /// Timestamp
    pub timestamp: String,
    /// Whether the gate passed
    pub passed: bool,
    /// Full comparison
    pub comparison: Comparison,
    /// Actions that were confirmed and applied
    pub accepted: Vec<Action>,
}

impl RunSummary {
    pub fn new(url: &str, snapshot: &Path, comparison: Comparison, accepted: Vec<Action>) -> Self {
        Self {
            url: url.to_string(),
            snapshot: snapshot.display().to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            passed: comparison.passed(),
            comparison,
            accepted,
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).with_context(|| format!("Error saving file {}", path.display()))
    }
}

/// Header announcing how many checks regressed.
pub fn print_failure_header(cmp: &Comparison) {
    println!(
        "\n Lighthouse audit found {} error(s):",
        cmp.failures.len().to_string().red()
    );
}

/// One regressed check, with its title and description.
pub fn print_failure(failure: &Failure) {
    println!(
        "\n {} {} ({}).",
        "Error on".white(),
        failure.title.yellow(),
        failure.id
    );
    println!(
        " The previous score ({}) is greater than the actual score ({})",
        fmt_score(failure.baseline_score).red(),
        fmt_score(failure.current_score).red()
    );
    if !failure.description.is_empty() {
        println!(" {}", failure.description);
    }
}

pub fn print_totals(cmp: &Comparison) {
    println!(
        "\n Previous total score ({}) greater than actual total score ({})\n",
        format!("{:.2}", cmp.baseline_total).red(),
        format!("{:.2}", cmp.current_total).red()
    );
}

/// New-field warning (if any) and the per-class counts.
pub fn print_counts(cmp: &Comparison) {
    if cmp.new_fields > 0 {
        println!(
            " Warning: No tested items with score ({})\n",
            cmp.new_fields.to_string().red()
        );
    }

    println!(
        " {} analyzed scores: {} skipped scores, {} ignored scores and {} error(s) found",
        cmp.analyzed.to_string().white(),
        cmp.skipped.to_string().blue(),
        cmp.ignored.to_string().yellow(),
        cmp.failures.len().to_string().red()
    );
}

pub fn print_passed(cmp: &Comparison) {
    println!(
        "{} Total score: {}",
        " Lighthouse audition passed.".green(),
        format!("{:.2}", cmp.current_total).yellow()
    );
}

/// A fraction as a percentage, rounded to two decimals (`0.07` -> `7%`).
pub(crate) fn fmt_percent(fraction: f64) -> String {
    format!("{}%", (fraction * 10_000.0).round() / 100.0)
}

fn fmt_score(score: f64) -> String {
    // lighthouse scores are two-decimal fractions; trim float noise only
    let s = format!("{:.4}", score);
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}
