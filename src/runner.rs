//! Lighthouse CLI runner - produces the current audit for a URL

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Instant;

pub const DEFAULT_LIGHTHOUSE_BIN: &str = "lighthouse";

/// Raw documents produced by one audit run.
#[derive(Debug, Clone)]
pub struct AuditOutput {
    /// Lighthouse JSON result, kept verbatim for the snapshot file
    pub json: String,
    /// Rendered HTML report, kept verbatim for the failure report
    pub html: String,
}

/// Anything that can audit a URL.
pub trait Auditor {
    fn audit(&self, url: &str, categories: &[String]) -> Result<AuditOutput>;
}

/// Runs the `lighthouse` executable against headless Chrome.
pub struct LighthouseRunner {
    binary: PathBuf,
    chrome_flags: Vec<String>,
}

impl Default for LighthouseRunner {
    fn default() -> Self {
        Self::new(DEFAULT_LIGHTHOUSE_BIN)
    }
}

impl LighthouseRunner {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            chrome_flags: vec!["--headless".to_string()],
        }
    }

    const OUTPUT_STEM: &'static str = "audit";

    fn command(&self, url: &str, categories: &[String], output_dir: &Path) -> Command {
        let mut cmd = Command::new(&self.binary);

        cmd.arg(url);
        cmd.arg("--output=json").arg("--output=html");
        cmd.arg(format!(
            "--output-path={}",
            output_dir.join(Self::OUTPUT_STEM).display()
        ));

        if !categories.is_empty() {
            cmd.arg(format!("--only-categories={}", categories.join(",")));
        }

        if !self.chrome_flags.is_empty() {
            cmd.arg(format!("--chrome-flags={}", self.chrome_flags.join(" ")));
        }

        cmd.arg("--quiet");
        cmd
    }
}

impl Auditor for LighthouseRunner {
    fn audit(&self, url: &str, categories: &[String]) -> Result<AuditOutput> {
        let output_dir = tempfile::tempdir().context("Failed to create audit output directory")?;
        let start = Instant::now();

        tracing::debug!(binary = %self.binary.display(), url, "launching lighthouse");
        let output = self
            .command(url, categories, output_dir.path())
            .output()
            .with_context(|| format!("Failed to execute {}", self.binary.display()))?;

        tracing::debug!(
            elapsed_ms = start.elapsed().as_millis() as u64,
            status = ?output.status,
            "lighthouse finished"
        );

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!(
                "Error getting lighthouse report (exit status {}): {}",
                output.status.code().unwrap_or(-1),
                stderr.trim()
            );
        }

        // with several --output formats, lighthouse writes <path>.report.<ext>
        let read = |ext: &str| -> Result<String> {
            let path = output_dir
                .path()
                .join(format!("{}.report.{}", Self::OUTPUT_STEM, ext));
            fs::read_to_string(&path)
                .with_context(|| format!("Lighthouse produced no {} report", ext))
        };

        Ok(AuditOutput {
            json: read("json")?,
            html: read("html")?,
        })
    }
}
