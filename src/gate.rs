//! Gate - runs the audit, compares it with the snapshot and applies the
//! confirmed follow-up actions.

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::PathBuf;

use crate::audit::ResultSet;
use crate::comparator::{self, Action, Comparison};
use crate::confirm::Confirmer;
use crate::ignore::IgnoreList;
use crate::options::AuditOptions;
use crate::report::{self, RunSummary};
use crate::runner::{AuditOutput, Auditor};
use crate::snapshot::SnapshotStore;

/// Final verdict of a gated run
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Passed { total: f64 },
    Failed { failures: usize, report: PathBuf },
}

impl Outcome {
    pub fn passed(&self) -> bool {
        matches!(self, Outcome::Passed { .. })
    }

    pub fn exit_code(&self) -> u8 {
        if self.passed() {
            0
        } else {
            1
        }
    }
}

/// Coordinates one audit-and-compare run
pub struct Gate<A, C> {
    options: AuditOptions,
    auditor: A,
    confirmer: C,
}

impl<A: Auditor, C: Confirmer> Gate<A, C> {
    pub fn new(options: AuditOptions, auditor: A, confirmer: C) -> Self {
        Self {
            options,
            auditor,
            confirmer,
        }
    }

    pub fn confirmer(&self) -> &C {
        &self.confirmer
    }

    /// Run the audit and decide pass/fail.
    pub fn run(&mut self) -> Result<Outcome> {
        let opts = &self.options;

        if opts.debug {
            println!(" Lighthouse audit info: {}", "Debug mode".yellow());
        }
        println!(" Auditing {}", opts.url.yellow());
        println!(" Categories: {}", opts.categories.join(", ").yellow());
        println!(
            " Running with variability of {}",
            report::fmt_percent(opts.variability).yellow()
        );

        let output = self
            .auditor
            .audit(&opts.url, &opts.categories)
            .context("Error getting lighthouse report")?;
        let current =
            ResultSet::from_json(&output.json).context("Error reading lighthouse report")?;
        tracing::debug!(checks = current.len(), "audit parsed");

        let store = SnapshotStore::new(&opts.snapshot);
        let baseline = if store.exists() {
            store.load()?
        } else {
            println!(
                " Not snapshot file found. {}",
                format!("Saving {} with current audit", store.path().display()).yellow()
            );
            store.write(&output.json)?;
            ResultSet::default()
        };

        let mut ignore = match IgnoreList::load(&opts.ignore_file)? {
            Some(list) => {
                println!(" Using ignore file");
                list
            }
            None => IgnoreList::default(),
        };
        tracing::debug!(baseline = baseline.len(), ignored = ignore.len(), "inputs loaded");

        let cmp = comparator::evaluate(&baseline, &current, &ignore, opts.variability);
        let accepted = self.settle(&cmp, &mut ignore, &store, &output)?;

        if let Some(ref path) = self.options.summary {
            RunSummary::new(&self.options.url, store.path(), cmp.clone(), accepted).save(path)?;
            tracing::info!(path = %path.display(), "summary written");
        }

        if !cmp.passed() {
            let report = store.write_report(&output.html)?;
            println!(
                " [>] Saving report in {}",
                report.display().to_string().white()
            );
            return Ok(Outcome::Failed {
                failures: cmp.failures.len(),
                report,
            });
        }

        report::print_passed(&cmp);
        Ok(Outcome::Passed {
            total: cmp.current_total,
        })
    }

    /// Print the comparison, resolve its actions and persist what was accepted.
    fn settle(
        &mut self,
        cmp: &Comparison,
        ignore: &mut IgnoreList,
        store: &SnapshotStore,
        output: &AuditOutput,
    ) -> Result<Vec<Action>> {
        let mut accepted = vec![];
        let mut ignore_changed = false;

        if !cmp.passed() {
            report::print_failure_header(cmp);
            for failure in &cmp.failures {
                report::print_failure(failure);
                let question = format!(
                    "Do you want to add {} to ignored elements?",
                    failure.id.yellow()
                );
                if self.confirmer.confirm(&question)? {
                    ignore_changed |= ignore.add(failure.id.as_str());
                    accepted.push(Action::IgnoreCheck(failure.id.clone()));
                }
            }
            report::print_totals(cmp);
        }

        report::print_counts(cmp);

        if self.options.debug || ignore_changed {
            println!(
                " > Updating {}...",
                self.options.ignore_file.display().to_string().white()
            );
            ignore.save(&self.options.ignore_file)?;
        }

        if cmp.actions().contains(&Action::OverwriteBaseline)
            && self
                .confirmer
                .confirm("[?] Do you want to update the snapshot?")?
        {
            println!(
                " > Updating snapshot {}...",
                store.path().display().to_string().white()
            );
            store.write(&output.json)?;
            accepted.push(Action::OverwriteBaseline);
        }

        tracing::debug!(accepted = accepted.len(), "actions resolved");
        Ok(accepted)
    }
}
