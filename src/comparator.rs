//! Snapshot comparison - classifies every check of the current audit against
//! the baseline and decides pass/fail.
//!
//! Pure: no I/O, no prompts. Side effects the caller may want to perform are
//! returned as [`Action`]s.

use serde::{Deserialize, Serialize};

use crate::audit::ResultSet;
use crate::ignore::IgnoreList;

/// How a single check was classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Judgment {
    /// No baseline score to compare against
    NewField,
    /// Current score null or zero, inconclusive
    Skipped,
    /// Listed in the ignore file
    Ignored,
    Passed,
    Failed,
}

/// Judgment for one check identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckJudgment {
    pub id: String,
    pub judgment: Judgment,
}

/// A check whose score regressed beyond the allowed variability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Failure {
    pub id: String,
    pub baseline_score: f64,
    pub current_score: f64,
    pub title: String,
    pub description: String,
}

/// A side effect proposed by the comparison, to be confirmed by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "check", rename_all = "snake_case")]
pub enum Action {
    /// Add a failing check to the ignore list
    IgnoreCheck(String),
    /// Replace the baseline snapshot with the current audit
    OverwriteBaseline,
}

/// Outcome of comparing a current audit to its baseline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    pub variability: f64,
    pub judgments: Vec<CheckJudgment>,
    pub analyzed: u32,
    pub skipped: u32,
    pub ignored: u32,
    pub new_fields: u32,
    pub baseline_total: f64,
    pub current_total: f64,
    pub failures: Vec<Failure>,
}

impl Comparison {
    pub fn passed(&self) -> bool {
        self.failures.is_empty()
    }

    /// Actions the caller may confirm: one ignore candidate per failure, in
    /// failure order, then a baseline overwrite if the aggregate score dropped.
    pub fn actions(&self) -> Vec<Action> {
        let mut actions: Vec<Action> = self
            .failures
            .iter()
            .map(|f| Action::IgnoreCheck(f.id.clone()))
            .collect();

        if self.current_total < self.baseline_total {
            actions.push(Action::OverwriteBaseline);
        }

        actions
    }

    pub fn judgment(&self, id: &str) -> Option<Judgment> {
        self.judgments
            .iter()
            .find(|j| j.id == id)
            .map(|j| j.judgment)
    }

    fn push(&mut self, id: &str, judgment: Judgment) {
        self.judgments.push(CheckJudgment {
            id: id.to_string(),
            judgment,
        });
    }
}

/// True when `current` fell below `baseline` by more than `variability`.
pub fn regresses(baseline: f64, current: f64, variability: f64) -> bool {
    baseline * (1.0 - variability) > current
}

/// Compare `current` against `baseline`, iterating over `current` in order.
///
/// A baseline score of `0` is a real score and is analyzed; only a missing
/// entry or a null baseline score makes a check a new field.
pub fn evaluate(
    baseline: &ResultSet,
    current: &ResultSet,
    ignore: &IgnoreList,
    variability: f64,
) -> Comparison {
    let mut cmp = Comparison {
        variability,
        ..Default::default()
    };

    for (id, record) in current.iter() {
        let Some(baseline_score) = baseline.get(id).and_then(|b| b.score) else {
            cmp.new_fields += 1;
            cmp.push(id, Judgment::NewField);
            continue;
        };

        let current_score = record.score.unwrap_or(0.0);
        cmp.baseline_total += baseline_score;
        cmp.current_total += current_score;
        cmp.analyzed += 1;

        if current_score == 0.0 {
            cmp.skipped += 1;
            cmp.push(id, Judgment::Skipped);
            continue;
        }

        if ignore.contains(id) {
            cmp.ignored += 1;
            cmp.push(id, Judgment::Ignored);
            continue;
        }

        if regresses(baseline_score, current_score, variability) {
            cmp.failures.push(Failure {
                id: id.to_string(),
                baseline_score,
                current_score,
                title: record.title.clone(),
                description: record.description.clone(),
            });
            cmp.push(id, Judgment::Failed);
        } else {
            cmp.push(id, Judgment::Passed);
        }
    }

    cmp
}
