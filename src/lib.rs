mod audit;
mod comparator;
mod confirm;
mod gate;
mod ignore;
mod options;
mod report;
mod runner;
mod snapshot;

pub use audit::{CheckRecord, ResultSet};
pub use comparator::{evaluate, regresses, Action, CheckJudgment, Comparison, Failure, Judgment};
pub use confirm::{AssumeNo, AssumeYes, Confirmer, TerminalConfirmer};
pub use gate::{Gate, Outcome};
pub use ignore::{IgnoreList, DEFAULT_IGNORE_FILE};
pub use options::{parse_categories, parse_variability, AuditOptions, DEFAULT_CATEGORIES};
pub use report::RunSummary;
pub use runner::{AuditOutput, Auditor, LighthouseRunner, DEFAULT_LIGHTHOUSE_BIN};
pub use snapshot::{SnapshotStore, DEFAULT_SNAPSHOT_FILE};

use anyhow::Result;

/// Run a gated audit with the configured `lighthouse` executable, choosing
/// the confirmation policy from the options.
pub fn audit(options: AuditOptions) -> Result<Outcome> {
    let confirmer: Box<dyn Confirmer> = if options.assume_yes {
        Box::new(AssumeYes)
    } else if options.debug {
        Box::new(TerminalConfirmer::stdio())
    } else {
        Box::new(AssumeNo)
    };

    let runner = LighthouseRunner::new(&options.lighthouse_bin);
    let mut gate = Gate::new(options, runner, confirmer);
    gate.run()
}
