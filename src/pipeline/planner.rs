//! Transition Planner: turns a junction request into an ordered staging plan.

use serde::Serialize;
use std::path::PathBuf;
use tracing::{info, warn};

use super::rules::{DeleteRule, DeleteRules, MoveRule, TransitionTable};
use crate::error::Result;
use crate::fs::{move_artifacts, purge, CollectionLayout, PurgeFailure};
use crate::models::{Extension, Operation, PatternRegistry, Stage};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedMove {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub extension: Extension,
    pub predecessor: Stage,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedPurge {
    pub directory: PathBuf,
    pub extension: Extension,
}

/// Moves to perform, then purges; purges only run once every move succeeded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StagingPlan {
    pub moves: Vec<PlannedMove>,
    pub purges: Vec<PlannedPurge>,
}

/// What applying a [`StagingPlan`] did.
#[derive(Debug, Default)]
pub struct StagingSummary {
    pub moved: usize,
    pub purged: usize,
    pub purge_failures: Vec<PurgeFailure>,
}

impl StagingPlan {
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty() && self.purges.is_empty()
    }

    /// Execute the plan against the file system.
    ///
    /// The first failing move aborts the plan; nothing already moved is rolled
    /// back and no purge runs. Per-file purge failures are collected in the
    /// summary rather than returned as errors.
    pub fn apply(&self, registry: &PatternRegistry) -> Result<StagingSummary> {
        let mut summary = StagingSummary::default();

        for step in &self.moves {
            let report = move_artifacts(
                &step.source,
                &step.destination,
                step.extension,
                step.predecessor,
                registry,
            )?;
            summary.moved += report.count();
        }

        for step in &self.purges {
            let report = purge(&step.directory, step.extension)?;
            if !report.is_clean() {
                warn!(
                    directory = %step.directory.display(),
                    failures = report.failed.len(),
                    "Some stale artifacts could not be purged"
                );
            }
            summary.purged += report.deleted.len();
            summary.purge_failures.extend(report.failed);
        }

        Ok(summary)
    }
}

/// Decides which artifacts each junction consumes and which backups it purges.
#[derive(Debug, Clone, Default)]
pub struct TransitionPlanner {
    patterns: PatternRegistry,
    transitions: TransitionTable,
    deletes: DeleteRules,
}

impl TransitionPlanner {
    pub fn new(patterns: PatternRegistry, transitions: TransitionTable, deletes: DeleteRules) -> Self {
        Self {
            patterns,
            transitions,
            deletes,
        }
    }

    pub fn patterns(&self) -> &PatternRegistry {
        &self.patterns
    }

    /// Plan the tea junction: bridge output from `scd/static` and `scd/dynamic`
    /// into `scd/tea_before`, then drop leftover output in `scd/tea_done`.
    pub fn plan_tea(&self, layout: &CollectionLayout) -> StagingPlan {
        let predecessor = self.transitions.tea_predecessor();
        StagingPlan {
            moves: planned_moves(layout, self.transitions.tea_moves(), predecessor),
            purges: planned_purges(layout, self.deletes.tea()),
        }
    }

    /// Plan the gateway junction for `operation`.
    ///
    /// Without a declared predecessor the caller asserts the inputs are
    /// already staged, so the plan is empty. A predecessor that is not legal
    /// for `operation` also yields an empty plan, with a warning.
    pub fn plan_gateway(
        &self,
        layout: &CollectionLayout,
        operation: Operation,
        prev: Option<Stage>,
    ) -> StagingPlan {
        let Some(prev) = prev else {
            info!(operation = %operation, "No previous step declared, inputs assumed staged");
            return StagingPlan::default();
        };

        let Some(rules) = self.transitions.moves_for(operation, prev) else {
            let legal: Vec<&str> = self
                .transitions
                .predecessors_of(operation)
                .iter()
                .map(Stage::as_str)
                .collect();
            warn!(
                operation = %operation,
                prev_step = %prev,
                legal = %legal.join(", "),
                "No staging rule for this previous step, nothing will be moved"
            );
            return StagingPlan::default();
        };

        StagingPlan {
            moves: planned_moves(layout, rules, prev),
            purges: planned_purges(layout, self.deletes.for_operation(operation)),
        }
    }

    pub fn prepare_for_tea(&self, layout: &CollectionLayout) -> Result<StagingSummary> {
        self.plan_tea(layout).apply(&self.patterns)
    }

    pub fn prepare_for_operation(
        &self,
        layout: &CollectionLayout,
        operation: Operation,
        prev: Option<Stage>,
    ) -> Result<StagingSummary> {
        self.plan_gateway(layout, operation, prev)
            .apply(&self.patterns)
    }
}

fn planned_moves(
    layout: &CollectionLayout,
    rules: &[MoveRule],
    predecessor: Stage,
) -> Vec<PlannedMove> {
    rules
        .iter()
        .map(|rule| PlannedMove {
            source: layout.dir(rule.source),
            destination: layout.dir(rule.destination),
            extension: rule.extension,
            predecessor,
        })
        .collect()
}

fn planned_purges(layout: &CollectionLayout, rule: Option<&DeleteRule>) -> Vec<PlannedPurge> {
    let Some(rule) = rule else {
        return Vec::new();
    };
    rule.extensions
        .iter()
        .map(|extension| PlannedPurge {
            directory: layout.dir(rule.directory),
            extension: *extension,
        })
        .collect()
}
