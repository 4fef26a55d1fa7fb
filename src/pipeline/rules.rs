//! Transition and delete-rule tables for the pipeline junctions.
//!
//! Both tables are plain values so callers can inject variants; the
//! `Default` impls carry the production pipeline.

use serde::Serialize;
use std::collections::HashMap;

use crate::fs::StagingDir;
use crate::models::{Extension, Operation, Stage};

/// One staging step: move `extension` artifacts from `source` to `destination`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MoveRule {
    pub source: StagingDir,
    pub destination: StagingDir,
    pub extension: Extension,
}

impl MoveRule {
    pub const fn new(source: StagingDir, destination: StagingDir, extension: Extension) -> Self {
        Self {
            source,
            destination,
            extension,
        }
    }
}

/// Directory and extensions purged once a junction has pulled its inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteRule {
    pub directory: StagingDir,
    pub extensions: Vec<Extension>,
}

impl DeleteRule {
    pub fn new(directory: StagingDir, extensions: Vec<Extension>) -> Self {
        Self {
            directory,
            extensions,
        }
    }
}

/// Moves required before each stage runs, keyed by (operation, predecessor).
#[derive(Debug, Clone)]
pub struct TransitionTable {
    tea: Vec<MoveRule>,
    tea_predecessor: Stage,
    gateway: HashMap<(Operation, Stage), Vec<MoveRule>>,
}

impl TransitionTable {
    pub fn empty() -> Self {
        Self {
            tea: Vec::new(),
            tea_predecessor: Stage::Bridge,
            gateway: HashMap::new(),
        }
    }

    pub fn with_tea(mut self, predecessor: Stage, moves: Vec<MoveRule>) -> Self {
        self.tea_predecessor = predecessor;
        self.tea = moves;
        self
    }

    pub fn with_rule(mut self, operation: Operation, prev: Stage, moves: Vec<MoveRule>) -> Self {
        self.gateway.insert((operation, prev), moves);
        self
    }

    pub fn tea_moves(&self) -> &[MoveRule] {
        &self.tea
    }

    pub fn tea_predecessor(&self) -> Stage {
        self.tea_predecessor
    }

    /// `None` when `prev` is not a legal predecessor of `operation`.
    pub fn moves_for(&self, operation: Operation, prev: Stage) -> Option<&[MoveRule]> {
        self.gateway
            .get(&(operation, prev))
            .map(|moves| moves.as_slice())
    }

    /// Legal predecessors of `operation`, in pipeline order.
    pub fn predecessors_of(&self, operation: Operation) -> Vec<Stage> {
        Stage::ALL
            .into_iter()
            .filter(|prev| self.gateway.contains_key(&(operation, *prev)))
            .collect()
    }
}

impl Default for TransitionTable {
    fn default() -> Self {
        use Extension::{Json, Scd};
        use StagingDir::*;

        Self::empty()
            .with_tea(
                Stage::Bridge,
                vec![
                    MoveRule::new(ScdStatic, ScdTeaBefore, Scd),
                    MoveRule::new(ScdDynamic, ScdTeaBefore, Scd),
                ],
            )
            .with_rule(
                Operation::ConvertJson,
                Stage::Tea,
                vec![MoveRule::new(ScdTeaDone, ConvertJsonIndex, Scd)],
            )
            .with_rule(
                Operation::ConvertJson,
                Stage::Bridge,
                vec![
                    MoveRule::new(ScdStatic, ConvertJsonIndex, Scd),
                    MoveRule::new(ScdDynamic, ConvertJsonIndex, Scd),
                ],
            )
            .with_rule(
                Operation::ConvertVector,
                Stage::ConvertJson,
                vec![MoveRule::new(ConvertJsonBackup, ConvertVectorIndex, Json)],
            )
            .with_rule(
                Operation::ConvertVector,
                Stage::Bridge,
                vec![
                    MoveRule::new(JsonStatic, ConvertVectorIndex, Json),
                    MoveRule::new(JsonDynamic, ConvertVectorIndex, Json),
                ],
            )
            .with_rule(
                Operation::IndexJson,
                Stage::ConvertVector,
                vec![MoveRule::new(ConvertVectorBackup, JsonIndex, Json)],
            )
            .with_rule(
                Operation::IndexJson,
                Stage::ConvertJson,
                vec![MoveRule::new(ConvertJsonBackup, JsonIndex, Json)],
            )
            .with_rule(
                Operation::IndexJson,
                Stage::Bridge,
                vec![
                    MoveRule::new(JsonStatic, JsonIndex, Json),
                    MoveRule::new(JsonDynamic, JsonIndex, Json),
                ],
            )
            .with_rule(
                Operation::IndexScd,
                Stage::Tea,
                vec![MoveRule::new(ScdTeaDone, ScdIndex, Scd)],
            )
            .with_rule(
                Operation::IndexScd,
                Stage::Bridge,
                vec![
                    MoveRule::new(ScdStatic, ScdIndex, Scd),
                    MoveRule::new(ScdDynamic, ScdIndex, Scd),
                ],
            )
    }
}

/// Purge rules applied after each junction's moves.
#[derive(Debug, Clone)]
pub struct DeleteRules {
    tea: Option<DeleteRule>,
    gateway: HashMap<Operation, DeleteRule>,
}

impl DeleteRules {
    pub fn empty() -> Self {
        Self {
            tea: None,
            gateway: HashMap::new(),
        }
    }

    pub fn with_tea(mut self, rule: DeleteRule) -> Self {
        self.tea = Some(rule);
        self
    }

    pub fn with_rule(mut self, operation: Operation, rule: DeleteRule) -> Self {
        self.gateway.insert(operation, rule);
        self
    }

    pub fn tea(&self) -> Option<&DeleteRule> {
        self.tea.as_ref()
    }

    pub fn for_operation(&self, operation: Operation) -> Option<&DeleteRule> {
        self.gateway.get(&operation)
    }
}

impl Default for DeleteRules {
    fn default() -> Self {
        use Extension::{Json, Scd};

        Self::empty()
            .with_tea(DeleteRule::new(StagingDir::ScdTeaDone, vec![Scd]))
            .with_rule(
                Operation::ConvertJson,
                DeleteRule::new(StagingDir::ConvertJsonBackup, vec![Scd]),
            )
            .with_rule(
                Operation::ConvertVector,
                DeleteRule::new(StagingDir::ConvertVectorBackup, vec![Json]),
            )
            .with_rule(
                Operation::IndexJson,
                DeleteRule::new(StagingDir::JsonBackup, vec![Json]),
            )
            .with_rule(
                Operation::IndexScd,
                DeleteRule::new(StagingDir::ScdBackup, vec![Json]),
            )
    }
}
