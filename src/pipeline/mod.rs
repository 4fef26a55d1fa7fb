pub mod planner;
pub mod rules;

pub use planner::{PlannedMove, PlannedPurge, StagingPlan, StagingSummary, TransitionPlanner};
pub use rules::{DeleteRule, DeleteRules, MoveRule, TransitionTable};
