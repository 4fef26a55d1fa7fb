pub mod pattern;
pub mod stage;

pub use pattern::{ArtifactMatcher, FilePattern, PatternRegistry};
pub use stage::{Extension, Mode, Operation, Stage};
