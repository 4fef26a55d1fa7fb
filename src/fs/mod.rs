pub mod layout;
pub mod mover;
pub mod sweeper;

pub use layout::{CollectionLayout, StagingDir};
pub use mover::{move_artifacts, MoveReport};
pub use sweeper::{purge, purge_with, PurgeFailure, PurgeReport};
