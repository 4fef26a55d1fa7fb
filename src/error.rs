use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while staging artifacts or launching a stage processor.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Failed to {action} {}: {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration file not found: {}", path.display())]
    MissingConfig { path: PathBuf },

    #[error("Processor shell '{shell}' not found on PATH")]
    ShellNotFound { shell: String },

    #[error("Failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

impl PipelineError {
    pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PipelineError::Io {
            action,
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;
