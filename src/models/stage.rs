use clap::ValueEnum;
use serde::Serialize;
use std::ffi::OsStr;

/// A named step in the indexing pipeline.
///
/// Used both for the step being run and, as a predecessor, for the producer
/// of the artifacts that step consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Stage {
    Bridge,
    Tea,
    ConvertJson,
    ConvertVector,
    IndexJson,
    IndexScd,
}

impl Stage {
    pub const ALL: [Stage; 6] = [
        Stage::Bridge,
        Stage::Tea,
        Stage::ConvertJson,
        Stage::ConvertVector,
        Stage::IndexJson,
        Stage::IndexScd,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Bridge => "bridge",
            Stage::Tea => "tea",
            Stage::ConvertJson => "convert-json",
            Stage::ConvertVector => "convert-vector",
            Stage::IndexJson => "index-json",
            Stage::IndexScd => "index-scd",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A gateway operation. Each one is also a [`Stage`] of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Operation {
    ConvertJson,
    ConvertVector,
    IndexJson,
    IndexScd,
}

impl Operation {
    pub const ALL: [Operation; 4] = [
        Operation::ConvertJson,
        Operation::ConvertVector,
        Operation::IndexJson,
        Operation::IndexScd,
    ];

    pub fn stage(&self) -> Stage {
        match self {
            Operation::ConvertJson => Stage::ConvertJson,
            Operation::ConvertVector => Stage::ConvertVector,
            Operation::IndexJson => Stage::IndexJson,
            Operation::IndexScd => Stage::IndexScd,
        }
    }

    pub fn as_str(&self) -> &'static str {
        self.stage().as_str()
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Artifact file extension handled by the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Extension {
    Scd,
    Json,
}

impl Extension {
    pub fn as_str(&self) -> &'static str {
        match self {
            Extension::Scd => "scd",
            Extension::Json => "json",
        }
    }

    /// Case-insensitive check that `file_name` ends with `.<extension>`.
    ///
    /// Compares raw name bytes, so non-UTF-8 names are handled too.
    pub fn matches_file_name(&self, file_name: impl AsRef<OsStr>) -> bool {
        let name = file_name.as_ref().as_encoded_bytes();
        let suffix = format!(".{}", self.as_str());
        name.len() >= suffix.len()
            && name[name.len() - suffix.len()..].eq_ignore_ascii_case(suffix.as_bytes())
    }
}

impl std::fmt::Display for Extension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Run mode of the bridge and gateway processors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Static,
    Dynamic,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Static => "static",
            Mode::Dynamic => "dynamic",
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
