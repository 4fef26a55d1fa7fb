use serde::Serialize;
use std::path::{Path, PathBuf};

/// A stage directory inside a collection root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StagingDir {
    ScdStatic,
    ScdDynamic,
    ScdTeaBefore,
    ScdTeaDone,
    ScdIndex,
    ScdBackup,
    JsonStatic,
    JsonDynamic,
    JsonIndex,
    JsonBackup,
    ConvertJsonIndex,
    ConvertJsonBackup,
    ConvertVectorIndex,
    ConvertVectorBackup,
}

impl StagingDir {
    /// Path relative to the collection root.
    pub fn relative_path(&self) -> &'static str {
        match self {
            StagingDir::ScdStatic => "scd/static",
            StagingDir::ScdDynamic => "scd/dynamic",
            StagingDir::ScdTeaBefore => "scd/tea_before",
            StagingDir::ScdTeaDone => "scd/tea_done",
            StagingDir::ScdIndex => "scd/index",
            StagingDir::ScdBackup => "scd/backup",
            StagingDir::JsonStatic => "json/static",
            StagingDir::JsonDynamic => "json/dynamic",
            StagingDir::JsonIndex => "json/index",
            StagingDir::JsonBackup => "json/backup",
            StagingDir::ConvertJsonIndex => "convert-json/index",
            StagingDir::ConvertJsonBackup => "convert-json/backup",
            StagingDir::ConvertVectorIndex => "convert-vector/index",
            StagingDir::ConvertVectorBackup => "convert-vector/backup",
        }
    }
}

impl std::fmt::Display for StagingDir {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.relative_path())
    }
}

/// Directory tree of one collection: `<base>/<collection_id>/...`.
///
/// The collection id is joined literally; nothing is created until a
/// directory is used as a move destination.
#[derive(Debug, Clone)]
pub struct CollectionLayout {
    root: PathBuf,
}

impl CollectionLayout {
    pub fn new<P: AsRef<Path>>(base_dir: P, collection_id: &str) -> Self {
        Self {
            root: base_dir.as_ref().join(collection_id),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn dir(&self, dir: StagingDir) -> PathBuf {
        self.root.join(dir.relative_path())
    }
}
