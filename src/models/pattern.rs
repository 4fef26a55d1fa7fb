//! Artifact naming patterns, keyed by the stage that produces them.

use regex::bytes::{Regex, RegexBuilder};
use serde::Serialize;
use std::collections::HashMap;
use std::ffi::OsStr;

use super::stage::{Extension, Stage};

/// Prefix/suffix pair carried by every artifact a stage produces.
///
/// An artifact `<prefix><anything><suffix>.<extension>` belongs to the stage,
/// compared case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilePattern {
    pub prefix: String,
    pub suffix: String,
}

impl FilePattern {
    pub fn new(prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            suffix: suffix.into(),
        }
    }

    /// Build the case-insensitive matcher for artifacts with `extension`.
    ///
    /// Matching runs on the raw name bytes, so names that are not valid
    /// UTF-8 (e.g. EUC-KR) still match on their ASCII prefix and suffix.
    pub fn matcher(&self, extension: Extension) -> ArtifactMatcher {
        let source = format!(
            "^{}.*{}\\.{}$",
            regex::escape(&self.prefix),
            regex::escape(&self.suffix),
            regex::escape(extension.as_str())
        );
        // Every component is escaped, so the expression is always valid.
        let regex = RegexBuilder::new(&source)
            .unicode(false)
            .case_insensitive(true)
            .dot_matches_new_line(true)
            .build()
            .expect("Invalid artifact pattern");
        ArtifactMatcher { regex }
    }
}

/// Compiled filename rule for one (pattern, extension) pair.
#[derive(Debug, Clone)]
pub struct ArtifactMatcher {
    regex: Regex,
}

impl ArtifactMatcher {
    pub fn is_match(&self, file_name: impl AsRef<OsStr>) -> bool {
        self.regex.is_match(file_name.as_ref().as_encoded_bytes())
    }
}

/// Read-only table from producing stage to its [`FilePattern`].
#[derive(Debug, Clone)]
pub struct PatternRegistry {
    patterns: HashMap<Stage, FilePattern>,
}

impl PatternRegistry {
    /// An empty registry; every lookup misses.
    pub fn empty() -> Self {
        Self {
            patterns: HashMap::new(),
        }
    }

    pub fn with_pattern(mut self, stage: Stage, pattern: FilePattern) -> Self {
        self.patterns.insert(stage, pattern);
        self
    }

    pub fn lookup(&self, stage: Stage) -> Option<&FilePattern> {
        self.patterns.get(&stage)
    }
}

impl Default for PatternRegistry {
    /// The known producer stages of the indexing pipeline.
    fn default() -> Self {
        Self::empty()
            .with_pattern(Stage::Bridge, FilePattern::new("B-", "-C"))
            .with_pattern(Stage::Tea, FilePattern::new("B-", "-C"))
            .with_pattern(Stage::ConvertJson, FilePattern::new("B-", "-C"))
            .with_pattern(Stage::ConvertVector, FilePattern::new("V-", "-C"))
    }
}
