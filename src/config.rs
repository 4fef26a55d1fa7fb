//! Runtime configuration read from a Java-style `.properties` file.
//!
//! The file is read once at startup. Every key is optional; missing keys fall
//! back to paths derived from `sf1.home.dir`.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{PipelineError, Result};
use crate::fs::CollectionLayout;

/// Properties file looked up in the working directory when none is named.
pub const DEFAULT_CONFIG_FILE: &str = "dpr.properties";

/// Install directory used when `sf1.home.dir` is not set.
pub const DEFAULT_SF1_HOME: &str = "/app/search/sf1-v7";

/// Shell used to run the processor scripts when `processor.shell` is not set.
pub const DEFAULT_SHELL: &str = "sh";

pub mod keys {
    pub const SF1_HOME: &str = "sf1.home.dir";
    pub const COLLECTION_BASE: &str = "collection.base.dir";
    pub const TEA_HOME: &str = "tea.home.dir";
    pub const BRIDGE_SCRIPT: &str = "bridge.script";
    pub const TEA_SCRIPT: &str = "tea.script";
    pub const GATEWAY_SCRIPT: &str = "gateway.script";
    pub const SHELL: &str = "processor.shell";
}

/// Parsed `key=value` pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Properties {
    entries: HashMap<String, String>,
}

impl Properties {
    /// Parse properties text.
    ///
    /// Supports `=`, `:` or whitespace separators, `#`/`!` comments, backslash
    /// line continuation and the usual backslash escapes.
    pub fn parse(content: &str) -> Self {
        let mut entries = HashMap::new();
        let mut logical = String::new();

        for raw in content.lines() {
            let line = raw.trim_start();
            if logical.is_empty()
                && (line.is_empty() || line.starts_with('#') || line.starts_with('!'))
            {
                continue;
            }

            if ends_with_continuation(line) {
                logical.push_str(&line[..line.len() - 1]);
                continue;
            }

            logical.push_str(line);
            let (key, value) = split_entry(&logical);
            entries.insert(key, value);
            logical.clear();
        }

        if !logical.is_empty() {
            let (key, value) = split_entry(&logical);
            entries.insert(key, value);
        }

        Self { entries }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|e| PipelineError::io("read", path, e))?;
        Ok(Self::parse(&content))
    }

    /// Value for `key`, treating an empty value as unset.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .get(key)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }
}

fn ends_with_continuation(line: &str) -> bool {
    line.chars().rev().take_while(|c| *c == '\\').count() % 2 == 1
}

fn split_entry(line: &str) -> (String, String) {
    let mut escaped = false;
    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' => {
                let value = &line[i + c.len_utf8()..];
                return (unescape(&line[..i]), unescape(value.trim()));
            }
            c if c.is_whitespace() => {
                let rest = line[i..].trim_start();
                let rest = rest.strip_prefix(['=', ':']).unwrap_or(rest);
                return (unescape(&line[..i]), unescape(rest.trim()));
            }
            _ => {}
        }
    }
    (unescape(line), String::new())
}

fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\u{c}'),
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                    Some(decoded) => out.push(decoded),
                    None => {
                        out.push_str("\\u");
                        out.push_str(&hex);
                    }
                }
            }
            Some(other) => out.push(other),
            None => {}
        }
    }
    out
}

/// Resolved install and script locations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub sf1_home: PathBuf,
    pub collection_base_dir: PathBuf,
    pub tea_home: PathBuf,
    pub bridge_script: PathBuf,
    pub tea_script: PathBuf,
    pub gateway_script: PathBuf,
    pub shell: String,
}

impl Config {
    pub fn from_properties(props: &Properties) -> Self {
        let sf1_home = PathBuf::from(props.get(keys::SF1_HOME).unwrap_or(DEFAULT_SF1_HOME));
        let path_or = |key: &str, default: PathBuf| {
            props.get(key).map(PathBuf::from).unwrap_or(default)
        };

        let collection_base_dir = path_or(keys::COLLECTION_BASE, sf1_home.join("collection"));
        let tea_home = path_or(keys::TEA_HOME, sf1_home.join("tea"));
        let bridge_script = path_or(keys::BRIDGE_SCRIPT, sf1_home.join("bin/bridge.sh"));
        let tea_script = path_or(keys::TEA_SCRIPT, tea_home.join("tea2_util.sh"));
        let gateway_script = path_or(keys::GATEWAY_SCRIPT, sf1_home.join("bin/gateway.sh"));
        let shell = props.get(keys::SHELL).unwrap_or(DEFAULT_SHELL).to_string();

        Self {
            sf1_home,
            collection_base_dir,
            tea_home,
            bridge_script,
            tea_script,
            gateway_script,
            shell,
        }
    }

    /// Load from `explicit`, or from [`DEFAULT_CONFIG_FILE`] when present.
    ///
    /// A missing default file yields the built-in defaults; a missing
    /// explicitly named file is an error.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let props = match explicit {
            Some(path) => {
                if !path.is_file() {
                    return Err(PipelineError::MissingConfig {
                        path: path.to_path_buf(),
                    });
                }
                debug!(path = %path.display(), "Loading configuration");
                Properties::load(path)?
            }
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILE);
                if path.is_file() {
                    debug!(path = %path.display(), "Loading configuration");
                    Properties::load(path)?
                } else {
                    debug!("No {DEFAULT_CONFIG_FILE} found, using defaults");
                    Properties::default()
                }
            }
        };
        Ok(Self::from_properties(&props))
    }

    pub fn collection(&self, collection_id: &str) -> CollectionLayout {
        CollectionLayout::new(&self.collection_base_dir, collection_id)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_properties(&Properties::default())
    }
}
