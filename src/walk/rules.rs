//! Rule set construction
//!
//! A [`RuleSet`] is built once per run from CLI/config input and is read-only
//! afterwards. All pattern validation happens here so the filter itself can
//! never fail: a malformed glob is a configuration error, not a traversal
//! error.

use std::collections::HashSet;
use std::path::Path;

use glob::{Pattern, PatternError};
use thiserror::Error;

use crate::config::AppConfig;

use super::utils::normalize;

/// Sentinel list value that disables a filter instead of populating it.
pub const NONE_SENTINEL: &str = "none";

#[derive(Debug, Error)]
pub enum RuleError {
    #[error("invalid glob pattern '{pattern}': {source}")]
    InvalidGlob {
        pattern: String,
        #[source]
        source: PatternError,
    },
    #[error("scope path '{0}' must be a relative path inside the root")]
    InvalidScope(String),
    #[error("cannot mix 'none' with explicit values: {0:?}")]
    ConflictingNone(Vec<String>),
}

/// Distinguishes "no patterns given" (defaults apply) from an explicit
/// `none`, which disables the filter including any defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
enum ListArg {
    #[default]
    Absent,
    Disabled,
    Explicit(Vec<String>),
}

impl ListArg {
    fn from_cli(values: Option<Vec<String>>) -> Result<Self, RuleError> {
        match values {
            None => Ok(ListArg::Absent),
            Some(v) if v.is_empty() => Ok(ListArg::Disabled),
            Some(v) if v.len() == 1 && v[0] == NONE_SENTINEL => Ok(ListArg::Disabled),
            Some(v) if v.iter().any(|s| s == NONE_SENTINEL) => {
                Err(RuleError::ConflictingNone(v))
            }
            Some(v) => Ok(ListArg::Explicit(v)),
        }
    }

    fn resolve(self, defaults: Vec<String>) -> Vec<String> {
        match self {
            ListArg::Absent => defaults,
            ListArg::Disabled => Vec::new(),
            ListArg::Explicit(v) => v,
        }
    }
}

/// A directory exclusion rule: a bare name matches anywhere in the tree, a
/// value containing a separator matches only that exact scope-relative path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirMatcher {
    Name(String),
    Path(String),
}

impl DirMatcher {
    pub fn parse(raw: &str) -> Self {
        let norm = normalize(raw);
        if norm.contains('/') {
            DirMatcher::Path(norm)
        } else {
            DirMatcher::Name(norm)
        }
    }
}

/// A file pattern matched against bare file names, by exact equality or as a
/// glob. Compiled and validated at rule construction.
#[derive(Debug, Clone)]
pub struct NamePattern {
    raw: String,
    pattern: Pattern,
}

impl NamePattern {
    fn new(raw: &str) -> Result<Self, RuleError> {
        let pattern = Pattern::new(raw).map_err(|source| RuleError::InvalidGlob {
            pattern: raw.to_string(),
            source,
        })?;
        Ok(Self {
            raw: raw.to_string(),
            pattern,
        })
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn matches(&self, name: &str) -> bool {
        self.raw == name || self.pattern.matches(name)
    }
}

/// Unvalidated rule input, as collected from the CLI and config layer.
///
/// `None` list fields mean "not given, use defaults"; a list whose sole
/// element is `none` (or an empty list from a bare flag) explicitly disables
/// that filter.
#[derive(Debug, Clone, Default)]
pub struct RuleOptions {
    pub output_file: Option<String>,
    pub scope_to: Option<String>,
    pub include_files: Option<Vec<String>>,
    pub exclude_dirs: Option<Vec<String>>,
    pub ignore_files: Option<Vec<String>>,
    pub ignore_types: Option<Vec<String>>,
    pub ignore_settings: bool,
    pub no_content: bool,
}

/// The immutable, validated rule set consulted by the filter at every node.
#[derive(Debug)]
pub struct RuleSet {
    output_file: Option<DirMatcher>,
    scope_root: Option<String>,
    exclude_dirs: Vec<DirMatcher>,
    include_files: Option<Vec<NamePattern>>,
    ignore_files: Vec<NamePattern>,
    ignore_types: HashSet<String>,
    settings_types: HashSet<String>,
    ignore_settings: bool,
    include_content: bool,
}

impl RuleSet {
    /// Validate and compile rule input against the configured extension
    /// categories. Fails fast on malformed globs or an unusable scope path,
    /// before any traversal starts.
    pub fn build(opts: RuleOptions, config: &AppConfig) -> Result<Self, RuleError> {
        let scope_root = match opts.scope_to {
            None => None,
            Some(raw) => Some(validate_scope(&raw)?),
        };

        let exclude_dirs = ListArg::from_cli(opts.exclude_dirs)?
            .resolve(Vec::new())
            .iter()
            .map(|raw| DirMatcher::parse(raw))
            .collect();

        // An empty whitelist would exclude every file; treat it as inactive.
        let include_files = match opts.include_files {
            Some(patterns) if !patterns.is_empty() => Some(
                patterns
                    .iter()
                    .map(|p| NamePattern::new(p))
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            _ => None,
        };

        let ignore_files = ListArg::from_cli(opts.ignore_files)?
            .resolve(Vec::new())
            .iter()
            .map(|p| NamePattern::new(p))
            .collect::<Result<Vec<_>, _>>()?;

        let ignore_types = ListArg::from_cli(opts.ignore_types)?
            .resolve(config.default_ignore_types())
            .iter()
            .map(|e| canonical_ext(e))
            .collect();

        let settings_types = config
            .settings_extensions
            .iter()
            .map(|e| canonical_ext(e))
            .collect();

        let output_file = opts
            .output_file
            .as_deref()
            .map(DirMatcher::parse)
            .filter(|m| !matches!(m, DirMatcher::Name(n) if n.is_empty()));

        Ok(Self {
            output_file,
            scope_root,
            exclude_dirs,
            include_files,
            ignore_files,
            ignore_types,
            settings_types,
            ignore_settings: opts.ignore_settings,
            include_content: !opts.no_content,
        })
    }

    pub fn output_file(&self) -> Option<&DirMatcher> {
        self.output_file.as_ref()
    }

    pub fn scope_root(&self) -> Option<&str> {
        self.scope_root.as_deref()
    }

    pub fn exclude_dirs(&self) -> &[DirMatcher] {
        &self.exclude_dirs
    }

    /// `Some` activates whitelist mode: only matching files survive.
    pub fn include_files(&self) -> Option<&[NamePattern]> {
        self.include_files.as_deref()
    }

    pub fn ignore_files(&self) -> &[NamePattern] {
        &self.ignore_files
    }

    pub fn ignore_types(&self) -> &HashSet<String> {
        &self.ignore_types
    }

    pub fn settings_types(&self) -> &HashSet<String> {
        &self.settings_types
    }

    pub fn ignore_settings(&self) -> bool {
        self.ignore_settings
    }

    pub fn include_content(&self) -> bool {
        self.include_content
    }
}

/// Normalize an extension to lowercase with a leading dot, so `py`, `.py`
/// and `.PY` all compare equal.
fn canonical_ext(ext: &str) -> String {
    let ext = ext.trim().to_lowercase();
    if ext.starts_with('.') {
        ext
    } else {
        format!(".{}", ext)
    }
}

fn validate_scope(raw: &str) -> Result<String, RuleError> {
    if Path::new(raw).is_absolute() {
        return Err(RuleError::InvalidScope(raw.to_string()));
    }
    let norm = normalize(raw);
    if norm.is_empty() || norm.split('/').any(|c| c == "..") {
        return Err(RuleError::InvalidScope(raw.to_string()));
    }
    Ok(norm)
}
