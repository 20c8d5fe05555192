//! Filter resolution
//!
//! The resolver decides, for every candidate path the walker encounters,
//! whether it survives into the filtered tree and (for directories) whether
//! traversal descends into it. It is a pure function of the normalized
//! relative path and the rule set: no I/O, no state, same input same output.
//!
//! Resolution is an ordered pipeline. Each stage sees only candidates the
//! previous stages left undecided, and a later stage can never resurrect an
//! excluded entry:
//!
//! 1. hard exclusions (never overridable)
//! 2. scope restriction
//! 3. directory exclusion (name and path matchers)
//! 4. file whitelist (a match ends the pipeline, skipping stage 5)
//! 5. file blacklist (ignored names, ignored extensions, settings files)

use std::fmt;

use super::rules::{DirMatcher, RuleSet};
use super::utils::{base_name, extension_of, is_under};

/// Directory names excluded unconditionally, wherever they appear.
const HARD_EXCLUDED_DIRS: &[&str] = &[".git", ".vscode", ".idea", "__pycache__", "node_modules"];

/// Why a path was excluded. Carried through to stats and verbose logging so
/// a user can see which stage decided each path, and for directory rules
/// whether the match was by path or by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Exclusion {
    Hard,
    OutOfScope,
    DirName(String),
    DirPath(String),
    NotWhitelisted,
    IgnoredFile(String),
    IgnoredType(String),
    SettingsFile(String),
}

impl fmt::Display for Exclusion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Exclusion::Hard => write!(f, "hard exclusion"),
            Exclusion::OutOfScope => write!(f, "outside scope"),
            Exclusion::DirName(m) => write!(f, "exclude-dir name matcher '{}'", m),
            Exclusion::DirPath(m) => write!(f, "exclude-dir path matcher '{}'", m),
            Exclusion::NotWhitelisted => write!(f, "no include-files pattern matched"),
            Exclusion::IgnoredFile(p) => write!(f, "ignore-files pattern '{}'", p),
            Exclusion::IgnoredType(e) => write!(f, "ignored extension '{}'", e),
            Exclusion::SettingsFile(e) => write!(f, "settings extension '{}'", e),
        }
    }
}

/// Outcome for a directory candidate. `descend` can be true while `include`
/// is false: ancestors of the scope root are traversed but never emitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirVerdict {
    pub include: bool,
    pub descend: bool,
    pub exclusion: Option<Exclusion>,
}

impl DirVerdict {
    fn included() -> Self {
        Self {
            include: true,
            descend: true,
            exclusion: None,
        }
    }

    fn excluded(exclusion: Exclusion) -> Self {
        Self {
            include: false,
            descend: false,
            exclusion: Some(exclusion),
        }
    }

    /// Pass-through node on the way to the scope root.
    fn traverse_only() -> Self {
        Self {
            include: false,
            descend: true,
            exclusion: None,
        }
    }
}

/// Outcome for a file candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileVerdict {
    Include,
    Exclude(Exclusion),
}

/// Tagged per-stage outcome. Stages report `Undecided` to hand the candidate
/// to the next stage; a terminal tag ends the pipeline. This keeps the
/// whitelist-overrides-blacklist precedence explicit instead of burying it
/// in boolean combinations.
enum Stage {
    Undecided,
    Included,
    Excluded(Exclusion),
}

/// How a directory relates to the configured scope root.
enum ScopeRelation {
    Unscoped,
    Inside,
    Ancestor,
    Outside,
}

/// Resolve a directory candidate. `rel` is the normalized root-relative path.
pub fn decide_dir(rel: &str, rules: &RuleSet) -> DirVerdict {
    let name = base_name(rel);

    if let Some(exclusion) = hard_stage(rel, name, true, rules) {
        return DirVerdict::excluded(exclusion);
    }

    match scope_relation(rel, rules.scope_root()) {
        ScopeRelation::Outside => return DirVerdict::excluded(Exclusion::OutOfScope),
        // The path to the scope root is never pruned, even when an ancestor
        // matches an exclude rule; its other children fall out of scope on
        // their own.
        ScopeRelation::Ancestor => return DirVerdict::traverse_only(),
        ScopeRelation::Inside | ScopeRelation::Unscoped => {}
    }

    // Path matchers compare against the scope-relative path so the same rule
    // means the same location whether or not a scope is active.
    let scoped = scope_relative(rel, rules.scope_root());
    for matcher in rules.exclude_dirs() {
        match matcher {
            DirMatcher::Name(n) if n == name => {
                return DirVerdict::excluded(Exclusion::DirName(n.clone()));
            }
            DirMatcher::Path(p) if p == scoped => {
                return DirVerdict::excluded(Exclusion::DirPath(p.clone()));
            }
            _ => {}
        }
    }

    DirVerdict::included()
}

/// Resolve a file candidate. `rel` is the normalized root-relative path.
pub fn decide_file(rel: &str, rules: &RuleSet) -> FileVerdict {
    let name = base_name(rel);

    if let Some(exclusion) = hard_stage(rel, name, false, rules) {
        return FileVerdict::Exclude(exclusion);
    }

    if let Some(scope) = rules.scope_root() {
        if !is_under(rel, scope) {
            return FileVerdict::Exclude(Exclusion::OutOfScope);
        }
    }

    match whitelist_stage(name, rules) {
        Stage::Included => return FileVerdict::Include,
        Stage::Excluded(exclusion) => return FileVerdict::Exclude(exclusion),
        Stage::Undecided => {}
    }

    match blacklist_stage(name, rules) {
        Stage::Excluded(exclusion) => FileVerdict::Exclude(exclusion),
        _ => FileVerdict::Include,
    }
}

fn hard_stage(rel: &str, name: &str, is_dir: bool, rules: &RuleSet) -> Option<Exclusion> {
    if name.starts_with('.') {
        return Some(Exclusion::Hard);
    }
    if is_dir && HARD_EXCLUDED_DIRS.contains(&name) {
        return Some(Exclusion::Hard);
    }
    if !is_dir {
        if let Some(out) = rules.output_file() {
            let hit = match out {
                DirMatcher::Name(n) => n == name,
                DirMatcher::Path(p) => p == rel,
            };
            if hit {
                return Some(Exclusion::Hard);
            }
        }
    }
    None
}

fn scope_relation(rel: &str, scope: Option<&str>) -> ScopeRelation {
    let Some(scope) = scope else {
        return ScopeRelation::Unscoped;
    };
    if rel == scope || is_under(rel, scope) {
        ScopeRelation::Inside
    } else if is_under(scope, rel) {
        ScopeRelation::Ancestor
    } else {
        ScopeRelation::Outside
    }
}

fn scope_relative<'a>(rel: &'a str, scope: Option<&str>) -> &'a str {
    match scope {
        Some(s) if is_under(rel, s) => &rel[s.len() + 1..],
        _ => rel,
    }
}

fn whitelist_stage(name: &str, rules: &RuleSet) -> Stage {
    match rules.include_files() {
        None => Stage::Undecided,
        Some(patterns) => {
            if patterns.iter().any(|p| p.matches(name)) {
                // A whitelist match is final: the extension blacklist never
                // reconsiders a file the whitelist admitted.
                Stage::Included
            } else {
                Stage::Excluded(Exclusion::NotWhitelisted)
            }
        }
    }
}

fn blacklist_stage(name: &str, rules: &RuleSet) -> Stage {
    if let Some(p) = rules.ignore_files().iter().find(|p| p.matches(name)) {
        return Stage::Excluded(Exclusion::IgnoredFile(p.raw().to_string()));
    }
    if let Some(ext) = extension_of(name) {
        if rules.ignore_types().contains(&ext) {
            return Stage::Excluded(Exclusion::IgnoredType(ext));
        }
        if rules.ignore_settings() && rules.settings_types().contains(&ext) {
            return Stage::Excluded(Exclusion::SettingsFile(ext));
        }
    }
    Stage::Undecided
}
