//! Tree walker
//!
//! Depth-first, pre-order traversal that consults the filter at every node
//! and assembles the filtered tree. Sibling entries are visited in
//! case-sensitive lexicographic name order, directories and files together,
//! so two walks over an unchanged filesystem produce identical trees.
//!
//! The walker never reads file bodies: content is deferred to the renderer,
//! which keeps the walk allocation-light and makes dry runs free.

use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::stats::WalkStats;

use super::filter::{FileVerdict, decide_dir, decide_file};
use super::rules::RuleSet;

/// One retained entry in the filtered tree. Paths are root-relative in the
/// canonical forward-slash form and unique within the tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Entry {
    File {
        name: String,
        path: String,
    },
    Dir {
        name: String,
        path: String,
        children: Vec<Entry>,
    },
}

impl Entry {
    pub fn name(&self) -> &str {
        match self {
            Entry::File { name, .. } => name,
            Entry::Dir { name, .. } => name,
        }
    }

    pub fn path(&self) -> &str {
        match self {
            Entry::File { path, .. } => path,
            Entry::Dir { path, .. } => path,
        }
    }

    pub fn is_dir(&self) -> bool {
        matches!(self, Entry::Dir { .. })
    }
}

/// Everything a walk produces: the filtered tree (root node always present,
/// possibly with no children), the retained file paths in traversal order,
/// and the walk statistics.
#[derive(Debug)]
pub struct WalkOutcome {
    pub tree: Entry,
    pub files: Vec<String>,
    pub stats: WalkStats,
}

pub struct TreeWalker {
    rules: RuleSet,
}

impl TreeWalker {
    pub fn new(rules: RuleSet) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Walk the filesystem from `root`. Unreadable directories are recorded
    /// in stats and treated as empty; the walk itself never fails.
    pub fn walk(&self, root: &Path) -> WalkOutcome {
        let mut stats = WalkStats::default();
        let mut files = Vec::new();

        let name = root
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| ".".to_string());

        let children = self.walk_dir(root, "", &mut files, &mut stats);

        WalkOutcome {
            tree: Entry::Dir {
                name,
                path: String::new(),
                children,
            },
            files,
            stats,
        }
    }

    /// Build the filtered children of one directory. Returns the surviving
    /// entries; a directory whose filtered child list comes back empty is
    /// pruned by the caller, which is how emptiness propagates upward.
    fn walk_dir(
        &self,
        dir: &Path,
        rel: &str,
        files: &mut Vec<String>,
        stats: &mut WalkStats,
    ) -> Vec<Entry> {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(err) => {
                log::debug!("cannot read directory {}: {}", dir.display(), err);
                stats.record_unreadable(if rel.is_empty() {
                    ".".to_string()
                } else {
                    rel.to_string()
                });
                return Vec::new();
            }
        };

        let mut entries: Vec<_> = entries.filter_map(|e| e.ok()).collect();
        entries.sort_by_key(|e| e.file_name());

        let mut children = Vec::new();
        for entry in entries {
            let name = entry.file_name().to_string_lossy().into_owned();
            let child_rel = if rel.is_empty() {
                name.clone()
            } else {
                format!("{}/{}", rel, name)
            };
            let path = entry.path();

            // Symlinks are skipped entirely so a link cycle cannot recurse.
            if path.is_symlink() {
                log::debug!("skipping symlink {}", child_rel);
                continue;
            }

            if path.is_dir() {
                stats.dirs_visited += 1;
                let verdict = decide_dir(&child_rel, &self.rules);
                if !verdict.descend {
                    stats.dirs_excluded += 1;
                    if let Some(reason) = &verdict.exclusion {
                        log::debug!("excluded {}/: {}", child_rel, reason);
                    }
                    continue;
                }

                let sub = self.walk_dir(&path, &child_rel, files, stats);
                if sub.is_empty() {
                    if verdict.include {
                        stats.dirs_pruned += 1;
                        log::debug!("pruned {}/: empty after filtering", child_rel);
                    }
                    continue;
                }
                children.push(Entry::Dir {
                    name,
                    path: child_rel,
                    children: sub,
                });
            } else if path.is_file() {
                stats.files_visited += 1;
                match decide_file(&child_rel, &self.rules) {
                    FileVerdict::Include => {
                        stats.files_included += 1;
                        files.push(child_rel.clone());
                        children.push(Entry::File {
                            name,
                            path: child_rel,
                        });
                    }
                    FileVerdict::Exclude(reason) => {
                        stats.files_excluded += 1;
                        log::debug!("excluded {}: {}", child_rel, reason);
                    }
                }
            }
        }

        children
    }
}
