//! Filter resolution and directory tree walking
//!
//! The two collaborating cores of repodoc:
//!
//! - `filter` resolves include/descend decisions per candidate path through
//!   an ordered rule pipeline
//! - `walker` drives the depth-first traversal, consulting the filter at
//!   every node and assembling the ordered filtered tree

mod filter;
mod rules;
mod utils;
mod walker;

// Re-export public types
pub use filter::{DirVerdict, Exclusion, FileVerdict, decide_dir, decide_file};
pub use rules::{DirMatcher, NamePattern, RuleError, RuleOptions, RuleSet};
pub use utils::normalize;
pub use walker::{Entry, TreeWalker, WalkOutcome};
