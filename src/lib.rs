//! repodoc - walk a repository and produce one consolidated document

pub mod config;
pub mod content;
pub mod output;
pub mod stats;
pub mod walk;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use config::{AppConfig, ConfigError};
pub use output::{print_json, render_document, render_tree};
pub use stats::{WalkStats, print_stats};
pub use walk::{Entry, RuleError, RuleOptions, RuleSet, TreeWalker, WalkOutcome};
