//! Renderers for the filtered tree
//!
//! The walker hands over an immutable tree plus the retained file list;
//! everything here is formatting on top of that:
//!
//! - `document` - the consolidated plain-text document (tree + file bodies)
//! - `tree` - the ASCII tree section
//! - `json` - machine-readable tree output

mod document;
mod json;
mod tree;

// Re-export public types and functions
pub use document::render_document;
pub use json::print_json;
pub use tree::render_tree;
