//! Plain-text document renderer
//!
//! Produces the consolidated document: a bracketed tree section followed by
//! per-file content blocks in traversal order. Content is read here, after
//! the tree is finalized; a file that fails to read becomes an error line
//! inside its block and the document keeps going.

use std::io::{self, Write};
use std::path::Path;

use crate::content::read_file_content;
use crate::walk::Entry;

use super::tree::render_tree;

/// Write the full document for a filtered tree rooted at `root` on disk.
/// With `include_content` false only the tree section is emitted.
pub fn render_document<W: Write>(
    out: &mut W,
    tree: &Entry,
    root: &Path,
    include_content: bool,
) -> io::Result<()> {
    writeln!(out, "Repository Documentation")?;
    writeln!(out)?;
    writeln!(out, "Directory/File Tree Begins -->")?;
    writeln!(out)?;
    out.write_all(render_tree(tree).as_bytes())?;
    writeln!(out)?;
    writeln!(out, "<-- Directory/File Tree Ends")?;

    if include_content {
        writeln!(out)?;
        writeln!(out, "File Content Begins -->")?;
        writeln!(out)?;
        if let Entry::Dir { children, .. } = tree {
            write_contents(out, children, root, 0)?;
        }
        writeln!(out, "<-- File Content Ends")?;
    }

    Ok(())
}

/// Emit content blocks depth-first, matching the tree's traversal order.
/// Bodies are indented two spaces per directory level.
fn write_contents<W: Write>(
    out: &mut W,
    entries: &[Entry],
    root: &Path,
    depth: usize,
) -> io::Result<()> {
    let indent = "  ".repeat(depth);
    for entry in entries {
        match entry {
            Entry::Dir { children, .. } => write_contents(out, children, root, depth + 1)?,
            Entry::File { path, .. } => {
                writeln!(out, "{}[File Begins] {}", indent, path)?;
                match read_file_content(&root.join(path)) {
                    Ok(content) => {
                        for line in content.lines() {
                            writeln!(out, "{}{}", indent, line)?;
                        }
                    }
                    Err(err) => {
                        writeln!(out, "{}Error reading file: {}", indent, err)?;
                    }
                }
                writeln!(out, "{}[File Ends] {}", indent, path)?;
                writeln!(out)?;
            }
        }
    }
    Ok(())
}
