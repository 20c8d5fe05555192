//! ASCII tree rendering
//!
//! Renders the filtered tree with box-drawing connectors. The root is shown
//! as `name/`; every other entry appears under a `├── `/`└── ` connector
//! with `│   ` continuation prefixes.

use crate::walk::Entry;

pub fn render_tree(root: &Entry) -> String {
    let mut out = String::new();
    out.push_str(root.name());
    out.push_str("/\n");
    if let Entry::Dir { children, .. } = root {
        render_children(children, "", &mut out);
    }
    out
}

fn render_children(entries: &[Entry], prefix: &str, out: &mut String) {
    for (idx, entry) in entries.iter().enumerate() {
        let is_last = idx == entries.len() - 1;
        let connector = if is_last { "└── " } else { "├── " };
        out.push_str(prefix);
        out.push_str(connector);
        out.push_str(entry.name());
        out.push('\n');

        if let Entry::Dir { children, .. } = entry {
            let child_prefix = if is_last {
                format!("{}    ", prefix)
            } else {
                format!("{}│   ", prefix)
            };
            render_children(children, &child_prefix, out);
        }
    }
}
