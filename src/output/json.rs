//! JSON output formatting

use std::io;

use crate::walk::Entry;

/// Print the filtered tree as pretty-printed JSON to stdout.
pub fn print_json(tree: &Entry) -> io::Result<()> {
    let json =
        serde_json::to_string_pretty(tree).map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
    println!("{}", json);
    Ok(())
}
