//! Shared path helpers for rule construction and filtering

/// Normalize a path string to the canonical forward-slash form.
///
/// Backslashes are treated as separators, empty and `.` components are
/// dropped, and there is no trailing slash. All rule comparisons happen on
/// normalized strings, so this must be applied both when rules are built and
/// when candidate paths are produced by the walker.
pub fn normalize(path: &str) -> String {
    path.replace('\\', "/")
        .split('/')
        .filter(|c| !c.is_empty() && *c != ".")
        .collect::<Vec<_>>()
        .join("/")
}

/// The last component of a normalized relative path.
pub fn base_name(rel: &str) -> &str {
    rel.rsplit('/').next().unwrap_or(rel)
}

/// The lowercase extension of a file name, including the leading dot.
///
/// Returns `None` for names without a dot. A leading dot alone does not
/// count as an extension (`.bashrc` has none).
pub fn extension_of(name: &str) -> Option<String> {
    match name.rfind('.') {
        Some(idx) if idx > 0 => Some(name[idx..].to_lowercase()),
        _ => None,
    }
}

/// True when `path` is strictly nested under `ancestor` (both normalized).
pub fn is_under(path: &str, ancestor: &str) -> bool {
    path.len() > ancestor.len()
        && path.starts_with(ancestor)
        && path.as_bytes()[ancestor.len()] == b'/'
}
