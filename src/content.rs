//! File content reading for the renderers
//!
//! Content is read only after the tree is finalized, by whichever renderer
//! embeds file bodies. Reads degrade per-file: an unreadable or oversized
//! file becomes an error line in the document, never a failed run.

use std::io;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use thiserror::Error;

/// Default maximum file size embedded in a document (1MB).
pub const DEFAULT_MAX_CONTENT_SIZE: u64 = 1_000_000;

/// Global configurable size cap. Set via `set_max_content_size()`.
static MAX_CONTENT_SIZE: AtomicU64 = AtomicU64::new(DEFAULT_MAX_CONTENT_SIZE);

/// Set the maximum file size for content embedding.
/// This affects all subsequent calls to `read_file_content`.
pub fn set_max_content_size(size: u64) {
    MAX_CONTENT_SIZE.store(size, Ordering::SeqCst);
}

/// Get the current maximum content size setting.
pub fn get_max_content_size() -> u64 {
    MAX_CONTENT_SIZE.load(Ordering::SeqCst)
}

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("file exceeds the maximum embedded size ({size} > {limit} bytes)")]
    TooLarge { size: u64, limit: u64 },
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Read a file body for embedding. Invalid UTF-8 sequences are replaced
/// rather than failing the read, matching how mixed-encoding repositories
/// are usually documented.
pub fn read_file_content(path: &Path) -> Result<String, ContentError> {
    let size = path.metadata()?.len();
    let limit = get_max_content_size();
    if size > limit {
        return Err(ContentError::TooLarge { size, limit });
    }
    let bytes = std::fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
