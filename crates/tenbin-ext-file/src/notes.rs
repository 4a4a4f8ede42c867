//! Optional commentary notes.

use std::path::Path;

use tracing::debug;

use crate::error::FileResult;
use crate::read_text;

/// Read a notes file. A missing file means no notes.
///
/// # Errors
///
/// Fails only if the file exists but cannot be read.
pub fn load_notes(path: &Path) -> FileResult<Option<String>> {
    if !path.exists() {
        debug!(path = %path.display(), "no notes file");
        return Ok(None);
    }
    read_text(path).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_notes() {
        assert_eq!(load_notes(Path::new("/nonexistent/notes.md")).unwrap(), None);
    }
}
