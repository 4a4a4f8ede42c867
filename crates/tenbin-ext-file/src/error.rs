//! Error types for file-based data loading.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type for file operations.
pub type FileResult<T> = Result<T, FileError>;

/// Errors raised while reading or writing data files.
#[derive(Error, Debug)]
pub enum FileError {
    /// Filesystem failure.
    #[error("I/O error on {path}: {source}")]
    Io {
        /// File involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// File content could not be interpreted.
    #[error("Failed to parse {path}: {message}")]
    Parse {
        /// File involved.
        path: PathBuf,
        /// What went wrong.
        message: String,
    },

    /// Extension not recognised for this operation.
    #[error("Unsupported file extension for {path}")]
    Unsupported {
        /// File involved.
        path: PathBuf,
    },

    /// The file parsed but held no usable records.
    #[error("No records found in {path}")]
    NoRecords {
        /// File involved.
        path: PathBuf,
    },
}

impl FileError {
    /// Create an I/O error.
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Create a parse error.
    pub fn parse(path: &Path, message: impl ToString) -> Self {
        Self::Parse {
            path: path.to_path_buf(),
            message: message.to_string(),
        }
    }

    /// Create an unsupported-extension error.
    pub fn unsupported(path: &Path) -> Self {
        Self::Unsupported {
            path: path.to_path_buf(),
        }
    }

    /// Create a no-records error.
    pub fn no_records(path: &Path) -> Self {
        Self::NoRecords {
            path: path.to_path_buf(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FileError::no_records(Path::new("data/constituents.yaml"));
        assert_eq!(err.to_string(), "No records found in data/constituents.yaml");

        let err = FileError::parse(Path::new("m.json"), "expected map");
        assert!(err.to_string().contains("expected map"));
    }
}
