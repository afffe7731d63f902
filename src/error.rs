//! Error types for loading levels, settings and data
//!
//! Gameplay outcomes (collisions, running out of lives) are state transitions,
//! not errors. Only start-up and level loading can fail.

use std::fmt;
use std::path::PathBuf;

/// Top-level error enum
#[derive(Debug)]
pub enum AmazeError {
    /// A file could not be opened or read
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// A level file contained a field that could not be parsed
    Parse {
        /// Name of the level file
        file: String,
        /// 1-based line number
        line: usize,
        message: String,
    },
    /// No `data` directory holding `level0.cfg` was found
    DataDirNotFound { searched: Vec<PathBuf> },
    /// The settings file was not valid JSON
    Settings(serde_json::Error),
}

impl fmt::Display for AmazeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AmazeError::Io { path, source } => {
                write!(f, "failed to read {}: {}", path.display(), source)
            }
            AmazeError::Parse {
                file,
                line,
                message,
            } => write!(f, "{}:{}: {}", file, line, message),
            AmazeError::DataDirNotFound { searched } => {
                write!(f, "could not locate data directory (searched ")?;
                for (i, dir) in searched.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", dir.display())?;
                }
                write!(f, ")")
            }
            AmazeError::Settings(e) => write!(f, "invalid settings file: {}", e),
        }
    }
}

impl std::error::Error for AmazeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AmazeError::Io { source, .. } => Some(source),
            AmazeError::Settings(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for AmazeError {
    fn from(e: serde_json::Error) -> Self {
        AmazeError::Settings(e)
    }
}

pub type Result<T> = std::result::Result<T, AmazeError>;
