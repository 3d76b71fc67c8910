//! Startup seed document retrieval.
//!
//! # Responsibility
//! - Fetch the optional external board document used when no local board
//!   exists yet.
//!
//! # Invariants
//! - Sources only return raw text; validation happens in the codec.
//! - A fetch is attempted at most once per startup.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Well-known location of the seed document.
pub const DEFAULT_SEED_PATH: &str = "board.json";

/// Seed fetch failure. Always recoverable via the default board.
#[derive(Debug)]
pub enum SeedError {
    /// No seed is configured or the document does not exist.
    Unavailable,
    Io { path: PathBuf, source: std::io::Error },
}

impl Display for SeedError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable => write!(f, "no seed document available"),
            Self::Io { path, source } => {
                write!(f, "failed to read seed `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for SeedError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Unavailable => None,
            Self::Io { source, .. } => Some(source),
        }
    }
}

/// Provider of the startup seed document.
pub trait SeedSource {
    fn fetch(&self) -> Result<String, SeedError>;
}

/// Reads the seed document from a file.
#[derive(Debug, Clone)]
pub struct FileSeedSource {
    path: PathBuf,
}

impl FileSeedSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileSeedSource {
    fn default() -> Self {
        Self::new(DEFAULT_SEED_PATH)
    }
}

impl SeedSource for FileSeedSource {
    fn fetch(&self) -> Result<String, SeedError> {
        std::fs::read_to_string(&self.path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                SeedError::Unavailable
            } else {
                SeedError::Io {
                    path: self.path.clone(),
                    source,
                }
            }
        })
    }
}

/// Seed source for setups without an external document.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSeedSource;

impl SeedSource for NoSeedSource {
    fn fetch(&self) -> Result<String, SeedError> {
        Err(SeedError::Unavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::{FileSeedSource, NoSeedSource, SeedError, SeedSource};

    #[test]
    fn missing_file_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileSeedSource::new(dir.path().join("absent.json"));
        assert!(matches!(source.fetch(), Err(SeedError::Unavailable)));
    }

    #[test]
    fn reads_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("board.json");
        std::fs::write(&path, "{}").unwrap();
        assert_eq!(FileSeedSource::new(&path).fetch().unwrap(), "{}");
    }

    #[test]
    fn no_seed_source_never_succeeds() {
        assert!(NoSeedSource.fetch().is_err());
    }
}
