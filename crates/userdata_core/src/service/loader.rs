//! User data file loader.
//!
//! # Responsibility
//! - Read a user data YAML file and decode it into `UserData`.
//!
//! # Invariants
//! - Either a fully decoded document is returned or an error; never a partial
//!   document.
//! - Errors are returned to the caller, not logged here.

use crate::model::userdata::UserData;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Failure while loading a user data file.
#[derive(Debug)]
pub enum LoadError {
    /// File missing, unreadable or permission denied.
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Malformed YAML, shape mismatch or malformed date.
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },
}

impl LoadError {
    pub fn path(&self) -> &Path {
        match self {
            Self::Read { path, .. } | Self::Parse { path, .. } => path,
        }
    }
}

impl Display for LoadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read { path, source } => write!(
                f,
                "unable to read user data file {}: {source}",
                path.display()
            ),
            Self::Parse { path, source } => write!(
                f,
                "unable to parse user data file {}: {source}",
                path.display()
            ),
        }
    }
}

impl Error for LoadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Read { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
        }
    }
}

/// Reads and decodes the user data file at `path`.
///
/// # Errors
/// - `LoadError::Read` when the file cannot be read in full.
/// - `LoadError::Parse` when the content is not a valid user data document,
///   including any malformed `start`/`end` date.
pub fn load(path: impl AsRef<Path>) -> Result<UserData, LoadError> {
    let path = path.as_ref();
    let started_at = Instant::now();

    let bytes = std::fs::read(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let data = parse_user_data(&bytes, path)?;

    info!(
        "event=userdata_load module=userdata status=ok users={} affiliations={} duration_ms={}",
        data.users.len(),
        data.affiliation_count(),
        started_at.elapsed().as_millis()
    );
    Ok(data)
}

/// Decodes an in-memory user data document; `path` is only used in errors.
///
/// An empty or whitespace-only document decodes to zero users.
pub fn parse_user_data(bytes: &[u8], path: impl AsRef<Path>) -> Result<UserData, LoadError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(UserData::default());
    }

    serde_yaml::from_slice(bytes).map_err(|source| LoadError::Parse {
        path: path.as_ref().to_path_buf(),
        source,
    })
}
