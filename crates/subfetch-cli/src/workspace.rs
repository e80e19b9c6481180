//! Profile directory and temp download area
//!
//! The temp area is wiped once when a [`Workspace`] is prepared, so it only
//! ever holds files from the current run.

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

/// Name of the download area inside the profile directory
pub const TEMP_DIR_NAME: &str = "temp";

/// Errors raised while managing the profile directory
#[derive(Debug, Error)]
pub enum WorkspaceError {
    /// Old temp area could not be removed
    #[error("Failed to clear {}: {source}", path.display())]
    Clear {
        /// Directory being removed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Temp area could not be created
    #[error("Failed to create {}: {source}", path.display())]
    Create {
        /// Directory being created
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Subtitle could not be written
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        /// File being written
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Subtitle format is not usable as a file extension
    #[error("Invalid subtitle format: '{0}'")]
    InvalidFormat(String),
}

/// Profile directory with a freshly emptied temp area
#[derive(Debug, Clone)]
pub struct Workspace {
    profile_dir: PathBuf,
    temp_dir: PathBuf,
}

impl Workspace {
    /// Profile directory used when none is configured
    pub fn default_profile_dir() -> PathBuf {
        std::env::temp_dir().join("subfetch")
    }

    /// Empty and recreate `<profile_dir>/temp`
    pub fn prepare(profile_dir: impl Into<PathBuf>) -> Result<Self, WorkspaceError> {
        let profile_dir = profile_dir.into();
        let temp_dir = profile_dir.join(TEMP_DIR_NAME);

        if temp_dir.exists() {
            debug!("Clearing {}", temp_dir.display());
            fs::remove_dir_all(&temp_dir).map_err(|source| WorkspaceError::Clear {
                path: temp_dir.clone(),
                source,
            })?;
        }

        fs::create_dir_all(&temp_dir).map_err(|source| WorkspaceError::Create {
            path: temp_dir.clone(),
            source,
        })?;

        Ok(Self {
            profile_dir,
            temp_dir,
        })
    }

    /// Profile directory
    pub fn profile_dir(&self) -> &Path {
        &self.profile_dir
    }

    /// Temp download area
    pub fn temp_dir(&self) -> &Path {
        &self.temp_dir
    }

    /// Store subtitle bytes as `<temp>/<uuid>.<format>`
    pub fn store_subtitle(&self, content: &[u8], format: &str) -> Result<PathBuf, WorkspaceError> {
        check_format(format)?;

        let path = self.temp_dir.join(format!("{}.{format}", Uuid::new_v4()));
        fs::write(&path, content).map_err(|source| WorkspaceError::Write {
            path: path.clone(),
            source,
        })?;

        debug!("Stored {} bytes at {}", content.len(), path.display());
        Ok(path)
    }
}

/// Check that `format` can be used as a file extension
pub fn check_format(format: &str) -> Result<(), WorkspaceError> {
    if format.is_empty() || !format.bytes().all(|b| b.is_ascii_alphanumeric()) {
        return Err(WorkspaceError::InvalidFormat(format.to_string()));
    }
    Ok(())
}
