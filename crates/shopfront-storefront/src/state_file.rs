//! JSON snapshot of [`AppState`] between CLI invocations.
//!
//! Stands in for the browser's local storage: the session and cart survive
//! from one command to the next. Nothing in the snapshot is encrypted.

use std::path::{Path, PathBuf};

use shopfront_core::AppState;

use crate::error::StorefrontError;

#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the snapshot, returning an empty state when the file is absent.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::StateIo`] if the file exists but cannot be
    /// read, or [`StorefrontError::StateParse`] if it is not a valid snapshot.
    pub fn load(&self) -> Result<AppState, StorefrontError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no state file yet, starting empty");
                return Ok(AppState::default());
            }
            Err(e) => return Err(self.io_error(e)),
        };

        serde_json::from_str(&content).map_err(|e| StorefrontError::StateParse {
            path: self.path.display().to_string(),
            source: e,
        })
    }

    /// Writes the snapshot, creating parent directories as needed.
    ///
    /// The file is written beside its final location and renamed into place.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::StateIo`] on any filesystem failure.
    pub fn save(&self, state: &AppState) -> Result<(), StorefrontError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        let json = serde_json::to_string_pretty(state).map_err(|e| StorefrontError::StateParse {
            path: self.path.display().to_string(),
            source: e,
        })?;

        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json).map_err(|e| self.io_error(e))?;
        std::fs::rename(&tmp, &self.path).map_err(|e| self.io_error(e))?;
        Ok(())
    }

    fn io_error(&self, source: std::io::Error) -> StorefrontError {
        StorefrontError::StateIo {
            path: self.path.display().to_string(),
            source,
        }
    }
}
