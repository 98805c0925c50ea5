use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("Failed to serialize state for {}", path.display())]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write state file {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A JSON document on disk holding one monitor's persisted state.
#[derive(Debug, Clone)]
pub struct StateFile {
    path: PathBuf,
}

impl StateFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the state, falling back to `T::default()` when the file is
    /// missing or cannot be decoded.
    pub fn load<T>(&self) -> T
    where
        T: DeserializeOwned + Default,
    {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No state file at {}, starting empty", self.path.display());
                return T::default();
            }
            Err(e) => {
                warn!("Failed to read state file {}: {}", self.path.display(), e);
                return T::default();
            }
        };

        match serde_json::from_str(&text) {
            Ok(state) => state,
            Err(e) => {
                warn!("Ignoring corrupt state file {}: {}", self.path.display(), e);
                T::default()
            }
        }
    }

    /// Writes the state pretty-printed, via a temp file renamed over the target.
    pub fn save<T>(&self, state: &T) -> Result<(), StateError>
    where
        T: Serialize + ?Sized,
    {
        let mut json = serde_json::to_string_pretty(state).map_err(|source| StateError::Serialize {
            path: self.path.clone(),
            source,
        })?;
        json.push('\n');

        let write_err = |source| StateError::Write {
            path: self.path.clone(),
            source,
        };

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir).map_err(write_err)?;

        let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(write_err)?;
        tmp.write_all(json.as_bytes()).map_err(write_err)?;
        tmp.as_file().sync_all().map_err(write_err)?;
        tmp.persist(&self.path).map_err(|e| write_err(e.error))?;

        debug!("Saved state to {}", self.path.display());
        Ok(())
    }
}
