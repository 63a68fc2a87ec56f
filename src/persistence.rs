//! State persistence: save and load the panel preferences to/from JSON files.
//!
//! Used by the native host. Loading returns the raw JSON value; turning it
//! into preferences (with defaulting of malformed parts) is up to
//! [`PanelPreferenceState::from_persisted`].

use std::io;
use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;

use crate::data::preferences::PanelPreferenceState;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid panel state JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Serialize the preferences as pretty JSON.
pub fn state_to_json(state: &PanelPreferenceState) -> Result<String, PersistenceError> {
    Ok(serde_json::to_string_pretty(&state.to_persisted())?)
}

/// Save the preferences to a JSON file at the given path.
pub fn save_state_to_path(state: &PanelPreferenceState, path: &Path) -> Result<(), PersistenceError> {
    let txt = state_to_json(state)?;
    std::fs::write(path, txt).map_err(|source| PersistenceError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Load the raw persisted value from a JSON file.
///
/// A missing file is not an error and yields `Ok(None)`.
pub fn load_state_from_path(path: &Path) -> Result<Option<Value>, PersistenceError> {
    let txt = match std::fs::read_to_string(path) {
        Ok(txt) => txt,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(PersistenceError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    Ok(Some(serde_json::from_str(&txt)?))
}
