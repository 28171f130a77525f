//! Crate error type

use std::path::PathBuf;

/// Errors surfaced outside the per-frame physics update
#[derive(thiserror::Error, Debug)]
pub enum SimError {
    /// Asteroid placement gave up after too many overlapping candidates
    #[error("could not place asteroid #{placed} after {attempts} attempts")]
    PlacementFailed { placed: usize, attempts: u32 },

    /// Entity kind tag not known to the renderer dispatch
    #[error("unknown world object kind: {0:?}")]
    InvalidKind(String),

    /// Malformed command message
    #[error("protocol error: {0}")]
    Protocol(#[source] serde_json::Error),

    /// Settings file could not be read or written
    #[error("settings I/O error at {}: {source}", path.display())]
    Settings {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Settings file is not valid JSON for `Settings`
    #[error("settings format error: {0}")]
    SettingsFormat(#[source] serde_json::Error),

    /// Settings parsed but hold unusable values
    #[error("invalid settings: {0}")]
    InvalidSettings(String),
}

pub type Result<T> = std::result::Result<T, SimError>;
