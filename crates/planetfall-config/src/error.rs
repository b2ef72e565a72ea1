//! Errors raised while persisting `config.ron`.

use std::path::PathBuf;

/// Failure to load or store the simulation settings.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The settings file or its directory could not be read.
    #[error("cannot read settings from {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The settings file or its directory could not be written.
    #[error("cannot write settings to {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file exists but is not valid RON for [`crate::Config`].
    #[error("invalid settings in {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },

    /// The settings could not be encoded as RON.
    #[error("cannot encode settings as RON: {0}")]
    Encode(#[source] ron::Error),
}
