use std::path::PathBuf;

use thiserror::Error;

use boxset_nfo::NfoError;

/// Errors that stop a whole run.
///
/// Everything scoped to a single title or collection is reported in the
/// run summary instead.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The library root could not be read.
    #[error("Cannot scan library {}: {source}", path.display())]
    Library {
        path: PathBuf,
        #[source]
        source: NfoError,
    },

    /// The output directory could not be created.
    #[error("Cannot create output directory {}: {source}", path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors loading the settings file.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("I/O error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid settings in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Cannot serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),
}
