use thiserror::Error;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// The pipeline could not run
    #[error("{0}")]
    Pipeline(#[from] boxset_lib::PipelineError),

    /// The settings file could not be loaded
    #[error("{0}")]
    Settings(#[from] boxset_lib::SettingsError),

    /// The TMDb client could not be created
    #[error("TMDb error: {0}")]
    Tmdb(#[from] boxset_tmdb::TmdbError),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),
}

impl CliError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
