pub(crate) mod build;
pub(crate) mod config;
pub(crate) mod scan;

use std::path::PathBuf;

use boxset_lib::Settings;

use crate::error::CliError;

/// Resolve the library root or explain how to set it.
pub(crate) fn require_library(
    settings: &Settings,
    cli: Option<PathBuf>,
) -> Result<PathBuf, CliError> {
    settings.resolve_library(cli).ok_or_else(|| {
        CliError::config(
            "no library root: pass --library, set $BOXSET_LIBRARY, or set [library] root in the config file",
        )
    })
}
