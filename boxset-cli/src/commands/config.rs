use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use boxset_lib::{Settings, settings_path};
use boxset_tmdb::ApiKey;

use crate::error::CliError;

/// Show the config file location, its contents, and the effective API key.
pub(crate) fn run_config_show() -> Result<bool, CliError> {
    let path = settings_path();

    log::info!(
        "{}",
        "boxset Configuration".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("");
    if path.exists() {
        log::info!(
            "  Config file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(exists)".if_supports_color(Stdout, |t| t.green()),
        );
    } else {
        log::info!(
            "  Config file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(not found)".if_supports_color(Stdout, |t| t.dimmed()),
        );
    }

    let settings = Settings::load()?;
    let key = ApiKey::resolve(None, settings.tmdb.api_key.clone());
    match key.masked() {
        Some(masked) => log::info!(
            "  TMDb API key: {} {}",
            masked,
            format!("(from {})", key.source).if_supports_color(Stdout, |t| t.dimmed()),
        ),
        None => log::info!(
            "  TMDb API key: {}",
            "not set (local metadata only)".if_supports_color(Stdout, |t| t.yellow()),
        ),
    }
    if let Some(library) = settings.resolve_library(None) {
        log::info!("  Library: {}", library.display());
    }
    if let Some(output) = settings.resolve_output(None) {
        log::info!("  Output: {}", output.display());
    }
    log::info!("");

    let shown = settings.to_display_string()?;
    if !shown.trim().is_empty() {
        for line in shown.lines() {
            log::info!("  {}", line.if_supports_color(Stdout, |t| t.dimmed()));
        }
    }
    Ok(true)
}

/// Print the config file path.
pub(crate) fn run_config_path() -> Result<bool, CliError> {
    log::info!("{}", settings_path().display());
    Ok(true)
}
