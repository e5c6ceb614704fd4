use std::path::PathBuf;
use std::time::Duration;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use boxset_lib::core::CollectionProvider;
use boxset_lib::{
    DEFAULT_LOCALE, LogEntry, Pipeline, PipelineConfig, PipelineEvent, RunSummary, Settings,
    absolutize,
};
use boxset_tmdb::{ApiKey, TmdbClient, TmdbOptions};

use crate::cli_types::LibraryArgs;
use crate::error::CliError;
use crate::spinner::spinner;

pub(crate) struct BuildArgs {
    pub library: LibraryArgs,
    pub output: Option<PathBuf>,
    pub media_root: Option<PathBuf>,
    pub overwrite: bool,
    pub api_key: Option<String>,
    pub no_remote: bool,
    pub locale: Option<String>,
    pub language: Option<String>,
    pub no_log: bool,
    pub quiet: bool,
}

/// Run the full pipeline. Returns `Ok(false)` when any collection failed.
pub(crate) fn run_build(args: BuildArgs) -> Result<bool, CliError> {
    let settings = Settings::load()?;
    let library = super::require_library(&settings, args.library.library)?;
    let output = settings.resolve_output(args.output).ok_or_else(|| {
        CliError::config(
            "no output directory: pass --output, set $BOXSET_OUTPUT, or set [library] output_dir in the config file",
        )
    })?;
    let media_root = settings.resolve_media_root(args.media_root);
    let locale = args
        .locale
        .or_else(|| settings.tmdb.image_locale.clone())
        .unwrap_or_else(|| DEFAULT_LOCALE.to_string());

    let provider = if args.no_remote {
        log::info!(
            "{}",
            "Remote lookups disabled: using local metadata only"
                .if_supports_color(Stdout, |t| t.dimmed()),
        );
        None
    } else {
        connect_tmdb(&settings, args.api_key, args.language, &locale)?
    };

    let config = PipelineConfig::new(absolutize(&library), absolutize(&output))
        .media_root(media_root)
        .overwrite(args.overwrite || settings.output.overwrite)
        .preferred_locale(locale)
        .require_video(!args.library.allow_missing_video)
        .write_log(!args.no_log);

    log::info!(
        "Building collections from {}",
        config
            .library_root
            .display()
            .if_supports_color(Stdout, |t| t.cyan()),
    );
    log::info!(
        "  Output: {}",
        config
            .output_dir
            .display()
            .if_supports_color(Stdout, |t| t.dimmed()),
    );
    if let Some(media_root) = &config.media_root {
        log::info!(
            "  Media root: {}",
            media_root.display().if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    log::info!("");

    let pipeline = Pipeline::new(config, provider);
    let pb = spinner(args.quiet, "Scanning library...");
    let result = pipeline.run_with_progress(&mut |event| match event {
        PipelineEvent::ScanStarted { root } => {
            pb.set_message(format!("Scanning {}...", root.display()));
        }
        PipelineEvent::ScanFinished {
            titles,
            collections,
            warnings,
        } => {
            pb.suspend(|| {
                log::info!(
                    "{} Found {} titles in {} collections{}",
                    "\u{2714}".if_supports_color(Stdout, |t| t.green()),
                    titles,
                    collections,
                    if *warnings > 0 {
                        format!(" ({} warnings)", warnings)
                    } else {
                        String::new()
                    },
                );
            });
        }
        PipelineEvent::CollectionStarted { name, index, total } => {
            pb.set_message(format!("[{}/{}] {}", index + 1, total, name));
        }
        PipelineEvent::CollectionFinished { entry, .. } => {
            pb.suspend(|| print_entry(entry));
        }
    });
    pb.finish_and_clear();

    let summary = result?;
    print_summary(&summary, pipeline.config().write_log);
    Ok(summary.is_success())
}

/// Build a TMDb client, or `None` (local-only) when no API key is set.
fn connect_tmdb(
    settings: &Settings,
    cli_key: Option<String>,
    cli_language: Option<String>,
    locale: &str,
) -> Result<Option<Box<dyn CollectionProvider>>, CliError> {
    let key = ApiKey::resolve(cli_key, settings.tmdb.api_key.clone());
    let Some(value) = key.value.clone() else {
        log::warn!(
            "{} No TMDb API key set ($TMDB_API_KEY, --api-key, or [tmdb] api_key); using local metadata only",
            "\u{26A0}".if_supports_color(Stdout, |t| t.yellow()),
        );
        return Ok(None);
    };

    let defaults = TmdbOptions::default();
    let options = TmdbOptions {
        language: cli_language
            .or_else(|| settings.tmdb.language.clone())
            .unwrap_or(defaults.language),
        image_locale: locale.to_string(),
        request_interval: settings
            .tmdb
            .request_interval_ms
            .map(Duration::from_millis)
            .unwrap_or(defaults.request_interval),
        timeout: settings
            .tmdb
            .timeout_secs
            .map(Duration::from_secs)
            .unwrap_or(defaults.timeout),
        ..defaults
    };
    let client = TmdbClient::new(value, options)?;
    log::debug!(
        "Using TMDb API key {} from {}",
        key.masked().unwrap_or_default(),
        key.source
    );
    Ok(Some(Box::new(client)))
}

fn print_entry(entry: &LogEntry) {
    match entry {
        LogEntry::Written {
            collection,
            members,
            images,
            lookup_error,
            image_failures,
            ..
        } => {
            log::info!(
                "  {} {} {}",
                "\u{2714}".if_supports_color(Stdout, |t| t.green()),
                collection.if_supports_color(Stdout, |t| t.bold()),
                format!("({} titles, {} images)", members, images.len())
                    .if_supports_color(Stdout, |t| t.dimmed()),
            );
            if let Some(e) = lookup_error {
                log::warn!(
                    "    {} lookup failed, local metadata only: {}",
                    "\u{26A0}".if_supports_color(Stdout, |t| t.yellow()),
                    e
                );
            }
            for failure in image_failures {
                log::warn!(
                    "    {} {}",
                    "\u{26A0}".if_supports_color(Stdout, |t| t.yellow()),
                    failure
                );
            }
        }
        LogEntry::Skipped { collection, .. } => {
            log::info!(
                "  {} {} {}",
                "-".if_supports_color(Stdout, |t| t.dimmed()),
                collection,
                "(exists, skipped)".if_supports_color(Stdout, |t| t.dimmed()),
            );
        }
        LogEntry::Failed {
            collection,
            message,
            ..
        } => {
            log::error!(
                "  {} {}: {}",
                "\u{2718}".if_supports_color(Stdout, |t| t.red()),
                collection,
                message
            );
        }
        LogEntry::ScanWarning { .. } | LogEntry::Ungrouped { .. } => {}
    }
}

fn print_summary(summary: &RunSummary, wrote_log: bool) {
    log::info!("");
    log::info!(
        "{}",
        "Summary".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!(
        "  Titles:      {} scanned, {} without a collection",
        summary.titles_scanned,
        summary.titles_ungrouped
    );
    let failed = format!("{} failed", summary.failed);
    let failed = if summary.failed > 0 {
        failed.if_supports_color(Stdout, |t| t.red()).to_string()
    } else {
        failed
    };
    log::info!(
        "  Collections: {} written, {} skipped, {}",
        summary.written.if_supports_color(Stdout, |t| t.green()),
        summary.skipped,
        failed,
    );
    if summary.lookup_failures > 0 {
        log::info!("  Lookup failures: {}", summary.lookup_failures);
    }
    log::info!(
        "  Images:      {} downloaded, {} failed",
        summary.images_downloaded,
        summary.image_failures
    );
    if !summary.warnings.is_empty() {
        log::info!(
            "  {} {} warnings{}",
            "\u{26A0}".if_supports_color(Stdout, |t| t.yellow()),
            summary.warnings.len(),
            if wrote_log { " (see boxset-log.txt)" } else { "" },
        );
    }
}
