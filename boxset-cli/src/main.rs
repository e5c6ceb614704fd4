//! boxset CLI
//!
//! Builds media-server collection descriptors from a movie library's NFO files.

mod cli_types;
mod commands;
mod error;
mod spinner;

use std::io::Write;
use std::process::ExitCode;

use clap::Parser;
use log::LevelFilter;

use cli_types::{Cli, Commands, ConfigAction};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.quiet, cli.verbose);

    let result = match cli.command {
        Commands::Build {
            library,
            output,
            media_root,
            overwrite,
            api_key,
            no_remote,
            locale,
            language,
            no_log,
        } => commands::build::run_build(commands::build::BuildArgs {
            library,
            output,
            media_root,
            overwrite,
            api_key,
            no_remote,
            locale,
            language,
            no_log,
            quiet: cli.quiet,
        }),
        Commands::Scan { library, output } => commands::scan::run_scan(library, output, cli.quiet),
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::run_config_show(),
            ConfigAction::Path => commands::config::run_config_path(),
        },
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

/// Plain-message logger: `--quiet` shows warnings and errors, `--verbose`
/// adds debug output with module targets. `RUST_LOG` overrides both.
fn init_logging(quiet: bool, verbose: bool) {
    let level = if quiet {
        LevelFilter::Warn
    } else if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let mut builder = env_logger::Builder::new();
    builder.filter_level(level).parse_env("RUST_LOG");
    if verbose {
        builder.format(|buf, record| {
            writeln!(buf, "[{} {}] {}", record.level(), record.target(), record.args())
        });
    } else {
        builder.format(|buf, record| writeln!(buf, "{}", record.args()));
    }
    builder.init();
}
