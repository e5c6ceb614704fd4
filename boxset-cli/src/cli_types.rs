//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "boxset")]
#[command(about = "Build Jellyfin/Emby collection descriptors from movie NFO files", long_about = None)]
pub(crate) struct Cli {
    /// Only show warnings and errors (suppress normal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where the movie library lives.
#[derive(Args, Clone)]
pub(crate) struct LibraryArgs {
    /// Library root to scan for .nfo files (or $BOXSET_LIBRARY)
    #[arg(short, long)]
    pub library: Option<PathBuf>,

    /// Accept NFO files that have no video file next to them
    #[arg(long)]
    pub allow_missing_video: bool,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Scan the library and write one collection.xml per collection
    Build {
        #[command(flatten)]
        library: LibraryArgs,

        /// Directory that receives the "<Name> [Boxset]" folders (or $BOXSET_OUTPUT)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Library root as seen by the media server, used in written paths
        #[arg(long)]
        media_root: Option<PathBuf>,

        /// Replace existing collection.xml files
        #[arg(long)]
        overwrite: bool,

        /// TMDb API key (or $TMDB_API_KEY)
        #[arg(long)]
        api_key: Option<String>,

        /// Use local NFO metadata only
        #[arg(long)]
        no_remote: bool,

        /// Preferred artwork language (e.g., en, fr, de)
        #[arg(long)]
        locale: Option<String>,

        /// TMDb language for overviews (e.g., en-US)
        #[arg(long)]
        language: Option<String>,

        /// Disable the boxset-log.txt run log
        #[arg(long)]
        no_log: bool,
    },

    /// List the collections the library declares, without writing anything
    Scan {
        #[command(flatten)]
        library: LibraryArgs,

        /// Output directory, to show which collections already exist
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Inspect the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show the current configuration and where values come from
    Show,

    /// Print the config file path
    Path,
}
