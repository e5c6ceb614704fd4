//! Core library for boxset: turns a movie library into media-server
//! collection descriptors.
//!
//! The pipeline scans NFO files, groups titles by declared collection,
//! merges local metadata with an optional remote provider, picks artwork,
//! and writes one descriptor per collection. Frontends (the CLI) only
//! build a [`PipelineConfig`] and a provider and call [`Pipeline::run`].

pub mod artwork;
pub mod error;
pub mod group;
pub mod log;
pub mod merge;
pub mod pipeline;
pub mod settings;

pub use artwork::{DEFAULT_LOCALE, resolve_artwork, select_image};
pub use error::{PipelineError, SettingsError};
pub use group::{Grouping, group_titles};
pub use log::{LogEntry, RUN_LOG_FILE, RunLog, RunSummary};
pub use merge::{MergeOutcome, merge_collection, merge_fields};
pub use pipeline::{
    Pipeline, PipelineConfig, PipelineEvent, Plan, PlanAction, PlannedCollection, absolutize,
};
pub use settings::{Settings, settings_path};

// Re-export the crates frontends need alongside the pipeline.
pub use boxset_core as core;
pub use boxset_frontend as frontend;
pub use boxset_nfo as nfo;
