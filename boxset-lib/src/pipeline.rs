//! The build pipeline: scan, group, merge, select artwork, write.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::path::{Path, PathBuf};

use boxset_core::{Collection, CollectionProvider, MetadataFields};
use boxset_frontend::{CollectionWriter, PathMapper, WriteOutcome};
use boxset_nfo::{ScanOptions, ScanReport, ScanWarning, scan_library};

use crate::artwork::{DEFAULT_LOCALE, resolve_artwork};
use crate::error::PipelineError;
use crate::group::{Grouping, group_titles};
use crate::log::{LogEntry, RUN_LOG_FILE, RunSummary};
use crate::merge::merge_collection;

/// Everything a run needs to know, passed in explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    pub library_root: PathBuf,
    pub output_dir: PathBuf,
    /// Library root as seen by the media server, if it differs.
    pub media_root: Option<PathBuf>,
    pub overwrite: bool,
    /// Language tag preferred for remote artwork.
    pub preferred_locale: String,
    /// Skip NFOs with no video file next to them.
    pub require_video: bool,
    /// Write `boxset-log.txt` into the output directory.
    pub write_log: bool,
}

impl PipelineConfig {
    pub fn new(library_root: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            library_root: library_root.into(),
            output_dir: output_dir.into(),
            media_root: None,
            overwrite: false,
            preferred_locale: DEFAULT_LOCALE.to_string(),
            require_video: true,
            write_log: true,
        }
    }

    pub fn media_root(mut self, media_root: Option<PathBuf>) -> Self {
        self.media_root = media_root;
        self
    }

    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    pub fn preferred_locale(mut self, locale: impl Into<String>) -> Self {
        self.preferred_locale = locale.into();
        self
    }

    pub fn require_video(mut self, require: bool) -> Self {
        self.require_video = require;
        self
    }

    pub fn write_log(mut self, write_log: bool) -> Self {
        self.write_log = write_log;
        self
    }
}

/// Progress notifications emitted during a run.
#[derive(Debug, Clone)]
pub enum PipelineEvent {
    ScanStarted {
        root: PathBuf,
    },
    ScanFinished {
        titles: usize,
        collections: usize,
        warnings: usize,
    },
    CollectionStarted {
        name: String,
        index: usize,
        total: usize,
    },
    CollectionFinished {
        name: String,
        entry: LogEntry,
    },
}

/// What `plan` expects to happen to one collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanAction {
    Create,
    Overwrite,
    Skip,
    /// An earlier collection already maps to the same output folder.
    Conflict,
}

#[derive(Debug, Clone)]
pub struct PlannedCollection {
    pub name: String,
    pub members: usize,
    pub target: PathBuf,
    pub action: PlanAction,
    /// Metadata from the members alone.
    pub local_fields: MetadataFields,
}

/// Dry-run result: what a build would do without network or writes.
#[derive(Debug, Clone, Default)]
pub struct Plan {
    pub collections: Vec<PlannedCollection>,
    pub titles_scanned: usize,
    pub ungrouped: Vec<PathBuf>,
    pub warnings: Vec<ScanWarning>,
}

struct Scanned {
    titles_scanned: usize,
    warnings: Vec<ScanWarning>,
    grouping: Grouping,
}

/// Descriptor paths handed out during one run, keyed case-insensitively so
/// names differing only in case or in stripped characters cannot share a
/// folder.
#[derive(Debug, Default)]
struct TargetClaims {
    owners: HashMap<String, String>,
}

impl TargetClaims {
    /// Claim `target` for `collection`. Returns the collection that already
    /// holds it, if any.
    fn claim(&mut self, target: &Path, collection: &str) -> Option<&str> {
        match self.owners.entry(target.to_string_lossy().to_lowercase()) {
            Entry::Occupied(entry) => Some(entry.into_mut().as_str()),
            Entry::Vacant(entry) => {
                entry.insert(collection.to_string());
                None
            }
        }
    }
}

fn conflict_message(target: &Path, owner: &str) -> String {
    format!(
        "output folder {} is already used by collection '{}'",
        target.parent().unwrap_or(target).display(),
        owner
    )
}

/// Drives a build from a library scan to written descriptors.
pub struct Pipeline {
    config: PipelineConfig,
    provider: Option<Box<dyn CollectionProvider>>,
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("config", &self.config)
            .field("provider", &self.provider.as_ref().map(|p| p.name()))
            .finish()
    }
}

impl Pipeline {
    /// Without a provider the pipeline runs local-only.
    pub fn new(config: PipelineConfig, provider: Option<Box<dyn CollectionProvider>>) -> Self {
        Self { config, provider }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn run(&self) -> Result<RunSummary, PipelineError> {
        self.run_with_progress(&mut |_| {})
    }

    /// Run the full pipeline, reporting progress through `on_event`.
    ///
    /// Only an unreadable library or an uncreatable output directory stops
    /// the run. Per-collection failures are recorded in the summary.
    pub fn run_with_progress(
        &self,
        on_event: &mut dyn FnMut(&PipelineEvent),
    ) -> Result<RunSummary, PipelineError> {
        let Scanned {
            titles_scanned,
            warnings,
            grouping,
        } = self.scan(on_event)?;

        std::fs::create_dir_all(&self.config.output_dir).map_err(|source| {
            PipelineError::OutputDir {
                path: self.config.output_dir.clone(),
                source,
            }
        })?;

        let mut summary = RunSummary {
            titles_scanned,
            ..Default::default()
        };
        for warning in warnings {
            summary.record(LogEntry::ScanWarning {
                path: warning.path,
                message: warning.message,
            });
        }
        for title in &grouping.ungrouped {
            summary.record(LogEntry::Ungrouped {
                path: title.id().to_path_buf(),
            });
        }

        let writer = self.writer();
        let mut claims = TargetClaims::default();
        let total = grouping.collections.len();
        for (index, collection) in grouping.collections.into_iter().enumerate() {
            on_event(&PipelineEvent::CollectionStarted {
                name: collection.name.clone(),
                index,
                total,
            });
            let name = collection.name.clone();
            let target = writer.target_path(&name);
            let entry = match claims.claim(&target, &name) {
                Some(owner) => {
                    let message = conflict_message(&target, owner);
                    log::error!("Cannot write '{}': {}", name, message);
                    LogEntry::Failed {
                        collection: collection.name,
                        message,
                        lookup_error: None,
                    }
                }
                None => self.process(collection, &writer),
            };
            on_event(&PipelineEvent::CollectionFinished {
                name,
                entry: entry.clone(),
            });
            summary.record(entry);
        }

        if self.config.write_log {
            let log_path = self.config.output_dir.join(RUN_LOG_FILE);
            match summary.write_log(&log_path) {
                Ok(()) => log::debug!("Run log written to {}", log_path.display()),
                Err(e) => log::warn!("Could not write run log {}: {}", log_path.display(), e),
            }
        }

        log::info!(
            "{} written, {} skipped, {} failed ({} titles scanned, {} ungrouped)",
            summary.written,
            summary.skipped,
            summary.failed,
            summary.titles_scanned,
            summary.titles_ungrouped
        );
        Ok(summary)
    }

    /// Scan, group, and merge local metadata only, reporting which
    /// descriptors would be created, overwritten, or skipped.
    pub fn plan(&self) -> Result<Plan, PipelineError> {
        let Scanned {
            titles_scanned,
            warnings,
            grouping,
        } = self.scan(&mut |_| {})?;
        let writer = self.writer();
        let mut claims = TargetClaims::default();

        let collections = grouping
            .collections
            .iter()
            .map(|collection| {
                let target = writer.target_path(&collection.name);
                let action = if claims.claim(&target, &collection.name).is_some() {
                    PlanAction::Conflict
                } else if !target.exists() {
                    PlanAction::Create
                } else if self.config.overwrite {
                    PlanAction::Overwrite
                } else {
                    PlanAction::Skip
                };
                PlannedCollection {
                    name: collection.name.clone(),
                    members: collection.members.len(),
                    target,
                    action,
                    local_fields: merge_collection(collection, None).fields,
                }
            })
            .collect();

        Ok(Plan {
            collections,
            titles_scanned,
            ungrouped: grouping
                .ungrouped
                .iter()
                .map(|t| t.id().to_path_buf())
                .collect(),
            warnings,
        })
    }

    fn scan(&self, on_event: &mut dyn FnMut(&PipelineEvent)) -> Result<Scanned, PipelineError> {
        let root = &self.config.library_root;
        on_event(&PipelineEvent::ScanStarted { root: root.clone() });
        log::info!("Scanning {}", root.display());

        let options = ScanOptions::new().require_video(self.config.require_video);
        let ScanReport {
            titles, warnings, ..
        } = scan_library(root, &options).map_err(|source| PipelineError::Library {
            path: root.clone(),
            source,
        })?;
        let titles_scanned = titles.len();
        let grouping = group_titles(titles);

        on_event(&PipelineEvent::ScanFinished {
            titles: titles_scanned,
            collections: grouping.collections.len(),
            warnings: warnings.len(),
        });
        log::info!(
            "Found {} titles in {} collections",
            titles_scanned,
            grouping.collections.len()
        );
        Ok(Scanned {
            titles_scanned,
            warnings,
            grouping,
        })
    }

    fn writer(&self) -> CollectionWriter {
        CollectionWriter::new(&self.config.output_dir)
            .overwrite(self.config.overwrite)
            .path_mapper(PathMapper::new(
                &self.config.library_root,
                self.config.media_root.clone(),
            ))
    }

    /// Merge, select artwork, and write one collection.
    fn process(&self, mut collection: Collection, writer: &CollectionWriter) -> LogEntry {
        if writer.would_skip(&collection.name) {
            log::debug!("'{}' already written, skipping", collection.name);
            return LogEntry::Skipped {
                path: writer.target_path(&collection.name),
                collection: collection.name,
            };
        }

        let provider = self.provider.as_deref();
        let merged = merge_collection(&collection, provider);
        collection.fields = merged.fields;
        resolve_artwork(
            &mut collection,
            merged.candidate.as_ref(),
            &self.config.preferred_locale,
        );

        match writer.write(&collection, provider) {
            Ok(WriteOutcome::Written {
                path,
                images,
                image_failures,
            }) => LogEntry::Written {
                members: collection.members.len(),
                path,
                filled: merged.filled,
                images: images.into_iter().map(|i| i.path).collect(),
                lookup_error: merged.lookup_error.map(|e| e.to_string()),
                image_failures: image_failures
                    .into_iter()
                    .map(|f| format!("'{}' {}: {}", collection.name, f.kind, f.reason))
                    .collect(),
                collection: collection.name,
            },
            Ok(WriteOutcome::Skipped { path }) => LogEntry::Skipped {
                collection: collection.name,
                path,
            },
            Err(e) => {
                log::error!("Failed to write '{}': {}", collection.name, e);
                LogEntry::Failed {
                    collection: collection.name,
                    message: e.to_string(),
                    lookup_error: merged.lookup_error.map(|e| e.to_string()),
                }
            }
        }
    }
}

/// Resolve `path` against the current directory when it is relative.
pub fn absolutize(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(path))
        .unwrap_or_else(|_| path.to_path_buf())
}
