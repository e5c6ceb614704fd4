use std::path::{Path, PathBuf};

use boxset_core::Field;

/// File name of the run log written into the output directory.
pub const RUN_LOG_FILE: &str = "boxset-log.txt";

/// A single entry in the run log.
#[derive(Debug, Clone, PartialEq)]
pub enum LogEntry {
    Written {
        collection: String,
        path: PathBuf,
        members: usize,
        /// Fields filled from the remote provider.
        filled: Vec<Field>,
        images: Vec<PathBuf>,
        /// Set when the remote lookup failed and local metadata was used.
        lookup_error: Option<String>,
        image_failures: Vec<String>,
    },
    Skipped {
        collection: String,
        path: PathBuf,
    },
    Failed {
        collection: String,
        message: String,
        /// Set when the remote lookup had already failed before the write.
        lookup_error: Option<String>,
    },
    ScanWarning {
        path: PathBuf,
        message: String,
    },
    Ungrouped {
        path: PathBuf,
    },
}

/// Collects per-collection results of a run and writes a log file.
#[derive(Debug, Clone, Default)]
pub struct RunLog {
    entries: Vec<LogEntry>,
}

impl RunLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, entry: LogEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }
}

/// Outcome of a whole run.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub written: usize,
    pub skipped: usize,
    pub failed: usize,
    pub titles_scanned: usize,
    pub titles_ungrouped: usize,
    pub lookup_failures: usize,
    pub images_downloaded: usize,
    pub image_failures: usize,
    /// Scan warnings and image failures, in the order they happened.
    pub warnings: Vec<String>,
    pub log: RunLog,
}

impl RunSummary {
    /// A run succeeds when no collection failed to write.
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }

    /// Record an entry and update the counters it affects.
    pub fn record(&mut self, entry: LogEntry) {
        match &entry {
            LogEntry::Written {
                images,
                lookup_error,
                image_failures,
                ..
            } => {
                self.written += 1;
                self.images_downloaded += images.len();
                self.image_failures += image_failures.len();
                self.warnings.extend(image_failures.iter().cloned());
                if lookup_error.is_some() {
                    self.lookup_failures += 1;
                }
            }
            LogEntry::Skipped { .. } => self.skipped += 1,
            LogEntry::Failed { lookup_error, .. } => {
                self.failed += 1;
                if lookup_error.is_some() {
                    self.lookup_failures += 1;
                }
            }
            LogEntry::ScanWarning { path, message } => {
                self.warnings
                    .push(format!("{}: {}", path.display(), message));
            }
            LogEntry::Ungrouped { .. } => self.titles_ungrouped += 1,
        }
        self.log.add(entry);
    }

    /// Write the run log to a file.
    pub fn write_log(&self, path: &Path) -> std::io::Result<()> {
        use std::io::Write;

        let mut file = std::io::BufWriter::new(std::fs::File::create(path)?);

        writeln!(file, "=== Boxset Run Log ===")?;
        writeln!(
            file,
            "Date: {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
        )?;
        writeln!(file)?;
        writeln!(file, "--- Summary ---")?;
        writeln!(
            file,
            "Titles scanned: {} ({} without a collection)",
            self.titles_scanned, self.titles_ungrouped
        )?;
        writeln!(file, "Written: {}", self.written)?;
        writeln!(file, "Skipped: {}", self.skipped)?;
        writeln!(file, "Failed: {}", self.failed)?;
        writeln!(file, "Lookup failures: {}", self.lookup_failures)?;
        writeln!(
            file,
            "Images downloaded: {} ({} failed)",
            self.images_downloaded, self.image_failures
        )?;
        writeln!(file)?;
        writeln!(file, "--- Details ---")?;
        writeln!(file)?;

        for entry in self.log.entries() {
            match entry {
                LogEntry::Written {
                    collection,
                    path,
                    members,
                    filled,
                    images,
                    lookup_error,
                    image_failures,
                } => {
                    writeln!(
                        file,
                        "[OK] \"{}\" ({} titles) -> {}",
                        collection,
                        members,
                        path.display()
                    )?;
                    if !filled.is_empty() {
                        let keys: Vec<&str> = filled.iter().map(Field::key).collect();
                        writeln!(file, "     Remote fields: {}", keys.join(", "))?;
                    }
                    for image in images {
                        writeln!(file, "     Image: {}", image.display())?;
                    }
                    if let Some(e) = lookup_error {
                        writeln!(file, "     Lookup failed: {}", e)?;
                    }
                    for f in image_failures {
                        writeln!(file, "     Image failed: {}", f)?;
                    }
                }
                LogEntry::Skipped { collection, path } => {
                    writeln!(
                        file,
                        "[SKIPPED] \"{}\" ({} exists)",
                        collection,
                        path.display()
                    )?;
                }
                LogEntry::Failed {
                    collection,
                    message,
                    lookup_error,
                } => {
                    writeln!(file, "[ERROR] \"{}\": {}", collection, message)?;
                    if let Some(e) = lookup_error {
                        writeln!(file, "     Lookup failed: {}", e)?;
                    }
                }
                LogEntry::ScanWarning { path, message } => {
                    writeln!(file, "[WARNING] {}: {}", path.display(), message)?;
                }
                LogEntry::Ungrouped { path } => {
                    writeln!(file, "[UNGROUPED] {}", path.display())?;
                }
            }
        }

        file.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_updates_counters() {
        let mut summary = RunSummary::default();
        summary.record(LogEntry::Written {
            collection: "Alien".into(),
            path: "/out/Alien [Boxset]/collection.xml".into(),
            members: 2,
            filled: vec![Field::Overview],
            images: vec!["/out/Alien [Boxset]/poster.jpg".into()],
            lookup_error: Some("Request timed out".into()),
            image_failures: vec!["banner: 404".into()],
        });
        summary.record(LogEntry::Skipped {
            collection: "Dune".into(),
            path: "/out/Dune [Boxset]/collection.xml".into(),
        });
        summary.record(LogEntry::Ungrouped {
            path: "/lib/Solo.nfo".into(),
        });
        summary.record(LogEntry::ScanWarning {
            path: "/lib/bad.nfo".into(),
            message: "not XML".into(),
        });

        assert_eq!(summary.written, 1);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.titles_ungrouped, 1);
        assert_eq!(summary.lookup_failures, 1);
        assert_eq!(summary.images_downloaded, 1);
        assert_eq!(summary.image_failures, 1);
        assert_eq!(summary.warnings.len(), 2);
        assert_eq!(summary.log.entries().len(), 4);
        assert!(summary.is_success());

        summary.record(LogEntry::Failed {
            collection: "Broken".into(),
            message: "permission denied".into(),
            lookup_error: Some("Request timed out".into()),
        });
        assert!(!summary.is_success());
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.lookup_failures, 2);
    }

    #[test]
    fn write_log_lists_entries() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(RUN_LOG_FILE);
        let mut summary = RunSummary::default();
        summary.record(LogEntry::Failed {
            collection: "Broken".into(),
            message: "permission denied".into(),
            lookup_error: None,
        });

        summary.write_log(&path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("=== Boxset Run Log ==="));
        assert!(text.contains("Failed: 1"));
        assert!(text.contains("[ERROR] \"Broken\": permission denied"));
    }
}
