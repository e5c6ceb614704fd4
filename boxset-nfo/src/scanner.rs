//! Library walker: finds movie NFOs and turns them into `Title` records.
//!
//! Directory entries are visited in sorted order so two scans of the same
//! tree produce titles in the same order.

use std::path::{Path, PathBuf};

use boxset_core::{ImageKind, LocalArtwork, Title};

use crate::error::NfoError;
use crate::nfo::{MovieNfo, parse_nfo_file};

/// Video extensions recognized next to an NFO (compared case-insensitively).
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mkv", "avi", "mov", "flv", "wmv", "m4v", "ts"];

/// Image extensions recognized for local artwork.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];

/// Kodi's name for a folder-per-movie NFO.
const FOLDER_NFO_STEM: &str = "movie";

const MAX_DEPTH: usize = 32;

/// Options for a library scan.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Skip NFOs that have no matching video file.
    pub require_video: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            require_video: true,
        }
    }
}

impl ScanOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn require_video(mut self, require: bool) -> Self {
        self.require_video = require;
        self
    }
}

/// A non-fatal problem found while scanning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanWarning {
    pub path: PathBuf,
    pub message: String,
}

impl std::fmt::Display for ScanWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.message)
    }
}

/// Result of scanning a library.
#[derive(Debug, Default)]
pub struct ScanReport {
    pub titles: Vec<Title>,
    pub warnings: Vec<ScanWarning>,
    /// Number of `.nfo` files encountered, parsed or not.
    pub nfo_files: usize,
}

impl ScanReport {
    fn warn(&mut self, path: &Path, message: impl Into<String>) {
        let warning = ScanWarning {
            path: path.to_path_buf(),
            message: message.into(),
        };
        log::warn!("Skipping {}", warning);
        self.warnings.push(warning);
    }
}

/// Walk `root` recursively and build a `Title` for every movie NFO.
///
/// Only an unreadable `root` is an error; unreadable subdirectories and
/// malformed NFOs become warnings in the report.
pub fn scan_library(root: &Path, options: &ScanOptions) -> Result<ScanReport, NfoError> {
    let mut report = ScanReport::default();
    let entries = sorted_entries(root)?;
    scan_dir(root, entries, 0, options, &mut report);
    log::debug!(
        "Scanned {}: {} NFO files, {} titles, {} warnings",
        root.display(),
        report.nfo_files,
        report.titles.len(),
        report.warnings.len()
    );
    Ok(report)
}

fn scan_dir(
    dir: &Path,
    entries: Vec<PathBuf>,
    depth: usize,
    options: &ScanOptions,
    report: &mut ScanReport,
) {
    let (dirs, files): (Vec<PathBuf>, Vec<PathBuf>) =
        entries.into_iter().partition(|p| p.is_dir());

    for nfo in files.iter().filter(|p| has_extension(p, &["nfo"])) {
        report.nfo_files += 1;
        if let Some(title) = scan_nfo(nfo, &files, options, report) {
            report.titles.push(title);
        }
    }

    if depth >= MAX_DEPTH {
        report.warn(dir, "maximum directory depth reached");
        return;
    }

    for sub in dirs {
        match sorted_entries(&sub) {
            Ok(entries) => scan_dir(&sub, entries, depth + 1, options, report),
            Err(e) => report.warn(&sub, format!("cannot read directory: {e}")),
        }
    }
}

fn scan_nfo(
    nfo_path: &Path,
    siblings: &[PathBuf],
    options: &ScanOptions,
    report: &mut ScanReport,
) -> Option<Title> {
    let nfo = match parse_nfo_file(nfo_path) {
        Ok(nfo) => nfo,
        Err(e) => {
            report.warn(nfo_path, e.to_string());
            return None;
        }
    };

    let stem = file_stem(nfo_path);
    let video = find_video(&stem, siblings);
    if video.is_none() && options.require_video {
        report.warn(nfo_path, "no matching video file found");
        return None;
    }

    Some(build_title(nfo_path, &stem, nfo, video, find_artwork(&stem, siblings)))
}

fn build_title(
    nfo_path: &Path,
    stem: &str,
    nfo: MovieNfo,
    video: Option<PathBuf>,
    artwork: LocalArtwork,
) -> Title {
    let fields = nfo.fields();
    let name = nfo.title.clone().unwrap_or_else(|| stem.to_string());
    Title {
        nfo_path: nfo_path.to_path_buf(),
        name,
        year: nfo.year,
        collection: nfo.set_name,
        fields,
        artwork,
        video_path: video,
    }
}

/// Find the video for an NFO: same stem first, then for `movie.nfo` the
/// first video in the folder.
fn find_video(stem: &str, siblings: &[PathBuf]) -> Option<PathBuf> {
    let videos = || {
        siblings
            .iter()
            .filter(|p| has_extension(p, VIDEO_EXTENSIONS))
    };

    videos()
        .find(|p| file_stem(p) == stem)
        .or_else(|| {
            if stem.eq_ignore_ascii_case(FOLDER_NFO_STEM) {
                videos().next()
            } else {
                None
            }
        })
        .cloned()
}

/// Artwork next to an NFO: `<stem>-poster.jpg`, `poster.jpg`, `folder.jpg`
/// for posters and `<stem>-banner.jpg`, `banner.jpg` for banners. Names are
/// matched case-insensitively.
fn find_artwork(stem: &str, siblings: &[PathBuf]) -> LocalArtwork {
    let stem = stem.to_lowercase();
    let mut artwork = LocalArtwork::default();

    for kind in ImageKind::ALL {
        let mut names = vec![format!("{stem}-{}", kind.name()), kind.name().to_string()];
        if kind == ImageKind::Poster {
            names.push("folder".to_string());
        }

        let found = names.iter().find_map(|name| {
            siblings.iter().find(|p| {
                has_extension(p, IMAGE_EXTENSIONS) && file_stem(p).to_lowercase() == *name
            })
        });
        if let Some(path) = found {
            artwork.set(kind, path.clone());
        }
    }

    artwork
}

fn sorted_entries(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)?
        .flatten()
        .map(|e| e.path())
        .filter(|p| !is_hidden(p))
        .collect();
    entries.sort();
    Ok(entries)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with('.'))
}

fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| extensions.iter().any(|x| e.eq_ignore_ascii_case(x)))
        .unwrap_or(false)
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}
