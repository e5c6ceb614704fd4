//! Media-server descriptor writers.
//!
//! A [`DescriptorFormat`] renders a merged [`Collection`] to bytes; the
//! [`CollectionWriter`] places those bytes on disk, stores any remote
//! artwork next to them, and applies the overwrite policy.

pub mod collection_xml;
pub mod error;
pub mod writer;

use std::path::{Path, PathBuf};

use boxset_core::{Collection, ImageKind};

pub use collection_xml::{CollectionXml, sanitize_name};
pub use error::WriteError;
pub use writer::{CollectionWriter, ImageFailure, StoredImage, WriteOutcome};

/// A descriptor format understood by a media server.
pub trait DescriptorFormat: Send + Sync {
    /// Human-readable name of the format.
    fn name(&self) -> &'static str;

    /// File name of the descriptor inside its collection folder.
    fn file_name(&self) -> &'static str;

    /// Folder name for a collection, relative to the output directory.
    fn folder_name(&self, collection_name: &str) -> String;

    /// Render a descriptor. Must be deterministic for identical input.
    fn render(&self, doc: &Descriptor<'_>) -> Result<Vec<u8>, WriteError>;
}

/// Everything a format needs to render one collection.
#[derive(Debug)]
pub struct Descriptor<'a> {
    pub collection: &'a Collection,
    /// Final artwork paths, as the media server should see them.
    pub art: &'a ArtReferences,
    /// Member item paths in member order, as the media server should see them.
    pub item_paths: Vec<PathBuf>,
}

/// Artwork paths referenced by a descriptor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtReferences {
    pub banner: Option<PathBuf>,
    pub poster: Option<PathBuf>,
}

impl ArtReferences {
    pub fn get(&self, kind: ImageKind) -> Option<&Path> {
        match kind {
            ImageKind::Banner => self.banner.as_deref(),
            ImageKind::Poster => self.poster.as_deref(),
        }
    }

    pub fn set(&mut self, kind: ImageKind, path: PathBuf) {
        match kind {
            ImageKind::Banner => self.banner = Some(path),
            ImageKind::Poster => self.poster = Some(path),
        }
    }
}

/// Rewrites library paths to the paths a media server sees.
///
/// When the server mounts the library somewhere else (a container, a NAS
/// share), paths under `library_root` are re-rooted at `media_root`. Paths
/// outside the library are left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathMapper {
    library_root: PathBuf,
    media_root: Option<PathBuf>,
}

impl PathMapper {
    pub fn new(library_root: impl Into<PathBuf>, media_root: Option<PathBuf>) -> Self {
        Self {
            library_root: library_root.into(),
            media_root,
        }
    }

    /// Identity mapping.
    pub fn identity() -> Self {
        Self::default()
    }

    pub fn map(&self, path: &Path) -> PathBuf {
        match &self.media_root {
            Some(media_root) => match path.strip_prefix(&self.library_root) {
                Ok(rel) => media_root.join(rel),
                Err(_) => path.to_path_buf(),
            },
            None => path.to_path_buf(),
        }
    }
}
