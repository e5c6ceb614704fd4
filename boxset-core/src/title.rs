use std::path::{Path, PathBuf};

use crate::fields::MetadataFields;
use crate::image::{ImageKind, LocalArtwork};

/// One scanned movie, built from a single NFO file.
#[derive(Debug, Clone, PartialEq)]
pub struct Title {
    /// Path of the NFO file; unique within a run.
    pub nfo_path: PathBuf,
    /// Declared movie name.
    pub name: String,
    pub year: Option<u16>,
    /// Declared collection name. `None` means the title is ungrouped.
    pub collection: Option<String>,
    pub fields: MetadataFields,
    pub artwork: LocalArtwork,
    /// Video file sharing the NFO's stem, if one was found.
    pub video_path: Option<PathBuf>,
}

impl Title {
    pub fn new(nfo_path: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Self {
            nfo_path: nfo_path.into(),
            name: name.into(),
            year: None,
            collection: None,
            fields: MetadataFields::default(),
            artwork: LocalArtwork::default(),
            video_path: None,
        }
    }

    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = Some(collection.into());
        self
    }

    pub fn with_year(mut self, year: u16) -> Self {
        self.year = Some(year);
        self
    }

    pub fn with_fields(mut self, fields: MetadataFields) -> Self {
        self.fields = fields;
        self
    }

    pub fn with_artwork(mut self, kind: ImageKind, path: impl Into<PathBuf>) -> Self {
        self.artwork.set(kind, path.into());
        self
    }

    pub fn with_video(mut self, path: impl Into<PathBuf>) -> Self {
        self.video_path = Some(path.into());
        self
    }

    /// Unique identifier of this title.
    pub fn id(&self) -> &Path {
        &self.nfo_path
    }

    /// Path listed for this title in a collection descriptor: the video
    /// file when known, the NFO otherwise.
    pub fn item_path(&self) -> &Path {
        self.video_path.as_deref().unwrap_or(&self.nfo_path)
    }

    /// The declared collection name, ignoring blank declarations.
    pub fn collection_name(&self) -> Option<&str> {
        self.collection
            .as_deref()
            .filter(|name| !name.trim().is_empty())
    }
}
