use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Artwork slots a collection descriptor can reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImageKind {
    Banner,
    Poster,
}

impl ImageKind {
    pub const ALL: [ImageKind; 2] = [ImageKind::Banner, ImageKind::Poster];

    /// Lowercase name, also used as the stored file stem (`poster.jpg`).
    pub fn name(&self) -> &'static str {
        match self {
            ImageKind::Banner => "banner",
            ImageKind::Poster => "poster",
        }
    }
}

impl std::fmt::Display for ImageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// An image offered by the remote provider.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageDescriptor {
    pub kind: ImageKind,
    /// Language tag (e.g. "en"); `None` for language-neutral images.
    pub locale: Option<String>,
    pub url: String,
    /// Provider's relative preference score (higher is better).
    pub score: f32,
}

/// Where a chosen image comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    LocalFile(PathBuf),
    RemoteUrl(String),
}

/// The final artwork choice for one kind of one collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedImage {
    pub kind: ImageKind,
    pub source: ImageSource,
    pub locale: Option<String>,
}

impl ResolvedImage {
    pub fn local(kind: ImageKind, path: impl Into<PathBuf>) -> Self {
        Self {
            kind,
            source: ImageSource::LocalFile(path.into()),
            locale: None,
        }
    }

    pub fn remote(descriptor: &ImageDescriptor) -> Self {
        Self {
            kind: descriptor.kind,
            source: ImageSource::RemoteUrl(descriptor.url.clone()),
            locale: descriptor.locale.clone(),
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self.source, ImageSource::RemoteUrl(_))
    }
}

/// Artwork files found next to a title's NFO.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalArtwork {
    pub banner: Option<PathBuf>,
    pub poster: Option<PathBuf>,
}

impl LocalArtwork {
    pub fn get(&self, kind: ImageKind) -> Option<&PathBuf> {
        match kind {
            ImageKind::Banner => self.banner.as_ref(),
            ImageKind::Poster => self.poster.as_ref(),
        }
    }

    pub fn set(&mut self, kind: ImageKind, path: PathBuf) {
        match kind {
            ImageKind::Banner => self.banner = Some(path),
            ImageKind::Poster => self.poster = Some(path),
        }
    }
}
