use std::fs;
use std::path::{Path, PathBuf};

use boxset_core::{Collection, CollectionProvider, ImageKind, ImageSource, ResolvedImage};

use crate::collection_xml::CollectionXml;
use crate::error::WriteError;
use crate::{ArtReferences, Descriptor, DescriptorFormat, PathMapper};

/// Extension used when neither the bytes nor the URL identify the format.
const DEFAULT_IMAGE_EXTENSION: &str = "jpg";

/// A remote image saved next to a descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredImage {
    pub kind: ImageKind,
    pub url: String,
    pub path: PathBuf,
}

/// A remote image that could not be stored. The descriptor is still written
/// without it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFailure {
    pub kind: ImageKind,
    pub url: String,
    pub reason: String,
}

/// Result of writing one collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    Written {
        path: PathBuf,
        images: Vec<StoredImage>,
        image_failures: Vec<ImageFailure>,
    },
    /// The descriptor already existed and overwriting is off.
    Skipped { path: PathBuf },
}

impl WriteOutcome {
    pub fn path(&self) -> &Path {
        match self {
            Self::Written { path, .. } | Self::Skipped { path } => path,
        }
    }

    pub fn is_written(&self) -> bool {
        matches!(self, Self::Written { .. })
    }
}

/// Writes collection descriptors into an output directory.
pub struct CollectionWriter {
    format: Box<dyn DescriptorFormat>,
    output_dir: PathBuf,
    overwrite: bool,
    paths: PathMapper,
}

impl std::fmt::Debug for CollectionWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CollectionWriter")
            .field("format", &self.format.name())
            .field("output_dir", &self.output_dir)
            .field("overwrite", &self.overwrite)
            .field("paths", &self.paths)
            .finish()
    }
}

impl CollectionWriter {
    /// A `collection.xml` writer.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self::with_format(output_dir, Box::new(CollectionXml::new()))
    }

    pub fn with_format(output_dir: impl Into<PathBuf>, format: Box<dyn DescriptorFormat>) -> Self {
        Self {
            format,
            output_dir: output_dir.into(),
            overwrite: false,
            paths: PathMapper::identity(),
        }
    }

    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    pub fn path_mapper(mut self, paths: PathMapper) -> Self {
        self.paths = paths;
        self
    }

    pub fn format(&self) -> &dyn DescriptorFormat {
        self.format.as_ref()
    }

    /// Folder that holds the descriptor for `collection_name`.
    pub fn collection_dir(&self, collection_name: &str) -> PathBuf {
        self.output_dir
            .join(self.format.folder_name(collection_name))
    }

    /// Descriptor path for `collection_name`.
    pub fn target_path(&self, collection_name: &str) -> PathBuf {
        self.collection_dir(collection_name)
            .join(self.format.file_name())
    }

    /// Whether writing `collection_name` would be skipped under the
    /// overwrite policy.
    pub fn would_skip(&self, collection_name: &str) -> bool {
        !self.overwrite && self.target_path(collection_name).exists()
    }

    /// Write one collection.
    ///
    /// Remote images are fetched through `fetcher`; without one, every remote
    /// image is reported as a failure. An existing descriptor is left alone
    /// (and nothing is downloaded) unless overwriting is on.
    pub fn write(
        &self,
        collection: &Collection,
        fetcher: Option<&dyn CollectionProvider>,
    ) -> Result<WriteOutcome, WriteError> {
        if collection.members.is_empty() {
            return Err(WriteError::invalid_collection(format!(
                "collection '{}' has no members",
                collection.name
            )));
        }

        let dir = self.collection_dir(&collection.name);
        let target = dir.join(self.format.file_name());
        if !self.overwrite && target.exists() {
            log::debug!("Skipping existing {}", target.display());
            return Ok(WriteOutcome::Skipped { path: target });
        }

        fs::create_dir_all(&dir)?;

        let mut art = ArtReferences::default();
        let mut images = Vec::new();
        let mut image_failures = Vec::new();
        for kind in [ImageKind::Poster, ImageKind::Banner] {
            let Some(resolved) = collection.image(kind) else {
                continue;
            };
            match &resolved.source {
                ImageSource::LocalFile(path) => art.set(kind, self.paths.map(path)),
                ImageSource::RemoteUrl(url) => {
                    match store_remote(&dir, resolved, url, fetcher) {
                        Ok(path) => {
                            art.set(kind, path.clone());
                            images.push(StoredImage {
                                kind,
                                url: url.clone(),
                                path,
                            });
                        }
                        Err(reason) => {
                            log::warn!(
                                "Could not store {} for '{}': {}",
                                kind,
                                collection.name,
                                reason
                            );
                            image_failures.push(ImageFailure {
                                kind,
                                url: url.clone(),
                                reason,
                            });
                        }
                    }
                }
            }
        }

        let doc = Descriptor {
            collection,
            art: &art,
            item_paths: collection
                .members
                .iter()
                .map(|t| self.paths.map(t.item_path()))
                .collect(),
        };
        let bytes = self.format.render(&doc)?;
        write_atomic(&target, &bytes)?;

        Ok(WriteOutcome::Written {
            path: target,
            images,
            image_failures,
        })
    }
}

/// Download a remote image and save it as `<kind>.<ext>` in `dir`.
fn store_remote(
    dir: &Path,
    image: &ResolvedImage,
    url: &str,
    fetcher: Option<&dyn CollectionProvider>,
) -> Result<PathBuf, String> {
    let fetcher = fetcher.ok_or_else(|| "remote lookups are disabled".to_string())?;
    let bytes = fetcher.fetch_image(url).map_err(|e| e.to_string())?;
    if bytes.is_empty() {
        return Err("empty response".to_string());
    }
    let path = dir.join(format!("{}.{}", image.kind.name(), image_extension(&bytes, url)));
    fs::write(&path, &bytes).map_err(|e| format!("{}: {}", path.display(), e))?;
    Ok(path)
}

/// File extension for downloaded image bytes: sniffed from the content,
/// else taken from the URL, else `jpg`.
pub fn image_extension(bytes: &[u8], url: &str) -> String {
    if let Some(ext) = image::guess_format(bytes)
        .ok()
        .and_then(|f| f.extensions_str().first().copied())
    {
        return ext.to_string();
    }
    url_extension(url).unwrap_or_else(|| DEFAULT_IMAGE_EXTENSION.to_string())
}

fn url_extension(url: &str) -> Option<String> {
    let path = url.split(['?', '#']).next()?;
    let name = path.rsplit('/').next()?;
    let (_, ext) = name.rsplit_once('.')?;
    let ext = ext.to_ascii_lowercase();
    (!ext.is_empty() && ext.len() <= 4 && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .then_some(ext)
}

/// Write a file via a temporary sibling and rename, so a crash never leaves
/// a half-written descriptor behind.
fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), WriteError> {
    let mut tmp_name = path.file_name().unwrap_or_default().to_os_string();
    tmp_name.push(".tmp");
    let tmp = path.with_file_name(tmp_name);
    fs::write(&tmp, bytes)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

#[cfg(test)]
#[path = "tests/writer_tests.rs"]
mod tests;
