use crate::error::ProviderError;
use crate::fields::MetadataFields;
use crate::image::{ImageDescriptor, ImageKind};

/// What the pipeline asks a provider about one collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionQuery {
    pub name: String,
    /// Provider collection id already known locally, if any.
    pub tmdb_collection_id: Option<u64>,
}

impl CollectionQuery {
    pub fn by_name(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tmdb_collection_id: None,
        }
    }

    pub fn with_id(mut self, id: Option<u64>) -> Self {
        self.tmdb_collection_id = id.filter(|id| *id != 0);
        self
    }
}

/// A metadata/image match returned by a provider for a collection name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RemoteCandidate {
    pub provider_id: String,
    pub fields: MetadataFields,
    pub images: Vec<ImageDescriptor>,
}

impl RemoteCandidate {
    /// Images of one kind, in provider order.
    pub fn images_of(&self, kind: ImageKind) -> impl Iterator<Item = &ImageDescriptor> {
        self.images.iter().filter(move |img| img.kind == kind)
    }
}

/// A remote movie-database capability: look up collections and fetch images.
///
/// Calls are blocking. Implementations own their timeouts and throttling.
pub trait CollectionProvider {
    /// Human-readable provider name for logs.
    fn name(&self) -> &'static str;

    /// Look up a collection. Candidates are ordered best first.
    ///
    /// Returns `ProviderError::NotFound` when nothing matches.
    fn lookup(&self, query: &CollectionQuery) -> Result<Vec<RemoteCandidate>, ProviderError>;

    /// Download the bytes of an image returned in a candidate.
    fn fetch_image(&self, url: &str) -> Result<Vec<u8>, ProviderError>;
}

/// A secret with all but its last four characters replaced by `*`. Secrets
/// of four characters or fewer are hidden entirely.
pub fn mask_secret(secret: &str) -> String {
    let count = secret.chars().count();
    if count <= 4 {
        return "*".repeat(count);
    }
    let visible: String = secret.chars().skip(count - 4).collect();
    format!("{}{}", "*".repeat(count - 4), visible)
}
