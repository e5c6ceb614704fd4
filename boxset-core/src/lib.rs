//! Data model shared by every boxset crate: titles, collections, the typed
//! metadata vocabulary, artwork, and the remote provider seam.

pub mod collection;
pub mod error;
pub mod fields;
pub mod image;
pub mod provider;
pub mod title;

pub use collection::Collection;
pub use error::ProviderError;
pub use fields::{Field, MetadataFields};
pub use image::{ImageDescriptor, ImageKind, ImageSource, LocalArtwork, ResolvedImage};
pub use provider::{CollectionProvider, CollectionQuery, RemoteCandidate, mask_secret};
pub use title::Title;

#[cfg(test)]
#[path = "tests/collection_tests.rs"]
mod tests;
