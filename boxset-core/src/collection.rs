use std::path::{Path, PathBuf};

use crate::fields::MetadataFields;
use crate::image::{ImageKind, ResolvedImage};
use crate::title::Title;

/// A named group of titles sharing a declared collection name.
///
/// Created by grouping; `fields`, `banner` and `poster` are filled in place
/// by merging and artwork selection before the collection is written.
#[derive(Debug, Clone, PartialEq)]
pub struct Collection {
    pub name: String,
    /// Members in discovery order.
    pub members: Vec<Title>,
    /// Merged metadata. Empty until merging runs.
    pub fields: MetadataFields,
    pub banner: Option<ResolvedImage>,
    pub poster: Option<ResolvedImage>,
}

impl Collection {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            members: Vec::new(),
            fields: MetadataFields::default(),
            banner: None,
            poster: None,
        }
    }

    pub fn push(&mut self, title: Title) {
        self.members.push(title);
    }

    pub fn member_ids(&self) -> Vec<&Path> {
        self.members.iter().map(Title::id).collect()
    }

    /// Union of the members' local fields: per field, the first member
    /// with a non-empty value wins.
    pub fn local_fields(&self) -> MetadataFields {
        MetadataFields::first_present(self.members.iter().map(|t| &t.fields))
    }

    /// First member artwork of the given kind, in member order.
    pub fn local_artwork(&self, kind: ImageKind) -> Option<&PathBuf> {
        self.members.iter().find_map(|t| t.artwork.get(kind))
    }

    pub fn image(&self, kind: ImageKind) -> Option<&ResolvedImage> {
        match kind {
            ImageKind::Banner => self.banner.as_ref(),
            ImageKind::Poster => self.poster.as_ref(),
        }
    }

    pub fn set_image(&mut self, kind: ImageKind, image: Option<ResolvedImage>) {
        match kind {
            ImageKind::Banner => self.banner = image,
            ImageKind::Poster => self.poster = image,
        }
    }
}
