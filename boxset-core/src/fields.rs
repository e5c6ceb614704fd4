use serde::{Deserialize, Serialize};

/// The recognized metadata vocabulary.
///
/// Every mergeable piece of collection metadata is one of these fields.
/// Anything an NFO or the remote provider offers outside this list is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Overview,
    Genres,
    Studios,
    ContentRating,
    CommunityRating,
    TmdbCollectionId,
}

impl Field {
    /// All fields, in descriptor order.
    pub const ALL: [Field; 6] = [
        Field::Overview,
        Field::Genres,
        Field::Studios,
        Field::ContentRating,
        Field::CommunityRating,
        Field::TmdbCollectionId,
    ];

    /// Stable lowercase key used in logs and config.
    pub fn key(&self) -> &'static str {
        match self {
            Field::Overview => "overview",
            Field::Genres => "genres",
            Field::Studios => "studios",
            Field::ContentRating => "content_rating",
            Field::CommunityRating => "community_rating",
            Field::TmdbCollectionId => "tmdb_collection_id",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Typed values for the recognized vocabulary.
///
/// A field counts as missing when it is `None`, a blank string, a list with
/// no non-blank entries, a non-positive or non-finite rating, or a zero id.
/// Placeholders are treated exactly like absent values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetadataFields {
    pub overview: Option<String>,
    pub genres: Vec<String>,
    pub studios: Vec<String>,
    pub content_rating: Option<String>,
    pub community_rating: Option<f32>,
    pub tmdb_collection_id: Option<u64>,
}

impl MetadataFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `field` holds a usable (non-empty) value.
    pub fn is_present(&self, field: Field) -> bool {
        match field {
            Field::Overview => text_present(&self.overview),
            Field::Genres => list_present(&self.genres),
            Field::Studios => list_present(&self.studios),
            Field::ContentRating => text_present(&self.content_rating),
            Field::CommunityRating => self
                .community_rating
                .is_some_and(|r| r.is_finite() && r > 0.0),
            Field::TmdbCollectionId => self.tmdb_collection_id.is_some_and(|id| id != 0),
        }
    }

    /// Fields that are still missing.
    pub fn missing(&self) -> Vec<Field> {
        Field::ALL
            .into_iter()
            .filter(|f| !self.is_present(*f))
            .collect()
    }

    /// True when every field in the vocabulary is present.
    pub fn is_complete(&self) -> bool {
        Field::ALL.iter().all(|f| self.is_present(*f))
    }

    /// Copy every field that is missing here but present in `other`.
    ///
    /// Present values are never replaced. Returns the fields that were filled.
    pub fn fill_missing_from(&mut self, other: &MetadataFields) -> Vec<Field> {
        let mut filled = Vec::new();
        for field in Field::ALL {
            if self.is_present(field) || !other.is_present(field) {
                continue;
            }
            match field {
                Field::Overview => self.overview = other.overview.clone(),
                Field::Genres => self.genres = other.genres.clone(),
                Field::Studios => self.studios = other.studios.clone(),
                Field::ContentRating => self.content_rating = other.content_rating.clone(),
                Field::CommunityRating => self.community_rating = other.community_rating,
                Field::TmdbCollectionId => self.tmdb_collection_id = other.tmdb_collection_id,
            }
            filled.push(field);
        }
        filled
    }

    /// Fold `sources` in order, keeping the first present value of each field.
    pub fn first_present<'a, I>(sources: I) -> MetadataFields
    where
        I: IntoIterator<Item = &'a MetadataFields>,
    {
        let mut merged = MetadataFields::default();
        for source in sources {
            if merged.is_complete() {
                break;
            }
            merged.fill_missing_from(source);
        }
        merged.normalized()
    }

    /// Trim text, drop blank list entries, and clear values that count as missing.
    pub fn normalized(mut self) -> Self {
        self.overview = clean_text(self.overview.take());
        self.content_rating = clean_text(self.content_rating.take());
        self.genres = clean_list(std::mem::take(&mut self.genres));
        self.studios = clean_list(std::mem::take(&mut self.studios));
        if !self.is_present(Field::CommunityRating) {
            self.community_rating = None;
        }
        if !self.is_present(Field::TmdbCollectionId) {
            self.tmdb_collection_id = None;
        }
        self
    }
}

fn text_present(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|s| !s.trim().is_empty())
}

fn list_present(values: &[String]) -> bool {
    values.iter().any(|v| !v.trim().is_empty())
}

fn clean_text(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Trim entries and drop blanks and exact duplicates, keeping first-seen order.
fn clean_list(values: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(values.len());
    for v in values {
        let v = v.trim();
        if !v.is_empty() && !out.iter().any(|existing| existing == v) {
            out.push(v.to_string());
        }
    }
    out
}

#[cfg(test)]
#[path = "tests/fields_tests.rs"]
mod tests;
