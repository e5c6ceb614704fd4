use serde::Deserialize;

/// Response from `search/collection`.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<CollectionSearchResult>,
    #[serde(default)]
    pub total_results: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CollectionSearchResult {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub original_name: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
}

impl CollectionSearchResult {
    /// Case-insensitive match against the localized or original name.
    pub fn matches_name(&self, name: &str) -> bool {
        let name = name.trim();
        self.name.trim().eq_ignore_ascii_case(name)
            || self
                .original_name
                .as_deref()
                .is_some_and(|n| n.trim().eq_ignore_ascii_case(name))
    }
}

/// Response from `collection/{id}`.
#[derive(Debug, Deserialize, Clone)]
pub struct CollectionDetails {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub parts: Vec<CollectionPart>,
}

impl CollectionDetails {
    /// Mean vote of the rated parts, rounded to one decimal.
    pub fn average_rating(&self) -> Option<f32> {
        let rated: Vec<f32> = self
            .parts
            .iter()
            .filter(|p| p.vote_count > 0 && p.vote_average > 0.0)
            .map(|p| p.vote_average)
            .collect();
        if rated.is_empty() {
            return None;
        }
        let mean = rated.iter().sum::<f32>() / rated.len() as f32;
        Some((mean * 10.0).round() / 10.0)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct CollectionPart {
    pub id: u64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_average: f32,
    #[serde(default)]
    pub vote_count: u32,
}

/// Response from `collection/{id}/images`.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct CollectionImages {
    #[serde(default)]
    pub backdrops: Vec<TmdbImage>,
    #[serde(default)]
    pub posters: Vec<TmdbImage>,
}

impl CollectionImages {
    pub fn is_empty(&self) -> bool {
        self.backdrops.is_empty() && self.posters.is_empty()
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct TmdbImage {
    pub file_path: String,
    /// Language of any text in the image; `null` for textless art.
    #[serde(default)]
    pub iso_639_1: Option<String>,
    #[serde(default)]
    pub vote_average: f32,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
}

/// Error body TMDb sends with non-2xx responses.
#[derive(Debug, Deserialize)]
pub struct StatusResponse {
    #[serde(default)]
    pub status_code: u32,
    #[serde(default)]
    pub status_message: String,
}
