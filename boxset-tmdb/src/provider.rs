use boxset_core::{
    CollectionProvider, CollectionQuery, ImageDescriptor, ImageKind, MetadataFields,
    ProviderError, RemoteCandidate,
};

use crate::client::TmdbClient;
use crate::error::TmdbError;
use crate::types::{CollectionDetails, CollectionImages, CollectionSearchResult, TmdbImage};

impl CollectionProvider for TmdbClient {
    fn name(&self) -> &'static str {
        "TMDb"
    }

    fn lookup(&self, query: &CollectionQuery) -> Result<Vec<RemoteCandidate>, ProviderError> {
        let details = resolve_details(self, query)?;
        let images = match self.collection_images(details.id) {
            Ok(images) => images,
            Err(e) => {
                log::warn!(
                    "Could not fetch TMDb images for '{}' ({}): {}",
                    details.name,
                    details.id,
                    e
                );
                CollectionImages::default()
            }
        };
        Ok(vec![build_candidate(&details, &images, |p| {
            self.image_url(p)
        })])
    }

    fn fetch_image(&self, url: &str) -> Result<Vec<u8>, ProviderError> {
        Ok(self.download(url)?)
    }
}

/// Resolve a query to collection details: by id when one is known, by
/// name search otherwise (or when the id no longer exists).
fn resolve_details(
    client: &TmdbClient,
    query: &CollectionQuery,
) -> Result<CollectionDetails, TmdbError> {
    if let Some(id) = query.tmdb_collection_id {
        match client.collection_details(id) {
            Ok(details) => return Ok(details),
            Err(TmdbError::NotFound(_)) => {
                log::debug!(
                    "TMDb collection id {} for '{}' not found, searching by name",
                    id,
                    query.name
                );
            }
            Err(e) => return Err(e),
        }
    }

    let results = client.search_collection(&query.name)?;
    let best = best_search_result(&results, &query.name)
        .ok_or_else(|| TmdbError::not_found(query.name.clone()))?;
    log::debug!(
        "TMDb matched '{}' to '{}' ({})",
        query.name,
        best.name,
        best.id
    );
    client.collection_details(best.id)
}

/// Pick the search result for `name`: an exact (case-insensitive) name match
/// if there is one, else TMDb's top result.
pub fn best_search_result<'a>(
    results: &'a [CollectionSearchResult],
    name: &str,
) -> Option<&'a CollectionSearchResult> {
    results
        .iter()
        .find(|r| r.matches_name(name))
        .or_else(|| results.first())
}

/// Convert TMDb collection data into a provider-neutral candidate.
///
/// Posters map to `Poster` and backdrops to `Banner`, in TMDb's order. When
/// the images endpoint returned nothing, the collection's primary poster and
/// backdrop are offered instead.
pub fn build_candidate<F>(
    details: &CollectionDetails,
    images: &CollectionImages,
    image_url: F,
) -> RemoteCandidate
where
    F: Fn(&str) -> String,
{
    let fields = MetadataFields {
        overview: details.overview.clone(),
        community_rating: details.average_rating(),
        tmdb_collection_id: Some(details.id),
        ..Default::default()
    }
    .normalized();

    let mut descriptors = Vec::new();
    if images.is_empty() {
        let primary = [
            (ImageKind::Poster, &details.poster_path),
            (ImageKind::Banner, &details.backdrop_path),
        ];
        for (kind, path) in primary {
            if let Some(path) = path.as_deref().filter(|p| !p.is_empty()) {
                descriptors.push(ImageDescriptor {
                    kind,
                    locale: None,
                    url: image_url(path),
                    score: 0.0,
                });
            }
        }
    } else {
        descriptors.extend(describe(ImageKind::Poster, &images.posters, &image_url));
        descriptors.extend(describe(ImageKind::Banner, &images.backdrops, &image_url));
    }

    RemoteCandidate {
        provider_id: details.id.to_string(),
        fields,
        images: descriptors,
    }
}

fn describe<'a, F>(
    kind: ImageKind,
    images: &'a [TmdbImage],
    image_url: &'a F,
) -> impl Iterator<Item = ImageDescriptor> + 'a
where
    F: Fn(&str) -> String,
{
    images.iter().map(move |img| ImageDescriptor {
        kind,
        locale: img.iso_639_1.clone().filter(|l| !l.is_empty()),
        url: image_url(&img.file_path),
        score: img.vote_average,
    })
}

#[cfg(test)]
#[path = "tests/provider_tests.rs"]
mod tests;
