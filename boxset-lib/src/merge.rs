//! Field merging: local values first, remote values fill the gaps.

use std::iter;

use boxset_core::{
    Collection, CollectionProvider, CollectionQuery, Field, MetadataFields, ProviderError,
    RemoteCandidate,
};

/// Result of merging one collection.
#[derive(Debug)]
pub struct MergeOutcome {
    pub fields: MetadataFields,
    /// Best remote candidate, used for artwork selection.
    pub candidate: Option<RemoteCandidate>,
    /// Fields that came from the provider.
    pub filled: Vec<Field>,
    /// Set when a provider was configured but the lookup failed.
    pub lookup_error: Option<ProviderError>,
}

impl MergeOutcome {
    fn local_only(fields: MetadataFields) -> Self {
        Self {
            fields,
            candidate: None,
            filled: Vec::new(),
            lookup_error: None,
        }
    }
}

/// Merge a collection's metadata.
///
/// The members' fields are reduced first (per field, the first member with a
/// value wins). With a provider, fields still missing are then filled from
/// the candidates in provider order. Local values are never replaced, and a
/// failed lookup leaves the local result untouched.
pub fn merge_collection(
    collection: &Collection,
    provider: Option<&dyn CollectionProvider>,
) -> MergeOutcome {
    let local = collection.local_fields();
    let Some(provider) = provider else {
        return MergeOutcome::local_only(local);
    };

    let query = CollectionQuery::by_name(&collection.name).with_id(local.tmdb_collection_id);
    let candidates = match provider.lookup(&query) {
        Ok(candidates) if candidates.is_empty() => {
            Err(ProviderError::not_found(collection.name.clone()))
        }
        other => other,
    };

    match candidates {
        Ok(candidates) => {
            let fields = merge_fields(&local, &candidates);
            let filled = Field::ALL
                .into_iter()
                .filter(|f| !local.is_present(*f) && fields.is_present(*f))
                .collect::<Vec<_>>();
            if !filled.is_empty() {
                log::debug!(
                    "'{}': filled {} from {}",
                    collection.name,
                    filled
                        .iter()
                        .map(Field::key)
                        .collect::<Vec<_>>()
                        .join(", "),
                    provider.name()
                );
            }
            MergeOutcome {
                fields,
                candidate: candidates.into_iter().next(),
                filled,
                lookup_error: None,
            }
        }
        Err(e) => {
            log::warn!(
                "{} lookup failed for '{}', using local metadata only: {}",
                provider.name(),
                collection.name,
                e
            );
            MergeOutcome {
                lookup_error: Some(e),
                ..MergeOutcome::local_only(local)
            }
        }
    }
}

/// Local fields, with each missing field taken from the first candidate
/// that has it.
pub fn merge_fields(local: &MetadataFields, candidates: &[RemoteCandidate]) -> MetadataFields {
    MetadataFields::first_present(iter::once(local).chain(candidates.iter().map(|c| &c.fields)))
}

#[cfg(test)]
#[path = "tests/merge_tests.rs"]
mod tests;
