use std::cell::RefCell;

use boxset_core::Title;

use super::*;

/// Replays a fixed lookup result and records the queries it saw.
struct FakeProvider {
    result: fn() -> Result<Vec<RemoteCandidate>, ProviderError>,
    queries: RefCell<Vec<CollectionQuery>>,
}

impl FakeProvider {
    fn new(result: fn() -> Result<Vec<RemoteCandidate>, ProviderError>) -> Self {
        Self {
            result,
            queries: RefCell::new(Vec::new()),
        }
    }
}

impl CollectionProvider for FakeProvider {
    fn name(&self) -> &'static str {
        "fake"
    }

    fn lookup(&self, query: &CollectionQuery) -> Result<Vec<RemoteCandidate>, ProviderError> {
        self.queries.borrow_mut().push(query.clone());
        (self.result)()
    }

    fn fetch_image(&self, url: &str) -> Result<Vec<u8>, ProviderError> {
        Err(ProviderError::not_found(url))
    }
}

fn remote() -> Result<Vec<RemoteCandidate>, ProviderError> {
    Ok(vec![
        RemoteCandidate {
            provider_id: "1".to_string(),
            fields: MetadataFields {
                overview: Some("Remote overview".to_string()),
                community_rating: Some(7.5),
                tmdb_collection_id: Some(1),
                ..Default::default()
            },
            images: Vec::new(),
        },
        RemoteCandidate {
            provider_id: "2".to_string(),
            fields: MetadataFields {
                overview: Some("Second overview".to_string()),
                genres: vec!["Horror".to_string()],
                ..Default::default()
            },
            images: Vec::new(),
        },
    ])
}

fn timeout() -> Result<Vec<RemoteCandidate>, ProviderError> {
    Err(ProviderError::Timeout)
}

fn nothing() -> Result<Vec<RemoteCandidate>, ProviderError> {
    Ok(Vec::new())
}

fn collection(members: Vec<MetadataFields>) -> Collection {
    let mut collection = Collection::new("Alien");
    for (i, fields) in members.into_iter().enumerate() {
        collection.push(Title::new(format!("/lib/{i}.nfo"), format!("Alien {i}")).with_fields(fields));
    }
    collection
}

fn overview(text: &str) -> MetadataFields {
    MetadataFields {
        overview: Some(text.to_string()),
        ..Default::default()
    }
}

#[test]
fn test_no_provider_is_local_only() {
    let c = collection(vec![overview(""), MetadataFields::default()]);
    let outcome = merge_collection(&c, None);
    assert_eq!(outcome.fields.overview, None);
    assert!(outcome.candidate.is_none());
    assert!(outcome.lookup_error.is_none());
}

#[test]
fn test_first_member_with_value_wins() {
    let c = collection(vec![overview("  "), overview("Second"), overview("Third")]);
    let outcome = merge_collection(&c, None);
    assert_eq!(outcome.fields.overview.as_deref(), Some("Second"));
}

#[test]
fn test_local_values_survive_remote() {
    let c = collection(vec![overview("Local overview")]);
    let provider = FakeProvider::new(remote);

    let outcome = merge_collection(&c, Some(&provider));

    assert_eq!(outcome.fields.overview.as_deref(), Some("Local overview"));
    assert_eq!(outcome.fields.community_rating, Some(7.5));
    assert_eq!(outcome.fields.genres, ["Horror"]);
    assert!(!outcome.filled.contains(&Field::Overview));
    assert!(outcome.filled.contains(&Field::Genres));
    assert_eq!(outcome.candidate.unwrap().provider_id, "1");
}

#[test]
fn test_remote_fills_in_candidate_order() {
    let c = collection(vec![MetadataFields::default()]);
    let provider = FakeProvider::new(remote);
    let outcome = merge_collection(&c, Some(&provider));
    assert_eq!(outcome.fields.overview.as_deref(), Some("Remote overview"));
}

#[test]
fn test_lookup_failure_falls_back_to_local() {
    let c = collection(vec![overview("Local")]);
    let provider = FakeProvider::new(timeout);

    let outcome = merge_collection(&c, Some(&provider));

    assert_eq!(outcome.fields, c.local_fields());
    assert!(matches!(outcome.lookup_error, Some(ProviderError::Timeout)));
    assert!(outcome.candidate.is_none());
}

#[test]
fn test_empty_result_counts_as_not_found() {
    let c = collection(vec![MetadataFields::default()]);
    let provider = FakeProvider::new(nothing);
    let outcome = merge_collection(&c, Some(&provider));
    assert!(matches!(outcome.lookup_error, Some(ProviderError::NotFound(_))));
}

#[test]
fn test_local_id_is_sent_as_hint() {
    let c = collection(vec![MetadataFields {
        tmdb_collection_id: Some(8091),
        ..Default::default()
    }]);
    let provider = FakeProvider::new(nothing);

    merge_collection(&c, Some(&provider));

    let queries = provider.queries.borrow();
    assert_eq!(queries.len(), 1);
    assert_eq!(queries[0].name, "Alien");
    assert_eq!(queries[0].tmdb_collection_id, Some(8091));
}
