use super::*;
use crate::client::TmdbOptions;
use crate::types::SearchResponse;

const SEARCH_JSON: &str = r#"{
  "page": 1,
  "results": [
    {"adult": false, "backdrop_path": "/b1.jpg", "id": 10, "name": "Star Wars Collection",
     "original_language": "en", "original_name": "Star Wars Collection", "overview": "A long time ago", "poster_path": "/p1.jpg"},
    {"adult": false, "backdrop_path": null, "id": 726871, "name": "Dune Collection",
     "original_language": "en", "original_name": "Dune Collection", "overview": "Spice", "poster_path": null}
  ],
  "total_pages": 1,
  "total_results": 2
}"#;

const DETAILS_JSON: &str = r#"{
  "id": 726871,
  "name": "Dune Collection",
  "overview": "The saga of Paul Atreides.",
  "poster_path": "/dune-poster.jpg",
  "backdrop_path": "/dune-backdrop.jpg",
  "parts": [
    {"id": 438631, "title": "Dune", "release_date": "2021-09-15", "vote_average": 7.8, "vote_count": 12000},
    {"id": 693134, "title": "Dune: Part Two", "release_date": "2024-02-27", "vote_average": 8.2, "vote_count": 5000},
    {"id": 999999, "title": "Dune: Part Three", "release_date": "", "vote_average": 0.0, "vote_count": 0}
  ]
}"#;

const IMAGES_JSON: &str = r#"{
  "id": 726871,
  "backdrops": [
    {"aspect_ratio": 1.778, "height": 1080, "iso_639_1": null, "file_path": "/bd-neutral.jpg", "vote_average": 5.4, "vote_count": 2, "width": 1920}
  ],
  "posters": [
    {"aspect_ratio": 0.667, "height": 3000, "iso_639_1": "fr", "file_path": "/poster-fr.jpg", "vote_average": 5.6, "vote_count": 3, "width": 2000},
    {"aspect_ratio": 0.667, "height": 3000, "iso_639_1": "en", "file_path": "/poster-en.jpg", "vote_average": 5.2, "vote_count": 1, "width": 2000}
  ]
}"#;

fn url(path: &str) -> String {
    format!("https://img.test{path}")
}

#[test]
fn test_parse_search_response() {
    let response: SearchResponse = serde_json::from_str(SEARCH_JSON).unwrap();
    assert_eq!(response.total_results, 2);
    assert_eq!(response.results[1].id, 726871);
    assert_eq!(response.results[1].poster_path, None);
}

#[test]
fn test_best_search_result_prefers_exact_name() {
    let response: SearchResponse = serde_json::from_str(SEARCH_JSON).unwrap();
    let best = best_search_result(&response.results, "dune collection").unwrap();
    assert_eq!(best.id, 726871);
}

#[test]
fn test_best_search_result_falls_back_to_first() {
    let response: SearchResponse = serde_json::from_str(SEARCH_JSON).unwrap();
    let best = best_search_result(&response.results, "Dune Saga").unwrap();
    assert_eq!(best.id, 10);
    assert!(best_search_result(&[], "Dune Saga").is_none());
}

#[test]
fn test_average_rating_ignores_unrated_parts() {
    let details: CollectionDetails = serde_json::from_str(DETAILS_JSON).unwrap();
    assert_eq!(details.average_rating(), Some(8.0));
}

#[test]
fn test_build_candidate_maps_fields_and_images() {
    let details: CollectionDetails = serde_json::from_str(DETAILS_JSON).unwrap();
    let images: CollectionImages = serde_json::from_str(IMAGES_JSON).unwrap();

    let candidate = build_candidate(&details, &images, url);

    assert_eq!(candidate.provider_id, "726871");
    assert_eq!(
        candidate.fields.overview.as_deref(),
        Some("The saga of Paul Atreides.")
    );
    assert_eq!(candidate.fields.tmdb_collection_id, Some(726871));
    assert!(candidate.fields.genres.is_empty());

    let posters: Vec<_> = candidate.images_of(ImageKind::Poster).collect();
    assert_eq!(posters.len(), 2);
    assert_eq!(posters[0].locale.as_deref(), Some("fr"));
    assert_eq!(posters[1].url, "https://img.test/poster-en.jpg");

    let banners: Vec<_> = candidate.images_of(ImageKind::Banner).collect();
    assert_eq!(banners.len(), 1);
    assert_eq!(banners[0].locale, None);
}

#[test]
fn test_build_candidate_uses_primary_art_without_images() {
    let details: CollectionDetails = serde_json::from_str(DETAILS_JSON).unwrap();
    let candidate = build_candidate(&details, &CollectionImages::default(), url);

    assert_eq!(candidate.images.len(), 2);
    assert_eq!(candidate.images[0].kind, ImageKind::Poster);
    assert_eq!(candidate.images[0].url, "https://img.test/dune-poster.jpg");
    assert_eq!(candidate.images[1].kind, ImageKind::Banner);
}

#[test]
fn test_empty_overview_is_missing() {
    let details: CollectionDetails =
        serde_json::from_str(r#"{"id": 1, "name": "X", "overview": "", "parts": []}"#).unwrap();
    let candidate = build_candidate(&details, &CollectionImages::default(), url);
    assert_eq!(candidate.fields.overview, None);
    assert_eq!(candidate.fields.community_rating, None);
    assert!(candidate.images.is_empty());
}

#[test]
fn test_error_conversion() {
    let err: ProviderError = TmdbError::not_found("Dune Saga").into();
    assert!(matches!(err, ProviderError::NotFound(_)));
    let err: ProviderError = TmdbError::RateLimit.into();
    assert!(matches!(err, ProviderError::RateLimited));
    let err: ProviderError = TmdbError::InvalidApiKey("bad".into()).into();
    assert!(matches!(err, ProviderError::Unauthorized(_)));
}

#[test]
fn test_transport_error_hides_api_key() {
    let client = TmdbClient::new(
        "SECRETKEY1234",
        TmdbOptions {
            base_url: "http://127.0.0.1:1/3".to_string(),
            request_interval: std::time::Duration::ZERO,
            timeout: std::time::Duration::from_secs(5),
            ..TmdbOptions::default()
        },
    )
    .unwrap();

    let err = client.search_collection("Alien").unwrap_err();
    assert!(matches!(err, TmdbError::Http(_)));
    assert!(!err.to_string().contains("SECRETKEY1234"));

    let err = client.lookup(&CollectionQuery::by_name("Alien")).unwrap_err();
    assert!(!err.to_string().contains("SECRETKEY1234"));
}
