use std::sync::{Mutex, PoisonError};
use std::thread;
use std::time::{Duration, Instant};

use serde::de::DeserializeOwned;

use crate::error::TmdbError;
use crate::types::{
    CollectionDetails, CollectionImages, CollectionSearchResult, SearchResponse, StatusResponse,
};

pub const BASE_URL: &str = "https://api.themoviedb.org/3";
pub const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/original";

/// Tunables for the TMDb client.
#[derive(Debug, Clone)]
pub struct TmdbOptions {
    /// Language for names and overviews (e.g. "en-US").
    pub language: String,
    /// Preferred image language; textless images are always included.
    pub image_locale: String,
    /// Minimum delay between API requests. Image downloads are not throttled.
    pub request_interval: Duration,
    /// Per-request timeout.
    pub timeout: Duration,
    pub base_url: String,
    pub image_base_url: String,
}

impl Default for TmdbOptions {
    fn default() -> Self {
        Self {
            language: "en-US".to_string(),
            image_locale: "en".to_string(),
            request_interval: Duration::from_secs(2),
            timeout: Duration::from_secs(30),
            base_url: BASE_URL.to_string(),
            image_base_url: IMAGE_BASE_URL.to_string(),
        }
    }
}

/// Blocking HTTP client for the TMDb v3 API with request throttling.
pub struct TmdbClient {
    http: reqwest::blocking::Client,
    api_key: String,
    options: TmdbOptions,
    last_request: Mutex<Option<Instant>>,
}

impl std::fmt::Debug for TmdbClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TmdbClient")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl TmdbClient {
    pub fn new(api_key: impl Into<String>, options: TmdbOptions) -> Result<Self, TmdbError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(TmdbError::config("TMDb API key is empty"));
        }

        let http = reqwest::blocking::Client::builder()
            .timeout(options.timeout)
            .user_agent(concat!("boxset/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            api_key,
            options,
            last_request: Mutex::new(None),
        })
    }

    pub fn options(&self) -> &TmdbOptions {
        &self.options
    }

    /// Search collections by name.
    pub fn search_collection(&self, query: &str) -> Result<Vec<CollectionSearchResult>, TmdbError> {
        let response: SearchResponse = self.get_json(
            "search/collection",
            &[
                ("query", query.to_string()),
                ("language", self.options.language.clone()),
            ],
        )?;
        log::debug!(
            "TMDb search '{}': {} result(s)",
            query,
            response.total_results
        );
        Ok(response.results)
    }

    /// Fetch a collection with its parts.
    pub fn collection_details(&self, id: u64) -> Result<CollectionDetails, TmdbError> {
        self.get_json(
            &format!("collection/{id}"),
            &[("language", self.options.language.clone())],
        )
    }

    /// Fetch the posters and backdrops of a collection.
    pub fn collection_images(&self, id: u64) -> Result<CollectionImages, TmdbError> {
        self.get_json(
            &format!("collection/{id}/images"),
            &[(
                "include_image_language",
                format!("{},null", self.options.image_locale),
            )],
        )
    }

    /// Download an image. CDN downloads don't count against the API
    /// throttle, so no delay is applied here.
    pub fn download(&self, url: &str) -> Result<Vec<u8>, TmdbError> {
        let resp = self.http.get(url).send()?;
        let status = resp.status();
        if !status.is_success() {
            return Err(TmdbError::ServerError {
                status: status.as_u16(),
                message: format!("image download failed: {url}"),
            });
        }
        Ok(resp.bytes()?.to_vec())
    }

    /// Full URL of an image path returned by the API.
    pub fn image_url(&self, file_path: &str) -> String {
        format!("{}{}", self.options.image_base_url, file_path)
    }

    fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, TmdbError> {
        self.rate_limit();

        let resp = self
            .http
            .get(format!("{}/{}", self.options.base_url, path))
            .query(&[("api_key", self.api_key.as_str())])
            .query(params)
            .send()?;

        let status = resp.status();
        let text = resp.text()?;

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(TmdbError::InvalidApiKey(status_message(&text)));
        }
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(TmdbError::not_found(path));
        }
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(TmdbError::RateLimit);
        }
        if !status.is_success() {
            return Err(TmdbError::ServerError {
                status: status.as_u16(),
                message: status_message(&text),
            });
        }

        serde_json::from_str(&text).map_err(|e| {
            log::debug!("Unparseable TMDb response for {}: {}", path, snippet(&text));
            TmdbError::Json(e)
        })
    }

    /// Wait until at least `request_interval` has passed since the last API request.
    fn rate_limit(&self) {
        let mut last = self
            .last_request
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            if elapsed < self.options.request_interval {
                thread::sleep(self.options.request_interval - elapsed);
            }
        }
        *last = Some(Instant::now());
    }
}

fn status_message(body: &str) -> String {
    serde_json::from_str::<StatusResponse>(body)
        .ok()
        .filter(|s| !s.status_message.is_empty())
        .map(|s| format!("{} (code {})", s.status_message, s.status_code))
        .unwrap_or_else(|| snippet(body))
}

fn snippet(text: &str) -> String {
    text.chars().take(200).collect()
}
