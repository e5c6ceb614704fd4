//! TMDb (The Movie Database) collection provider.

pub mod client;
pub mod credentials;
pub mod error;
pub mod provider;
pub mod types;

pub use client::{TmdbClient, TmdbOptions};
pub use credentials::{API_KEY_ENV, ApiKey, KeySource};
pub use error::TmdbError;
pub use provider::{best_search_result, build_candidate};
