/// OMDb API provider
///
/// Resolves a free-text movie title to a metadata record (IMDb id, genre,
/// rating) via OMDb's `?t=` lookup. OMDb signals a miss in-band with
/// `Response: "False"` rather than an HTTP error, and this provider extends
/// that contract to transport failures: anything that prevents a record
/// from being produced normalizes to `Ok(None)`.
use reqwest::Client as HttpClient;

use crate::{
    error::AppResult,
    models::{MovieRecord, OmdbMovie},
    services::providers::MetadataProvider,
};

#[derive(Clone)]
pub struct OmdbProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

impl OmdbProvider {
    pub fn new(api_key: String, api_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url,
        }
    }
}

#[async_trait::async_trait]
impl MetadataProvider for OmdbProvider {
    async fn lookup(&self, title: &str) -> AppResult<Option<MovieRecord>> {
        if title.trim().is_empty() {
            return Ok(None);
        }

        let url = format!("{}/", self.api_url);

        let response = match self
            .http_client
            .get(&url)
            .query(&[("apikey", self.api_key.as_str()), ("t", title)])
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(error = %e, provider = "omdb", "Metadata request failed");
                return Ok(None);
            }
        };

        if !response.status().is_success() {
            let status = response.status();
            tracing::warn!(%status, provider = "omdb", "Metadata lookup returned error status");
            return Ok(None);
        }

        let raw: OmdbMovie = match response.json().await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(error = %e, provider = "omdb", "Failed to parse OMDb response");
                return Ok(None);
            }
        };

        if !raw.is_found() {
            tracing::info!(query = %title, provider = "omdb", "Movie not found");
            return Ok(None);
        }

        let movie = MovieRecord::from(raw);

        tracing::info!(
            query = %title,
            imdb_id = %movie.imdb_id,
            rating = ?movie.rating,
            provider = "omdb",
            "Metadata lookup completed"
        );

        Ok(Some(movie))
    }
}
