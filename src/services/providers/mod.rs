/// External collaborator abstractions
///
/// Each trait covers one provider capability the lookup and ad-hoc flows
/// consume. Live implementations are fail-soft: transport and decode
/// failures are logged and normalized into the capability's empty value
/// (`None` or an empty Vec/String), so the orchestration layer never needs
/// error-recovery branches and tests never need to mock exceptions.
use image::DynamicImage;

use crate::{error::AppResult, models::MovieRecord};

pub mod omdb;
pub mod openai;
pub mod tmdb;

/// Movie metadata lookup by free-text title
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Resolves a title to a movie record.
    ///
    /// `Ok(None)` is the defined not-found signal; it halts the lookup flow.
    async fn lookup(&self, title: &str) -> AppResult<Option<MovieRecord>>;
}

/// Review corpus retrieval by movie id and title
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ReviewProvider: Send + Sync {
    /// Fetches review texts in provider order.
    ///
    /// The fetch never caps; display capping is a presentation concern.
    async fn fetch_reviews(&self, imdb_id: &str, title: &str) -> AppResult<Vec<String>>;
}

/// Service-based recommendation lookup by genre (primary source)
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait RecommendationProvider: Send + Sync {
    /// Returns candidate titles for a genre. An empty list is the defined
    /// not-found signal that triggers the AI fallback.
    async fn recommend(&self, genre: &str) -> AppResult<Vec<String>>;
}

/// Generative-text capabilities: summaries, fallback recommendations, and
/// vision-based text extraction
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait GenerativeProvider: Send + Sync {
    /// Produces a prose summary for a title. Empty string on failure, so
    /// downstream mood classification always has defined input.
    async fn summarize(&self, title: &str) -> AppResult<String>;

    /// Suggests titles for a genre. Invoked only when the primary
    /// recommendation source comes back empty.
    async fn recommend_titles(&self, genre: &str) -> AppResult<Vec<String>>;

    /// Extracts text from an image. Empty string on failure or a blank
    /// image, so the caller can fall back to manually typed text.
    async fn extract_text(&self, image: DynamicImage) -> AppResult<String>;
}
