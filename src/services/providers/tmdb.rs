/// TMDB API provider
///
/// Covers two capabilities:
/// 1. Review fetch: /3/find/{imdb_id} resolves the IMDb id to a TMDB id,
///    then /3/movie/{id}/reviews returns the review texts.
/// 2. Primary recommendations: /3/discover/movie filtered by genre, with
///    the genre name mapped to a TMDB genre id through a fixed table.
///
/// Both capabilities are fail-soft: any transport failure, error status, or
/// unresolvable id normalizes to an empty list.
use reqwest::Client as HttpClient;
use serde::Deserialize;

use crate::{
    error::AppResult,
    services::providers::{RecommendationProvider, ReviewProvider},
};

#[derive(Clone)]
pub struct TmdbProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

#[derive(Debug, Deserialize)]
struct FindResponse {
    movie_results: Vec<TmdbMovieRef>,
}

#[derive(Debug, Deserialize)]
struct TmdbMovieRef {
    id: u64,
}

#[derive(Debug, Deserialize)]
struct ReviewsResponse {
    results: Vec<TmdbReview>,
}

#[derive(Debug, Deserialize)]
struct TmdbReview {
    content: String,
}

#[derive(Debug, Deserialize)]
struct DiscoverResponse {
    results: Vec<DiscoveredMovie>,
}

#[derive(Debug, Deserialize)]
struct DiscoveredMovie {
    title: String,
}

impl TmdbProvider {
    pub fn new(api_key: String, api_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url,
        }
    }

    /// Maps an OMDb genre name to a TMDB genre id
    ///
    /// Unknown genres return None, which surfaces as an empty
    /// recommendation list and lets the AI fallback take over.
    fn map_genre_id(&self, genre: &str) -> Option<u32> {
        match genre.trim().to_lowercase().as_str() {
            "action" => Some(28),
            "adventure" => Some(12),
            "animation" => Some(16),
            "comedy" => Some(35),
            "crime" => Some(80),
            "documentary" => Some(99),
            "drama" => Some(18),
            "family" => Some(10751),
            "fantasy" => Some(14),
            "history" => Some(36),
            "horror" => Some(27),
            "music" | "musical" => Some(10402),
            "mystery" => Some(9648),
            "romance" => Some(10749),
            "sci-fi" | "science fiction" => Some(878),
            "thriller" => Some(53),
            "war" => Some(10752),
            "western" => Some(37),
            _ => None,
        }
    }

    /// Resolves an IMDb id to a TMDB movie id
    async fn resolve_tmdb_id(&self, imdb_id: &str) -> Option<u64> {
        let url = format!("{}/3/find/{}", self.api_url, imdb_id);

        let response = match self
            .http_client
            .get(&url)
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("external_source", "imdb_id"),
            ])
            .send()
            .await
        {
            Ok(response) if response.status().is_success() => response,
            Ok(response) => {
                tracing::warn!(
                    status = %response.status(),
                    imdb_id = %imdb_id,
                    provider = "tmdb",
                    "Id resolution returned error status"
                );
                return None;
            }
            Err(e) => {
                tracing::warn!(error = %e, provider = "tmdb", "Id resolution request failed");
                return None;
            }
        };

        let found: FindResponse = match response.json().await {
            Ok(found) => found,
            Err(e) => {
                tracing::warn!(error = %e, provider = "tmdb", "Failed to parse find response");
                return None;
            }
        };

        found.movie_results.first().map(|m| m.id)
    }
}

#[async_trait::async_trait]
impl ReviewProvider for TmdbProvider {
    async fn fetch_reviews(&self, imdb_id: &str, title: &str) -> AppResult<Vec<String>> {
        let Some(tmdb_id) = self.resolve_tmdb_id(imdb_id).await else {
            tracing::info!(imdb_id = %imdb_id, title = %title, provider = "tmdb", "No TMDB match for id");
            return Ok(vec![]);
        };

        let url = format!("{}/3/movie/{}/reviews", self.api_url, tmdb_id);

        let response = match self
            .http_client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .send()
            .await
        {
            Ok(response) if response.status().is_success() => response,
            Ok(response) => {
                tracing::warn!(
                    status = %response.status(),
                    provider = "tmdb",
                    "Review fetch returned error status"
                );
                return Ok(vec![]);
            }
            Err(e) => {
                tracing::warn!(error = %e, provider = "tmdb", "Review fetch request failed");
                return Ok(vec![]);
            }
        };

        let reviews: ReviewsResponse = match response.json().await {
            Ok(reviews) => reviews,
            Err(e) => {
                tracing::warn!(error = %e, provider = "tmdb", "Failed to parse reviews response");
                return Ok(vec![]);
            }
        };

        let texts: Vec<String> = reviews.results.into_iter().map(|r| r.content).collect();

        tracing::info!(
            title = %title,
            reviews = texts.len(),
            provider = "tmdb",
            "Review fetch completed"
        );

        Ok(texts)
    }
}

#[async_trait::async_trait]
impl RecommendationProvider for TmdbProvider {
    async fn recommend(&self, genre: &str) -> AppResult<Vec<String>> {
        let Some(genre_id) = self.map_genre_id(genre) else {
            tracing::info!(genre = %genre, provider = "tmdb", "Unknown genre, no recommendations");
            return Ok(vec![]);
        };

        let url = format!("{}/3/discover/movie", self.api_url);
        let genre_param = genre_id.to_string();

        let response = match self
            .http_client
            .get(&url)
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("with_genres", genre_param.as_str()),
                ("sort_by", "vote_average.desc"),
                ("vote_count.gte", "500"),
            ])
            .send()
            .await
        {
            Ok(response) if response.status().is_success() => response,
            Ok(response) => {
                tracing::warn!(
                    status = %response.status(),
                    provider = "tmdb",
                    "Discover returned error status"
                );
                return Ok(vec![]);
            }
            Err(e) => {
                tracing::warn!(error = %e, provider = "tmdb", "Discover request failed");
                return Ok(vec![]);
            }
        };

        let discovered: DiscoverResponse = match response.json().await {
            Ok(discovered) => discovered,
            Err(e) => {
                tracing::warn!(error = %e, provider = "tmdb", "Failed to parse discover response");
                return Ok(vec![]);
            }
        };

        let titles: Vec<String> = discovered.results.into_iter().map(|m| m.title).collect();

        tracing::info!(
            genre = %genre,
            results = titles.len(),
            provider = "tmdb",
            "Recommendation lookup completed"
        );

        Ok(titles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_provider() -> TmdbProvider {
        TmdbProvider::new("test_key".to_string(), "http://test.local".to_string())
    }

    #[test]
    fn test_map_genre_id_known() {
        let provider = create_test_provider();
        assert_eq!(provider.map_genre_id("Action"), Some(28));
        assert_eq!(provider.map_genre_id("Sci-Fi"), Some(878));
        assert_eq!(provider.map_genre_id("science fiction"), Some(878));
    }

    #[test]
    fn test_map_genre_id_trims_and_lowercases() {
        let provider = create_test_provider();
        assert_eq!(provider.map_genre_id("  Drama "), Some(18));
        assert_eq!(provider.map_genre_id("COMEDY"), Some(35));
    }

    #[test]
    fn test_map_genre_id_unknown() {
        let provider = create_test_provider();
        assert_eq!(provider.map_genre_id("Mockumentary"), None);
        assert_eq!(provider.map_genre_id(""), None);
    }

    #[test]
    fn test_find_response_deserialization() {
        let json = r#"{
            "movie_results": [
                { "id": 27205, "title": "Inception" }
            ],
            "tv_results": []
        }"#;

        let found: FindResponse = serde_json::from_str(json).unwrap();
        assert_eq!(found.movie_results.len(), 1);
        assert_eq!(found.movie_results[0].id, 27205);
    }

    #[test]
    fn test_reviews_response_deserialization_preserves_order() {
        let json = r#"{
            "results": [
                { "author": "a", "content": "first review" },
                { "author": "b", "content": "second review" }
            ]
        }"#;

        let reviews: ReviewsResponse = serde_json::from_str(json).unwrap();
        let texts: Vec<String> = reviews.results.into_iter().map(|r| r.content).collect();
        assert_eq!(texts, vec!["first review", "second review"]);
    }

    #[test]
    fn test_discover_response_deserialization() {
        let json = r#"{
            "results": [
                { "id": 1, "title": "The Dark Knight" },
                { "id": 2, "title": "Mad Max: Fury Road" }
            ]
        }"#;

        let discovered: DiscoverResponse = serde_json::from_str(json).unwrap();
        assert_eq!(discovered.results.len(), 2);
        assert_eq!(discovered.results[0].title, "The Dark Knight");
    }
}
