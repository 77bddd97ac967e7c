use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// A movie as returned by the metadata provider
///
/// Immutable once fetched: the orchestration never re-fetches or mutates a
/// record within the same interaction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieRecord {
    pub imdb_id: String,
    pub title: String,
    pub genre: String,
    /// IMDb rating on a 0-10 scale; None when the provider reports "N/A"
    pub rating: Option<f32>,
}

impl MovieRecord {
    /// First genre segment of a comma-separated genre string (e.g.
    /// "Action, Sci-Fi" → "Action"). Used for recommendation lookups.
    pub fn primary_genre(&self) -> &str {
        self.genre
            .split(',')
            .next()
            .map(str::trim)
            .unwrap_or(self.genre.as_str())
    }
}

/// Categorical sentiment of a piece of text
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SentimentLabel::Positive => write!(f, "Positive"),
            SentimentLabel::Negative => write!(f, "Negative"),
            SentimentLabel::Neutral => write!(f, "Neutral"),
        }
    }
}

/// Sentiment of a single text: label plus a score in [-1.0, 1.0]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SentimentResult {
    pub label: SentimentLabel,
    pub score: f32,
}

/// Combined sentiment over a non-empty list of reviews
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct OverallSentiment {
    pub label: SentimentLabel,
    pub average_score: f32,
    pub review_count: usize,
}

/// Viewing mood suggested by the AI summary
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Uplifting,
    Intense,
    Melancholic,
    Lighthearted,
    Thoughtful,
}

impl Display for Mood {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mood::Uplifting => write!(f, "Uplifting"),
            Mood::Intense => write!(f, "Intense"),
            Mood::Melancholic => write!(f, "Melancholic"),
            Mood::Lighthearted => write!(f, "Lighthearted"),
            Mood::Thoughtful => write!(f, "Thoughtful"),
        }
    }
}

/// Watch verdict derived from the IMDb rating
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    MustWatch,
    WorthWatching,
    Average,
    SkipIt,
    Unrated,
}

impl Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::MustWatch => write!(f, "Must Watch"),
            Verdict::WorthWatching => write!(f, "Worth Watching"),
            Verdict::Average => write!(f, "Average"),
            Verdict::SkipIt => write!(f, "Skip It"),
            Verdict::Unrated => write!(f, "Unrated"),
        }
    }
}

/// Which source produced the recommendation list
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationSource {
    Primary,
    AiFallback,
}

/// A review text together with its sentiment
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ScoredReview {
    pub text: String,
    pub sentiment: SentimentResult,
}

/// Everything the lookup flow aggregates for one movie
///
/// Built by the orchestrator, mapped to a response DTO by the HTTP layer,
/// discarded at the end of the request.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MovieReport {
    pub movie: MovieRecord,
    pub summary: String,
    pub mood: Mood,
    pub verdict: Verdict,
    pub reviews: Vec<ScoredReview>,
    /// None when no reviews were found (the aggregate rule is gated)
    pub overall_sentiment: Option<OverallSentiment>,
    pub recommendations: Vec<String>,
    /// None when both recommendation sources came back empty
    pub recommendation_source: Option<RecommendationSource>,
}

// ============================================================================
// OMDb API Types
// ============================================================================

/// Raw OMDb title lookup response
#[derive(Debug, Clone, Deserialize)]
pub struct OmdbMovie {
    #[serde(rename = "Response")]
    pub response: String,
    #[serde(rename = "imdbID", default)]
    pub imdb_id: Option<String>,
    #[serde(rename = "Title", default)]
    pub title: Option<String>,
    #[serde(rename = "Genre", default)]
    pub genre: Option<String>,
    #[serde(rename = "imdbRating", default)]
    pub imdb_rating: Option<String>,
}

impl OmdbMovie {
    /// True when OMDb reports a match (`Response: "True"`)
    pub fn is_found(&self) -> bool {
        self.response.eq_ignore_ascii_case("true")
    }
}

impl From<OmdbMovie> for MovieRecord {
    fn from(raw: OmdbMovie) -> Self {
        // OMDb reports missing ratings as the literal string "N/A"
        let rating = raw
            .imdb_rating
            .as_deref()
            .and_then(|r| r.parse::<f32>().ok());

        MovieRecord {
            imdb_id: raw.imdb_id.unwrap_or_default(),
            title: raw.title.unwrap_or_default(),
            genre: raw.genre.unwrap_or_default(),
            rating,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_genre_multi() {
        let movie = MovieRecord {
            imdb_id: "tt1375666".to_string(),
            title: "Inception".to_string(),
            genre: "Action, Adventure, Sci-Fi".to_string(),
            rating: Some(8.8),
        };
        assert_eq!(movie.primary_genre(), "Action");
    }

    #[test]
    fn test_primary_genre_single() {
        let movie = MovieRecord {
            imdb_id: "tt0111161".to_string(),
            title: "The Shawshank Redemption".to_string(),
            genre: "Drama".to_string(),
            rating: Some(9.3),
        };
        assert_eq!(movie.primary_genre(), "Drama");
    }

    #[test]
    fn test_omdb_movie_deserialization_found() {
        let json = r#"{
            "Title": "Inception",
            "Genre": "Action, Adventure, Sci-Fi",
            "imdbRating": "8.8",
            "imdbID": "tt1375666",
            "Response": "True"
        }"#;

        let raw: OmdbMovie = serde_json::from_str(json).unwrap();
        assert!(raw.is_found());

        let movie: MovieRecord = raw.into();
        assert_eq!(movie.imdb_id, "tt1375666");
        assert_eq!(movie.title, "Inception");
        assert_eq!(movie.genre, "Action, Adventure, Sci-Fi");
        assert_eq!(movie.rating, Some(8.8));
    }

    #[test]
    fn test_omdb_movie_deserialization_not_found() {
        let json = r#"{
            "Response": "False",
            "Error": "Movie not found!"
        }"#;

        let raw: OmdbMovie = serde_json::from_str(json).unwrap();
        assert!(!raw.is_found());
    }

    #[test]
    fn test_omdb_rating_na_maps_to_none() {
        let json = r#"{
            "Title": "Obscure Short",
            "Genre": "Documentary",
            "imdbRating": "N/A",
            "imdbID": "tt9999999",
            "Response": "True"
        }"#;

        let raw: OmdbMovie = serde_json::from_str(json).unwrap();
        let movie: MovieRecord = raw.into();
        assert_eq!(movie.rating, None);
    }

    #[test]
    fn test_sentiment_label_serde() {
        let label = SentimentLabel::Positive;
        let json = serde_json::to_string(&label).unwrap();
        assert_eq!(json, r#""positive""#);

        let deserialized: SentimentLabel = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, label);
    }

    #[test]
    fn test_verdict_display() {
        assert_eq!(format!("{}", Verdict::MustWatch), "Must Watch");
        assert_eq!(format!("{}", Verdict::SkipIt), "Skip It");
    }
}
