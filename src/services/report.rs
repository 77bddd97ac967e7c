//! Lookup-flow orchestration.
//!
//! Runs the fixed, sequential pipeline: metadata lookup, AI summary, mood
//! and verdict rules, review fetch with per-review sentiment, and the
//! primary-then-AI recommendation lookup. Pure aggregation into a
//! `MovieReport`; all presentation concerns live in the HTTP layer.

use std::sync::Arc;

use crate::{
    error::AppResult,
    models::{MovieReport, RecommendationSource, ScoredReview, SentimentResult},
    services::{
        analysis::{classify_mood, overall_sentiment, watch_verdict},
        providers::{GenerativeProvider, MetadataProvider, RecommendationProvider, ReviewProvider},
        sentiment::analyze_sentiment,
    },
};

pub struct ReportBuilder {
    metadata: Arc<dyn MetadataProvider>,
    reviews: Arc<dyn ReviewProvider>,
    recommendations: Arc<dyn RecommendationProvider>,
    generative: Arc<dyn GenerativeProvider>,
}

impl ReportBuilder {
    pub fn new(
        metadata: Arc<dyn MetadataProvider>,
        reviews: Arc<dyn ReviewProvider>,
        recommendations: Arc<dyn RecommendationProvider>,
        generative: Arc<dyn GenerativeProvider>,
    ) -> Self {
        Self {
            metadata,
            reviews,
            recommendations,
            generative,
        }
    }

    /// Builds the full report for a title.
    ///
    /// `Ok(None)` means the metadata lookup found nothing; the rest of the
    /// flow is skipped and no other collaborator is called.
    pub async fn build(&self, title: &str) -> AppResult<Option<MovieReport>> {
        let Some(movie) = self.metadata.lookup(title).await? else {
            return Ok(None);
        };

        let summary = self.generative.summarize(&movie.title).await?;
        let mood = classify_mood(&summary);
        let verdict = watch_verdict(movie.rating);

        let review_texts = self
            .reviews
            .fetch_reviews(&movie.imdb_id, &movie.title)
            .await?;

        let reviews: Vec<ScoredReview> = review_texts
            .into_iter()
            .map(|text| {
                let sentiment = analyze_sentiment(&text);
                ScoredReview { text, sentiment }
            })
            .collect();

        // The aggregate rule is undefined for an empty list; gate here.
        let overall = if reviews.is_empty() {
            None
        } else {
            let sentiments: Vec<SentimentResult> =
                reviews.iter().map(|r| r.sentiment).collect();
            Some(overall_sentiment(&sentiments))
        };

        let genre = movie.primary_genre().to_string();
        let (recommendations, recommendation_source) =
            self.fetch_recommendations(&genre).await?;

        tracing::info!(
            title = %movie.title,
            reviews = reviews.len(),
            recommendations = recommendations.len(),
            source = ?recommendation_source,
            "Movie report built"
        );

        Ok(Some(MovieReport {
            movie,
            summary,
            mood,
            verdict,
            reviews,
            overall_sentiment: overall,
            recommendations,
            recommendation_source,
        }))
    }

    /// Primary lookup first; the AI fallback runs exactly once, and only
    /// when the primary source comes back empty. Results are never merged.
    async fn fetch_recommendations(
        &self,
        genre: &str,
    ) -> AppResult<(Vec<String>, Option<RecommendationSource>)> {
        let primary = self.recommendations.recommend(genre).await?;
        if !primary.is_empty() {
            return Ok((primary, Some(RecommendationSource::Primary)));
        }

        let fallback = self.generative.recommend_titles(genre).await?;
        if !fallback.is_empty() {
            return Ok((fallback, Some(RecommendationSource::AiFallback)));
        }

        Ok((vec![], None))
    }
}
