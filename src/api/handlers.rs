use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::{AppError, AppResult};
use crate::models::{
    MovieRecord, MovieReport, OverallSentiment, RecommendationSource, SentimentLabel,
    SentimentResult,
};
use crate::services::sentiment::analyze_sentiment;

use super::AppState;

/// Reviews shown in the report; the fetch itself never caps
const MAX_DISPLAY_REVIEWS: usize = 10;
/// Recommendations shown in the report
const MAX_DISPLAY_RECOMMENDATIONS: usize = 5;
/// Lines of a review shown before the expandable panel
const PREVIEW_LINES: usize = 4;

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct ReportQuery {
    pub title: String,
}

#[derive(Debug, Serialize)]
pub struct ReviewResponse {
    pub label: SentimentLabel,
    pub score: f32,
    /// First few lines, for the collapsed view
    pub preview: String,
    pub full_text: String,
}

#[derive(Debug, Serialize)]
pub struct MovieReportResponse {
    pub movie: MovieRecord,
    pub summary: String,
    pub mood: String,
    pub verdict: String,
    pub overall_sentiment: Option<OverallSentiment>,
    pub reviews: Vec<ReviewResponse>,
    pub recommendations: Vec<String>,
    pub recommendation_source: Option<RecommendationSource>,
}

impl From<MovieReport> for MovieReportResponse {
    fn from(report: MovieReport) -> Self {
        let reviews = report
            .reviews
            .into_iter()
            .take(MAX_DISPLAY_REVIEWS)
            .map(|review| ReviewResponse {
                label: review.sentiment.label,
                score: review.sentiment.score,
                preview: preview_lines(&review.text),
                full_text: review.text,
            })
            .collect();

        let recommendations = report
            .recommendations
            .into_iter()
            .take(MAX_DISPLAY_RECOMMENDATIONS)
            .collect();

        Self {
            movie: report.movie,
            summary: report.summary,
            mood: report.mood.to_string(),
            verdict: report.verdict.to_string(),
            overall_sentiment: report.overall_sentiment,
            reviews,
            recommendations,
            recommendation_source: report.recommendation_source,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeSentimentRequest {
    /// Manually typed text
    #[serde(default)]
    pub text: Option<String>,
    /// Base64-encoded image upload
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeSentimentResponse {
    pub label: SentimentLabel,
    pub score: f32,
    /// The text that was actually scored
    pub analyzed_text: String,
    /// True when the scored text came from the uploaded image
    pub from_image: bool,
}

fn preview_lines(text: &str) -> String {
    text.lines()
        .take(PREVIEW_LINES)
        .collect::<Vec<_>>()
        .join("\n")
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Lookup flow: title → full movie report
pub async fn movie_report(
    State(state): State<AppState>,
    Query(params): Query<ReportQuery>,
) -> AppResult<Json<MovieReportResponse>> {
    let title = params.title.trim();
    if title.is_empty() {
        return Err(AppError::InvalidInput(
            "Please enter a movie name".to_string(),
        ));
    }

    let report = state.report_builder.build(title).await?.ok_or_else(|| {
        AppError::NotFound(format!("No movie found matching '{}'", title))
    })?;

    Ok(Json(MovieReportResponse::from(report)))
}

/// Ad-hoc flow: free-form text and/or uploaded image → sentiment
pub async fn analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeSentimentRequest>,
) -> AppResult<Json<AnalyzeSentimentResponse>> {
    let extracted = match request.image.as_deref().filter(|i| !i.is_empty()) {
        Some(encoded) => {
            let bytes = STANDARD
                .decode(encoded)
                .map_err(|_| AppError::InvalidInput("Image is not valid base64".to_string()))?;
            let image = image::load_from_memory(&bytes)
                .map_err(|_| AppError::InvalidInput("Unsupported image format".to_string()))?;
            state.generative.extract_text(image).await?
        }
        None => String::new(),
    };

    // Extracted text wins over typed text; typed text is the fallback when
    // OCR yields nothing.
    let from_image = !extracted.trim().is_empty();
    let analyzed_text = if from_image {
        extracted
    } else {
        request.text.unwrap_or_default()
    };

    if analyzed_text.trim().is_empty() {
        return Err(AppError::InvalidInput(
            "Please enter text or upload an image with text".to_string(),
        ));
    }

    let SentimentResult { label, score } = analyze_sentiment(&analyzed_text);

    Ok(Json(AnalyzeSentimentResponse {
        label,
        score,
        analyzed_text,
        from_image,
    }))
}
