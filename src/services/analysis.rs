//! Pure classification rules applied to provider output.
//!
//! All three functions here are total and deterministic: every input,
//! including empty strings and out-of-range ratings, maps to exactly one
//! label from the fixed vocabularies in `crate::models`.

use once_cell::sync::Lazy;
use std::collections::HashSet;

use crate::models::{Mood, OverallSentiment, SentimentLabel, SentimentResult, Verdict};

/// Rating at or above which a movie is a Must Watch
pub const MUST_WATCH_CUTOFF: f32 = 8.0;
/// Rating at or above which a movie is Worth Watching
pub const WORTH_WATCHING_CUTOFF: f32 = 6.5;
/// Rating at or above which a movie is Average; below is Skip It
pub const AVERAGE_CUTOFF: f32 = 5.0;

static UPLIFTING_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "uplifting", "inspiring", "heartwarming", "hopeful", "triumphant", "joyful",
        "feel-good", "redemption", "celebration", "warm",
    ]
    .into_iter()
    .collect()
});

static INTENSE_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "intense", "thrilling", "gripping", "suspenseful", "action", "explosive",
        "relentless", "violent", "tense", "adrenaline",
    ]
    .into_iter()
    .collect()
});

static MELANCHOLIC_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "melancholic", "tragic", "somber", "grief", "loss", "heartbreaking",
        "bittersweet", "mournful", "lonely", "sorrow",
    ]
    .into_iter()
    .collect()
});

static LIGHTHEARTED_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "funny", "hilarious", "comedy", "charming", "playful", "whimsical",
        "lighthearted", "witty", "silly", "fun",
    ]
    .into_iter()
    .collect()
});

/// Suggests the viewing mood for a summary text.
///
/// Counts lexicon hits per mood and picks the highest count. Ties and a
/// summary with no hits at all (including the empty string) resolve to
/// Thoughtful.
pub fn classify_mood(summary: &str) -> Mood {
    let lowered = summary.to_lowercase();
    let words: Vec<&str> = lowered
        .split(|c: char| !c.is_alphanumeric() && c != '-')
        .filter(|w| !w.is_empty())
        .collect();

    let count = |set: &HashSet<&'static str>| words.iter().filter(|w| set.contains(*w)).count();

    let scores = [
        (Mood::Uplifting, count(&UPLIFTING_WORDS)),
        (Mood::Intense, count(&INTENSE_WORDS)),
        (Mood::Melancholic, count(&MELANCHOLIC_WORDS)),
        (Mood::Lighthearted, count(&LIGHTHEARTED_WORDS)),
    ];

    let (best_mood, best_count) = scores
        .iter()
        .copied()
        .max_by_key(|(_, count)| *count)
        .unwrap_or((Mood::Thoughtful, 0));

    // A strict maximum is required; ties fall through to the default.
    let tied = scores
        .iter()
        .filter(|(_, count)| *count == best_count)
        .count()
        > 1;

    if best_count == 0 || tied {
        Mood::Thoughtful
    } else {
        best_mood
    }
}

/// Maps an IMDb rating to a watch verdict.
///
/// Total over all inputs: a missing rating, NaN, or a value outside the
/// legal 0-10 range maps to Unrated rather than erroring.
pub fn watch_verdict(rating: Option<f32>) -> Verdict {
    let rating = match rating {
        Some(r) if r.is_finite() && (0.0..=10.0).contains(&r) => r,
        _ => return Verdict::Unrated,
    };

    if rating >= MUST_WATCH_CUTOFF {
        Verdict::MustWatch
    } else if rating >= WORTH_WATCHING_CUTOFF {
        Verdict::WorthWatching
    } else if rating >= AVERAGE_CUTOFF {
        Verdict::Average
    } else {
        Verdict::SkipIt
    }
}

/// Combines per-review sentiments into one overall description.
///
/// Majority label wins; a tie is broken by the sign of the average score.
/// Callers must not pass an empty slice - the orchestrator gates on the
/// review list being non-empty.
pub fn overall_sentiment(results: &[SentimentResult]) -> OverallSentiment {
    debug_assert!(!results.is_empty());

    let mut positive = 0usize;
    let mut negative = 0usize;
    let mut neutral = 0usize;
    let mut score_sum = 0.0f32;

    for result in results {
        match result.label {
            SentimentLabel::Positive => positive += 1,
            SentimentLabel::Negative => negative += 1,
            SentimentLabel::Neutral => neutral += 1,
        }
        score_sum += result.score;
    }

    let average_score = score_sum / results.len() as f32;

    let label = if positive > negative && positive > neutral {
        SentimentLabel::Positive
    } else if negative > positive && negative > neutral {
        SentimentLabel::Negative
    } else if neutral > positive && neutral > negative {
        SentimentLabel::Neutral
    } else if average_score > 0.0 {
        SentimentLabel::Positive
    } else if average_score < 0.0 {
        SentimentLabel::Negative
    } else {
        SentimentLabel::Neutral
    };

    OverallSentiment {
        label,
        average_score,
        review_count: results.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verdict_must_watch_at_cutoff() {
        assert_eq!(watch_verdict(Some(8.0)), Verdict::MustWatch);
        assert_eq!(watch_verdict(Some(8.8)), Verdict::MustWatch);
        assert_eq!(watch_verdict(Some(10.0)), Verdict::MustWatch);
    }

    #[test]
    fn test_verdict_worth_watching() {
        assert_eq!(watch_verdict(Some(6.5)), Verdict::WorthWatching);
        assert_eq!(watch_verdict(Some(7.9)), Verdict::WorthWatching);
    }

    #[test]
    fn test_verdict_average() {
        assert_eq!(watch_verdict(Some(5.0)), Verdict::Average);
        assert_eq!(watch_verdict(Some(6.4)), Verdict::Average);
    }

    #[test]
    fn test_verdict_skip_it() {
        assert_eq!(watch_verdict(Some(0.0)), Verdict::SkipIt);
        assert_eq!(watch_verdict(Some(4.9)), Verdict::SkipIt);
    }

    #[test]
    fn test_verdict_total_over_bad_input() {
        assert_eq!(watch_verdict(None), Verdict::Unrated);
        assert_eq!(watch_verdict(Some(f32::NAN)), Verdict::Unrated);
        assert_eq!(watch_verdict(Some(-1.0)), Verdict::Unrated);
        assert_eq!(watch_verdict(Some(11.0)), Verdict::Unrated);
        assert_eq!(watch_verdict(Some(f32::INFINITY)), Verdict::Unrated);
    }

    #[test]
    fn test_mood_uplifting() {
        let summary = "An inspiring, heartwarming story of redemption and hope.";
        assert_eq!(classify_mood(summary), Mood::Uplifting);
    }

    #[test]
    fn test_mood_intense() {
        let summary = "A relentless, suspenseful thriller packed with explosive action.";
        assert_eq!(classify_mood(summary), Mood::Intense);
    }

    #[test]
    fn test_mood_melancholic() {
        let summary = "A somber meditation on grief and loss.";
        assert_eq!(classify_mood(summary), Mood::Melancholic);
    }

    #[test]
    fn test_mood_lighthearted() {
        let summary = "A witty, playful comedy full of charming moments.";
        assert_eq!(classify_mood(summary), Mood::Lighthearted);
    }

    #[test]
    fn test_mood_empty_summary_defaults() {
        assert_eq!(classify_mood(""), Mood::Thoughtful);
    }

    #[test]
    fn test_mood_no_hits_defaults() {
        assert_eq!(
            classify_mood("A film about a man who drives a taxi."),
            Mood::Thoughtful
        );
    }

    #[test]
    fn test_mood_tie_defaults() {
        // One uplifting hit, one intense hit
        assert_eq!(classify_mood("a hopeful but violent tale"), Mood::Thoughtful);
    }

    #[test]
    fn test_mood_determinism() {
        let summary = "An inspiring and thrilling adventure.";
        assert_eq!(classify_mood(summary), classify_mood(summary));
    }

    fn sentiment(label: SentimentLabel, score: f32) -> SentimentResult {
        SentimentResult { label, score }
    }

    #[test]
    fn test_overall_majority_positive() {
        let results = vec![
            sentiment(SentimentLabel::Positive, 0.8),
            sentiment(SentimentLabel::Positive, 0.5),
            sentiment(SentimentLabel::Negative, -0.6),
        ];
        let overall = overall_sentiment(&results);
        assert_eq!(overall.label, SentimentLabel::Positive);
        assert_eq!(overall.review_count, 3);
    }

    #[test]
    fn test_overall_majority_negative() {
        let results = vec![
            sentiment(SentimentLabel::Negative, -0.9),
            sentiment(SentimentLabel::Negative, -0.4),
            sentiment(SentimentLabel::Neutral, 0.0),
        ];
        assert_eq!(overall_sentiment(&results).label, SentimentLabel::Negative);
    }

    #[test]
    fn test_overall_tie_breaks_on_average_score() {
        let results = vec![
            sentiment(SentimentLabel::Positive, 0.9),
            sentiment(SentimentLabel::Negative, -0.3),
        ];
        let overall = overall_sentiment(&results);
        assert_eq!(overall.label, SentimentLabel::Positive);
        assert!((overall.average_score - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_overall_tie_with_zero_average_is_neutral() {
        let results = vec![
            sentiment(SentimentLabel::Positive, 0.5),
            sentiment(SentimentLabel::Negative, -0.5),
        ];
        assert_eq!(overall_sentiment(&results).label, SentimentLabel::Neutral);
    }

    #[test]
    fn test_overall_single_review() {
        let results = vec![sentiment(SentimentLabel::Neutral, 0.0)];
        let overall = overall_sentiment(&results);
        assert_eq!(overall.label, SentimentLabel::Neutral);
        assert_eq!(overall.review_count, 1);
    }
}
