//! Lexicon-based sentiment scoring.
//!
//! Pure and deterministic: the same text always yields the same result, and
//! no state is shared across calls, so the scorer can run per review and per
//! ad-hoc input independently.

use once_cell::sync::Lazy;
use std::collections::HashSet;

use crate::models::{SentimentLabel, SentimentResult};

/// Scores above this are labeled Positive, below its negation Negative.
const NEUTRAL_BAND: f32 = 0.1;

static POSITIVE_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "good", "great", "excellent", "amazing", "wonderful", "fantastic", "superb",
        "outstanding", "brilliant", "love", "loved", "loving", "best", "better",
        "masterpiece", "captivating", "gripping", "stunning", "beautiful", "perfect",
        "awesome", "incredible", "magnificent", "delightful", "enjoyable", "satisfying",
        "compelling", "recommend", "recommended", "impressive", "exceptional",
        "remarkable", "memorable", "rewatchable", "thrilling", "moving", "touching",
        "hilarious", "charming", "clever", "powerful", "flawless", "entertaining",
    ]
    .into_iter()
    .collect()
});

static NEGATIVE_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "bad", "terrible", "awful", "horrible", "poor", "worst", "worse", "hate",
        "hated", "dislike", "disappointing", "disappointed", "disappointment",
        "boring", "bored", "dull", "bland", "tedious", "slow", "predictable",
        "forgettable", "mess", "messy", "incoherent", "confusing", "shallow",
        "overrated", "overlong", "pointless", "waste", "wasted", "weak", "flat",
        "lifeless", "clumsy", "cliched", "unwatchable", "cringe", "mediocre",
        "pathetic", "laughable", "annoying", "frustrating",
    ]
    .into_iter()
    .collect()
});

/// Scores the sentiment of a text.
///
/// The score is (positive hits - negative hits) / total hits, which lands in
/// [-1.0, 1.0] by construction; a text with no lexicon hits scores 0.0 and
/// is Neutral.
pub fn analyze_sentiment(text: &str) -> SentimentResult {
    let lowered = text.to_lowercase();
    let words = lowered
        .split(|c: char| !c.is_alphabetic())
        .filter(|w| w.len() > 2);

    let mut positive = 0usize;
    let mut negative = 0usize;
    for word in words {
        if POSITIVE_WORDS.contains(word) {
            positive += 1;
        } else if NEGATIVE_WORDS.contains(word) {
            negative += 1;
        }
    }

    let total = positive + negative;
    let score = if total == 0 {
        0.0
    } else {
        (positive as f32 - negative as f32) / total as f32
    };

    let label = if score > NEUTRAL_BAND {
        SentimentLabel::Positive
    } else if score < -NEUTRAL_BAND {
        SentimentLabel::Negative
    } else {
        SentimentLabel::Neutral
    };

    SentimentResult { label, score }
}
