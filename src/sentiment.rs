// src/sentiment.rs

use regex::Regex;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

/// Anything that can rate the tone of a document in [-1, 1].
pub trait PolarityScorer {
    fn polarity(&self, text: &str) -> f64;
}

/// Word polarities, tuned for the vocabulary of commercial quotes.
const POLARITY_WORDS: &[(&str, f64)] = &[
    // positive
    ("affordable", 0.4),
    ("appreciate", 0.3),
    ("best", 1.0),
    ("better", 0.5),
    ("competitive", 0.3),
    ("efficient", 0.3),
    ("excellent", 1.0),
    ("excited", 0.4),
    ("fast", 0.2),
    ("flexible", 0.3),
    ("free", 0.4),
    ("glad", 0.5),
    ("good", 0.7),
    ("great", 0.8),
    ("guaranteed", 0.4),
    ("happy", 0.8),
    ("love", 0.5),
    ("outstanding", 0.5),
    ("pleased", 0.5),
    ("pleasure", 0.6),
    ("premium", 0.4),
    ("quick", 0.33),
    ("reasonable", 0.2),
    ("recommend", 0.3),
    ("reliable", 0.5),
    ("satisfied", 0.5),
    ("superior", 0.7),
    ("thank", 0.2),
    ("thanks", 0.2),
    ("trusted", 0.4),
    // negative
    ("awful", -1.0),
    ("bad", -0.7),
    ("broken", -0.4),
    ("cancel", -0.3),
    ("costly", -0.4),
    ("damaged", -0.5),
    ("defective", -0.6),
    ("delay", -0.3),
    ("delayed", -0.3),
    ("difficult", -0.5),
    ("disappointed", -0.75),
    ("expensive", -0.5),
    ("fail", -0.5),
    ("failed", -0.5),
    ("hidden", -0.17),
    ("issue", -0.2),
    ("late", -0.3),
    ("limited", -0.07),
    ("penalty", -0.4),
    ("poor", -0.4),
    ("problem", -0.3),
    ("risk", -0.2),
    ("slow", -0.3),
    ("sorry", -0.5),
    ("terrible", -1.0),
    ("unable", -0.5),
    ("unfortunately", -0.5),
    ("unreliable", -0.5),
    ("worse", -0.4),
    ("worst", -1.0),
];

/// Multipliers applied to a polarity word directly following them.
const INTENSIFIERS: &[(&str, f64)] = &[
    ("extremely", 1.5),
    ("fairly", 0.8),
    ("highly", 1.3),
    ("quite", 1.1),
    ("really", 1.2),
    ("slightly", 0.5),
    ("somewhat", 0.7),
    ("very", 1.3),
];

const NEGATIONS: &[&str] = &[
    "aren't", "can't", "cannot", "didn't", "doesn't", "don't", "isn't", "never", "no", "not",
    "wasn't", "without", "won't",
];

/// How many tokens back a negation still flips a polarity word.
const NEGATION_WINDOW: usize = 2;

static WORDS: LazyLock<HashMap<&'static str, f64>> =
    LazyLock::new(|| POLARITY_WORDS.iter().copied().collect());

static MODIFIERS: LazyLock<HashMap<&'static str, f64>> =
    LazyLock::new(|| INTENSIFIERS.iter().copied().collect());

static RE_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\d+(?:[.,]\d+)*|\p{L}+(?:['’]\p{L}+)?|[^\s\w]").unwrap()
});

/// Lowercased word, number and punctuation tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    RE_TOKEN
        .find_iter(&lower)
        .map(|m| m.as_str().replace('’', "'"))
        .collect()
}

/// Built-in word-list scorer.
///
/// Each polarity word contributes its score, scaled by a preceding intensifier
/// and flipped and halved by a nearby negation. The document polarity is the
/// mean of those contributions, 0.0 when the text has none.
#[derive(Debug, Default, Clone, Copy)]
pub struct Lexicon;

impl PolarityScorer for Lexicon {
    fn polarity(&self, text: &str) -> f64 {
        let tokens = tokenize(text);
        let mut scores = Vec::new();

        for (i, token) in tokens.iter().enumerate() {
            let Some(&base) = WORDS.get(token.as_str()) else {
                continue;
            };
            let mut score = base;

            if let Some(factor) = i
                .checked_sub(1)
                .and_then(|prev| MODIFIERS.get(tokens[prev].as_str()))
            {
                score *= factor;
            }

            let window = &tokens[i.saturating_sub(NEGATION_WINDOW)..i];
            if window.iter().any(|t| NEGATIONS.contains(&t.as_str())) {
                score *= -0.5;
            }

            scores.push(score.clamp(-1.0, 1.0));
        }

        if scores.is_empty() {
            return 0.0;
        }
        let mean = scores.iter().sum::<f64>() / scores.len() as f64;
        mean.clamp(-1.0, 1.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    pub fn from_polarity(polarity: f64) -> Self {
        if polarity > 0.0 {
            SentimentLabel::Positive
        } else if polarity < 0.0 {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SentimentLabel::Positive => "positive",
            SentimentLabel::Negative => "negative",
            SentimentLabel::Neutral => "neutral",
        })
    }
}

/// Word statistics for a single document.
#[derive(Debug, Clone, Serialize)]
pub struct TextStats {
    pub word_count: usize,
    pub top_words: Vec<(String, usize)>,
    pub polarity: f64,
    pub label: SentimentLabel,
}

impl TextStats {
    pub fn from_text(text: &str, scorer: &dyn PolarityScorer, top_n: usize) -> Self {
        let tokens = tokenize(text);

        // counts in first-occurrence order so the stable sort keeps ties that way
        let mut counts: Vec<(String, usize)> = Vec::new();
        let mut index: HashMap<&str, usize> = HashMap::new();
        for token in &tokens {
            match index.get(token.as_str()) {
                Some(&slot) => counts[slot].1 += 1,
                None => {
                    index.insert(token.as_str(), counts.len());
                    counts.push((token.clone(), 1));
                }
            }
        }
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts.truncate(top_n);

        let polarity = scorer.polarity(text).clamp(-1.0, 1.0);
        Self {
            word_count: tokens.len(),
            top_words: counts,
            polarity,
            label: SentimentLabel::from_polarity(polarity),
        }
    }
}
