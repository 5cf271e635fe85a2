use std::fmt;

use crate::foundation::error::{MemeError, MemeResult};

/// Candidate context labels ranked for every prompt.
pub const CONTEXT_LABELS: [&str; 7] = [
    "confusion",
    "happiness",
    "sadness",
    "anger",
    "teamwork",
    "failure",
    "success",
];

/// Sentiment label produced by a [`SentimentModel`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Sentiment {
    /// Upbeat prompt.
    Positive,
    /// Downbeat prompt.
    Negative,
    /// Anything else, including unclassified prompts.
    Neutral,
}

impl Sentiment {
    /// Map a model label (`POSITIVE`, `negative`, ...) to a sentiment; unknown labels are neutral.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_uppercase().as_str() {
            "POSITIVE" | "POS" => Self::Positive,
            "NEGATIVE" | "NEG" => Self::Negative,
            _ => Self::Neutral,
        }
    }

    /// Canonical upper-case label.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Positive => "POSITIVE",
            Self::Negative => "NEGATIVE",
            Self::Neutral => "NEUTRAL",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One candidate label with its relevance score.
#[derive(Clone, Debug, PartialEq)]
pub struct RankedLabel {
    /// Candidate label text.
    pub label: String,
    /// Model score; higher is more relevant.
    pub score: f32,
}

/// Result of classifying one prompt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Classification {
    /// Prompt sentiment.
    pub sentiment: Sentiment,
    /// Best-ranked entry of [`CONTEXT_LABELS`].
    pub context_label: String,
}

/// Black-box sentiment classifier.
pub trait SentimentModel {
    /// Classify `text`; fails with [`MemeError::ModelUnavailable`] when the model cannot answer.
    fn sentiment(&self, text: &str) -> MemeResult<Sentiment>;
}

/// Black-box zero-shot classifier.
pub trait ContextModel {
    /// Score `labels` against `text`. Order of the result is not significant.
    fn rank(&self, text: &str, labels: &[&str]) -> MemeResult<Vec<RankedLabel>>;
}

/// Pairs a sentiment model with a context model.
///
/// Both models are constructed by the caller, so tests and offline runs can pass their own.
pub struct ContentClassifier {
    sentiment: Box<dyn SentimentModel>,
    context: Box<dyn ContextModel>,
}

impl fmt::Debug for ContentClassifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentClassifier").finish_non_exhaustive()
    }
}

impl ContentClassifier {
    /// Wrap the two models.
    pub fn new(sentiment: Box<dyn SentimentModel>, context: Box<dyn ContextModel>) -> Self {
        Self { sentiment, context }
    }

    /// Classify `prompt` into a sentiment and its best context label.
    #[tracing::instrument(skip(self))]
    pub fn classify(&self, prompt: &str) -> MemeResult<Classification> {
        let sentiment = self.sentiment.sentiment(prompt)?;
        let ranked = self.context.rank(prompt, &CONTEXT_LABELS)?;
        let context_label = top_label(ranked)?;
        tracing::debug!(%sentiment, %context_label, "classified prompt");
        Ok(Classification {
            sentiment,
            context_label,
        })
    }
}

fn top_label(ranked: Vec<RankedLabel>) -> MemeResult<String> {
    ranked
        .into_iter()
        .filter(|r| r.score.is_finite())
        .max_by(|a, b| a.score.total_cmp(&b.score))
        .map(|r| r.label)
        .ok_or_else(|| MemeError::model_unavailable("context model returned no ranked labels"))
}

#[cfg(test)]
#[path = "../../tests/unit/classify/classifier.rs"]
mod tests;
