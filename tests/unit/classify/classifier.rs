use super::*;

struct FixedSentiment(Sentiment);

impl SentimentModel for FixedSentiment {
    fn sentiment(&self, _text: &str) -> MemeResult<Sentiment> {
        Ok(self.0)
    }
}

struct Offline;

impl SentimentModel for Offline {
    fn sentiment(&self, _text: &str) -> MemeResult<Sentiment> {
        Err(MemeError::model_unavailable("offline"))
    }
}

impl ContextModel for Offline {
    fn rank(&self, _text: &str, _labels: &[&str]) -> MemeResult<Vec<RankedLabel>> {
        Err(MemeError::model_unavailable("offline"))
    }
}

struct Scores(Vec<(&'static str, f32)>);

impl ContextModel for Scores {
    fn rank(&self, _text: &str, _labels: &[&str]) -> MemeResult<Vec<RankedLabel>> {
        Ok(self
            .0
            .iter()
            .map(|(label, score)| RankedLabel {
                label: label.to_string(),
                score: *score,
            })
            .collect())
    }
}

#[test]
fn picks_highest_scoring_context() {
    let c = ContentClassifier::new(
        Box::new(FixedSentiment(Sentiment::Negative)),
        Box::new(Scores(vec![
            ("teamwork", 0.1),
            ("failure", 0.7),
            ("sadness", 0.2),
        ])),
    );
    let out = c.classify("my build broke").unwrap();
    assert_eq!(out.sentiment, Sentiment::Negative);
    assert_eq!(out.context_label, "failure");
}

#[test]
fn empty_ranking_is_model_unavailable() {
    let c = ContentClassifier::new(
        Box::new(FixedSentiment(Sentiment::Positive)),
        Box::new(Scores(vec![])),
    );
    assert!(matches!(
        c.classify("x").unwrap_err(),
        MemeError::ModelUnavailable(_)
    ));
}

#[test]
fn model_failure_propagates() {
    let c = ContentClassifier::new(Box::new(Offline), Box::new(Offline));
    assert!(matches!(
        c.classify("x").unwrap_err(),
        MemeError::ModelUnavailable(_)
    ));
}

#[test]
fn sentiment_labels_map_case_insensitively() {
    assert_eq!(Sentiment::from_label("POSITIVE"), Sentiment::Positive);
    assert_eq!(Sentiment::from_label("negative"), Sentiment::Negative);
    assert_eq!(Sentiment::from_label("LABEL_1"), Sentiment::Neutral);
    assert_eq!(Sentiment::Negative.to_string(), "NEGATIVE");
}

#[test]
fn candidate_labels_are_fixed() {
    assert_eq!(CONTEXT_LABELS.len(), 7);
    assert!(CONTEXT_LABELS.contains(&"teamwork"));
}
