use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{
    classify::classifier::{ContextModel, RankedLabel, Sentiment, SentimentModel},
    foundation::config::InferenceConfig,
    foundation::error::{MemeError, MemeResult},
};

/// Sentiment and zero-shot models served over a hosted inference HTTP API.
///
/// One instance implements both [`SentimentModel`] and [`ContextModel`]; clone it to hand one copy
/// to each slot of a [`crate::ContentClassifier`].
#[derive(Clone, Debug)]
pub struct HostedInference {
    client: reqwest::blocking::Client,
    base_url: String,
    sentiment_model: String,
    context_model: String,
    token: Option<String>,
}

impl HostedInference {
    /// Build the HTTP client and read the optional bearer token from `cfg.token_env`.
    pub fn connect(cfg: &InferenceConfig) -> MemeResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()
            .map_err(|e| MemeError::model_unavailable(format!("build inference client: {e}")))?;
        let token = std::env::var(&cfg.token_env)
            .ok()
            .filter(|t| !t.trim().is_empty());
        if token.is_none() {
            tracing::debug!(env = %cfg.token_env, "no inference token set, calling anonymously");
        }
        Ok(Self {
            client,
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
            sentiment_model: cfg.sentiment_model.clone(),
            context_model: cfg.context_model.clone(),
            token,
        })
    }

    fn post<B: Serialize + ?Sized>(&self, model: &str, body: &B) -> MemeResult<String> {
        let url = format!("{}/{}", self.base_url, model);
        let mut req = self.client.post(&url).json(body);
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }
        let resp = req
            .send()
            .map_err(|e| MemeError::model_unavailable(format!("call '{model}': {e}")))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(MemeError::model_unavailable(format!(
                "'{model}' answered {status}"
            )));
        }
        resp.text()
            .map_err(|e| MemeError::model_unavailable(format!("read '{model}' response: {e}")))
    }
}

impl SentimentModel for HostedInference {
    fn sentiment(&self, text: &str) -> MemeResult<Sentiment> {
        let body = self.post(&self.sentiment_model, &SentimentRequest { inputs: text })?;
        parse_sentiment_response(&body)
    }
}

impl ContextModel for HostedInference {
    fn rank(&self, text: &str, labels: &[&str]) -> MemeResult<Vec<RankedLabel>> {
        let req = ZeroShotRequest {
            inputs: text,
            parameters: ZeroShotParameters {
                candidate_labels: labels,
            },
        };
        let body = self.post(&self.context_model, &req)?;
        parse_zero_shot_response(&body)
    }
}

#[derive(Serialize)]
struct SentimentRequest<'a> {
    inputs: &'a str,
}

#[derive(Serialize)]
struct ZeroShotRequest<'a> {
    inputs: &'a str,
    parameters: ZeroShotParameters<'a>,
}

#[derive(Serialize)]
struct ZeroShotParameters<'a> {
    candidate_labels: &'a [&'a str],
}

#[derive(Deserialize)]
struct LabelScore {
    label: String,
    score: f32,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SentimentBody {
    Nested(Vec<Vec<LabelScore>>),
    Flat(Vec<LabelScore>),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ZeroShotBody {
    Columns {
        labels: Vec<String>,
        scores: Vec<f32>,
    },
    Rows(Vec<LabelScore>),
}

pub(crate) fn parse_sentiment_response(body: &str) -> MemeResult<Sentiment> {
    let parsed: SentimentBody = serde_json::from_str(body)
        .map_err(|e| MemeError::model_unavailable(format!("parse sentiment response: {e}")))?;
    let rows = match parsed {
        SentimentBody::Nested(v) => v.into_iter().next().unwrap_or_default(),
        SentimentBody::Flat(v) => v,
    };
    rows.into_iter()
        .max_by(|a, b| a.score.total_cmp(&b.score))
        .map(|best| Sentiment::from_label(&best.label))
        .ok_or_else(|| MemeError::model_unavailable("sentiment response had no labels"))
}

pub(crate) fn parse_zero_shot_response(body: &str) -> MemeResult<Vec<RankedLabel>> {
    let parsed: ZeroShotBody = serde_json::from_str(body)
        .map_err(|e| MemeError::model_unavailable(format!("parse zero-shot response: {e}")))?;
    let mut ranked: Vec<RankedLabel> = match parsed {
        ZeroShotBody::Columns { labels, scores } => {
            if labels.len() != scores.len() {
                return Err(MemeError::model_unavailable(
                    "zero-shot response labels and scores differ in length",
                ));
            }
            labels
                .into_iter()
                .zip(scores)
                .map(|(label, score)| RankedLabel { label, score })
                .collect()
        }
        ZeroShotBody::Rows(rows) => rows
            .into_iter()
            .map(|r| RankedLabel {
                label: r.label,
                score: r.score,
            })
            .collect(),
    };
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    Ok(ranked)
}

#[cfg(test)]
#[path = "../../tests/unit/classify/hosted.rs"]
mod tests;
