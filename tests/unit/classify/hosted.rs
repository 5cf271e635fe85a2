use super::*;

#[test]
fn sentiment_nested_and_flat_shapes() {
    let nested = r#"[[{"label":"NEGATIVE","score":0.98},{"label":"POSITIVE","score":0.02}]]"#;
    assert_eq!(
        parse_sentiment_response(nested).unwrap(),
        Sentiment::Negative
    );

    let flat = r#"[{"label":"POSITIVE","score":0.91},{"label":"NEGATIVE","score":0.09}]"#;
    assert_eq!(parse_sentiment_response(flat).unwrap(), Sentiment::Positive);
}

#[test]
fn sentiment_empty_or_garbage_is_model_unavailable() {
    assert!(matches!(
        parse_sentiment_response("[]").unwrap_err(),
        MemeError::ModelUnavailable(_)
    ));
    assert!(matches!(
        parse_sentiment_response(r#"{"error":"Model is currently loading"}"#).unwrap_err(),
        MemeError::ModelUnavailable(_)
    ));
}

#[test]
fn zero_shot_columns_are_sorted_descending() {
    let body = r#"{
        "sequence": "my code finally compiled",
        "labels": ["failure", "success", "confusion"],
        "scores": [0.2, 0.7, 0.1]
    }"#;
    let ranked = parse_zero_shot_response(body).unwrap();
    let labels: Vec<_> = ranked.iter().map(|r| r.label.as_str()).collect();
    assert_eq!(labels, ["success", "failure", "confusion"]);
}

#[test]
fn zero_shot_rows_shape_is_accepted() {
    let body = r#"[{"label":"anger","score":0.3},{"label":"teamwork","score":0.6}]"#;
    let ranked = parse_zero_shot_response(body).unwrap();
    assert_eq!(ranked[0].label, "teamwork");
}

#[test]
fn zero_shot_mismatched_columns_fail() {
    let body = r#"{"labels":["a","b"],"scores":[0.5]}"#;
    assert!(parse_zero_shot_response(body).is_err());
}

#[test]
fn unreachable_endpoint_is_model_unavailable() {
    let cfg = InferenceConfig {
        base_url: "http://127.0.0.1:9".to_string(),
        timeout_secs: 2,
        ..InferenceConfig::default()
    };
    let hosted = HostedInference::connect(&cfg).unwrap();
    assert!(matches!(
        hosted.sentiment("cats").unwrap_err(),
        MemeError::ModelUnavailable(_)
    ));
}
