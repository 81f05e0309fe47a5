use super::*;
use crate::embedding::EmbeddingError;
use std::path::PathBuf;

#[test]
fn test_config_default() {
    let config = RerankerConfig::default();

    assert!(config.model_path.is_none());
    assert_eq!(config.max_seq_len, 512);
}

#[test]
fn test_config_new() {
    let config = RerankerConfig::new("/models/ms-marco-MiniLM-L-6-v2");

    assert_eq!(
        config.model_path,
        Some(PathBuf::from("/models/ms-marco-MiniLM-L-6-v2"))
    );
}

#[test]
fn test_config_validate() {
    assert!(RerankerConfig::default().validate().is_ok());
    assert!(
        RerankerConfig::default()
            .with_max_seq_len(0)
            .validate()
            .is_err()
    );
    assert!(RerankerConfig::new("").validate().is_err());
}

#[test]
fn test_load_invalid_config() {
    let result = Reranker::load(RerankerConfig::default().with_max_seq_len(0));
    assert!(matches!(result, Err(RerankerError::InvalidConfig { .. })));
}

#[test]
fn test_load_with_missing_model() {
    let result = Reranker::load(RerankerConfig::new("/nonexistent/cross-encoder"));
    assert!(matches!(result, Err(RerankerError::ModelNotFound { .. })));
}

#[test]
fn test_stub_creation() {
    let reranker = Reranker::stub().unwrap();

    assert!(!reranker.is_model_loaded());
    assert!(RelevanceScorer::is_stub(&reranker));
}

#[test]
fn test_score_range() {
    let reranker = Reranker::stub().unwrap();
    let score = reranker
        .score(
            "Can they sell my data?",
            "We never sell personal data to anyone.",
        )
        .unwrap();

    assert!(score > 0.0 && score < 1.0);
}

#[test]
fn test_score_determinism() {
    let reranker = Reranker::stub().unwrap();
    let concern = "Is there a mandatory binding arbitration clause?";
    let chunk = "All disputes shall be resolved through binding arbitration.";

    assert_eq!(
        reranker.score(concern, chunk).unwrap(),
        reranker.score(concern, chunk).unwrap()
    );
}

#[test]
fn test_relevant_candidate_scores_higher() {
    let reranker = Reranker::stub().unwrap();
    let concern = "Is there a mandatory binding arbitration clause?";

    let relevant = reranker
        .score(
            concern,
            "Any claim is subject to mandatory binding arbitration.",
        )
        .unwrap();
    let irrelevant = reranker
        .score(concern, "Cookies help us remember your preferences.")
        .unwrap();

    assert!(relevant > irrelevant);
}

#[test]
fn test_query_of_stop_words_scores_zero() {
    let reranker = Reranker::stub().unwrap();
    assert_eq!(reranker.score("is it the", "anything").unwrap(), 0.0);
}

#[test]
fn test_error_messages_descriptive() {
    let err = RerankerError::ModelNotFound {
        path: PathBuf::from("/some/path"),
    };
    assert!(err.to_string().contains("/some/path"));

    let err: RerankerError = EmbeddingError::TokenizationFailed {
        reason: "bad vocab".to_string(),
    }
    .into();
    assert!(matches!(err, RerankerError::TokenizationFailed { .. }));
    assert!(err.to_string().contains("bad vocab"));
}
