use std::env;
use std::time::Duration;

use serial_test::serial;

use super::*;
use crate::generation::MockGenerator;
use crate::storage::MemoryResultStore;

const PIPELINE_VARS: [&str; 6] = [
    "CLAUSEWATCH_CHUNK_SIZE",
    "CLAUSEWATCH_CHUNK_OVERLAP",
    "CLAUSEWATCH_RETRIEVAL_TOP_K",
    "CLAUSEWATCH_RERANK_TOP_N",
    "CLAUSEWATCH_MIN_TEXT_LEN",
    "CLAUSEWATCH_GENERATION_TIMEOUT_SECS",
];

fn with_env_vars<F, R>(vars: &[(&str, &str)], f: F) -> R
where
    F: FnOnce() -> R,
{
    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    unsafe {
        for key in PIPELINE_VARS {
            env::remove_var(key);
        }
        for (key, value) in vars {
            env::set_var(key, value);
        }
    }

    let result = f();

    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    unsafe {
        for (key, _) in vars {
            env::remove_var(key);
        }
    }

    result
}

#[test]
fn test_default_pipeline_config() {
    let config = PipelineConfig::default();
    assert_eq!(config.chunk_size, 1500);
    assert_eq!(config.chunk_overlap, 200);
    assert_eq!(config.retrieval_top_k, 5);
    assert_eq!(config.rerank_top_n, 2);
    assert_eq!(config.min_text_len, 200);
    assert_eq!(config.generation_timeout, Duration::from_secs(60));
    assert!(config.validate().is_ok());
}

#[test]
#[serial]
fn test_from_env_defaults() {
    let config = with_env_vars(&[], PipelineConfig::from_env).unwrap();
    assert_eq!(config, PipelineConfig::default());
}

#[test]
#[serial]
fn test_from_env_overrides() {
    let config = with_env_vars(
        &[
            ("CLAUSEWATCH_CHUNK_SIZE", "800"),
            ("CLAUSEWATCH_CHUNK_OVERLAP", "100"),
            ("CLAUSEWATCH_RETRIEVAL_TOP_K", "8"),
            ("CLAUSEWATCH_RERANK_TOP_N", "3"),
            ("CLAUSEWATCH_MIN_TEXT_LEN", "50"),
            ("CLAUSEWATCH_GENERATION_TIMEOUT_SECS", "5"),
        ],
        PipelineConfig::from_env,
    )
    .unwrap();

    assert_eq!(config.chunker_config().chunk_size, 800);
    assert_eq!(config.chunker_config().overlap, 100);
    assert_eq!(config.retrieval_top_k, 8);
    assert_eq!(config.rerank_top_n, 3);
    assert_eq!(config.min_text_len, 50);
    assert_eq!(config.generation_timeout, Duration::from_secs(5));
}

#[test]
#[serial]
fn test_from_env_rejects_garbage() {
    let err = with_env_vars(
        &[("CLAUSEWATCH_RETRIEVAL_TOP_K", "five")],
        PipelineConfig::from_env,
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::InvalidNumber { .. }));
}

#[test]
#[serial]
fn test_from_env_rejects_overlap_not_below_size() {
    let err = with_env_vars(
        &[
            ("CLAUSEWATCH_CHUNK_SIZE", "100"),
            ("CLAUSEWATCH_CHUNK_OVERLAP", "100"),
        ],
        PipelineConfig::from_env,
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { .. }));
}

#[test]
fn test_validate_rejects_zero_counts() {
    for config in [
        PipelineConfig {
            retrieval_top_k: 0,
            ..Default::default()
        },
        PipelineConfig {
            rerank_top_n: 0,
            ..Default::default()
        },
        PipelineConfig {
            chunk_size: 0,
            ..Default::default()
        },
        PipelineConfig {
            generation_timeout: Duration::ZERO,
            ..Default::default()
        },
    ] {
        assert!(config.validate().is_err(), "{:?}", config);
    }
}

#[test]
fn test_analysis_error_is_a_single_message() {
    let err: AnalysisError = GenerationError::Timeout {
        timeout: Duration::from_secs(60),
    }
    .into();
    assert_eq!(err.to_string(), "generation failed: generation timed out after 60s");
    assert_eq!(err.reason, err.to_string());
}

#[tokio::test]
async fn test_modes_report_backends() {
    let checklist = Checklist::default();
    let collaborators = Collaborators::offline(&checklist).unwrap();
    let pipeline = AnalysisPipeline::new(
        PipelineConfig::default(),
        checklist,
        collaborators,
        AnalysisCache::new(MemoryResultStore::new()),
    )
    .unwrap();

    let modes = pipeline.modes();
    assert_eq!(modes.embedder, "stub");
    assert_eq!(modes.reranker, "stub");
    assert_eq!(modes.generator, "offline");
}

#[tokio::test]
async fn test_generation_timeout_surfaces_as_error() {
    let checklist = Checklist::default();
    let generator = MockGenerator::replying("{}").with_delay(Duration::from_secs(5));
    let collaborators = Collaborators {
        generator: Arc::new(generator.clone()),
        ..Collaborators::offline(&checklist).unwrap()
    };

    let config = PipelineConfig {
        generation_timeout: Duration::from_millis(20),
        ..Default::default()
    };
    let pipeline = AnalysisPipeline::new(
        config,
        checklist,
        collaborators,
        AnalysisCache::new(MemoryResultStore::new()),
    )
    .unwrap();

    let text = "We may sell your data. ".repeat(20);
    let err = pipeline.analyze("test", &text).await.unwrap_err();

    assert!(err.reason.contains("timed out"));
    assert_eq!(generator.calls(), 1);
    assert!(pipeline.cache().lookup(&text).await.is_none());
}
