//! Cross-cutting, shared constants.
//!
//! These are the recognized defaults for the retrieval pipeline. Runtime overrides go
//! through [`PipelineConfig`](crate::pipeline::PipelineConfig); the constants stay the
//! single source of truth for the default values.

/// Target chunk length, in characters.
pub const DEFAULT_CHUNK_SIZE: usize = 1500;

/// Characters shared between consecutive chunks.
pub const DEFAULT_CHUNK_OVERLAP: usize = 200;

/// Chunks returned by each retriever per query.
pub const DEFAULT_RETRIEVAL_TOP_K: usize = 5;

/// Reranked candidates kept per concern.
pub const DEFAULT_RERANK_TOP_N: usize = 2;

/// Documents shorter than this (in characters) are not analyzed.
pub const MIN_TEXT_LEN: usize = 200;

/// Points removed from the safety score for each flagged concern.
pub const FLAG_PENALTY: u32 = 15;

/// Score of a document with no flagged concerns.
pub const MAX_SAFETY_SCORE: u32 = 100;

/// Output dimension of the MiniLM sentence embedder.
pub const DEFAULT_EMBEDDING_DIM: usize = 384;

/// Token limit for both the embedder and the cross-encoder.
pub const DEFAULT_MAX_SEQ_LEN: usize = 512;

/// Upper bound on a single generation call.
pub const DEFAULT_GENERATION_TIMEOUT_SECS: u64 = 60;

/// Default generative model identifier (resolved by `genai`).
pub const DEFAULT_GENERATOR_MODEL: &str = "gemini-2.5-flash";

/// Separator placed between context chunks in the generation prompt.
pub const CONTEXT_DELIMITER: &str = "\n\n----- clausewatch context boundary -----\n\n";

/// Analysis key used by the degenerate short-text result.
pub const SHORT_TEXT_ERROR_KEY: &str = "Error";

/// Analysis value used by the degenerate short-text result.
pub const SHORT_TEXT_ERROR_MESSAGE: &str = "Text too short.";
