//! Clausewatch library crate (used by the server binary and integration tests).
//!
//! Audits a terms-of-service document against a checklist of privacy concerns. For each
//! concern the document is searched with BM25 and embeddings, the pooled candidates are
//! reranked with a cross-encoder, and the winners from every concern form one deduplicated
//! context for a single generation call. Verdicts are scored and cached by content hash.
//!
//! # Public API Surface
//!
//! ## Pipeline
//! - [`AnalysisPipeline`], [`PipelineConfig`], [`Collaborators`], [`AnalysisError`]
//! - [`Checklist`], [`Concern`], [`AnalysisResult`]
//!
//! ## Retrieval & Ranking
//! - [`Chunker`], [`Chunk`]
//! - [`LexicalRetriever`], [`SemanticRetriever`], [`EnsembleRetriever`], [`CandidatePool`]
//! - [`CandidateRanker`], [`ContextAssembler`], [`ContextSet`]
//!
//! ## Collaborators
//! - [`Embedder`] / [`SentenceEmbedder`], [`RelevanceScorer`] / [`Reranker`]
//! - [`Generator`] / [`GenaiGenerator`], [`OfflineGenerator`]
//!
//! ## Cache & Storage
//! - [`AnalysisCache`], [`ResultStore`], [`DiskResultStore`], [`MemoryResultStore`]
//! - [`ContentHash`]
//!
//! ## Test/Mock Support
//! Mock implementations are available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod analysis;
pub mod cache;
pub mod chunking;
pub mod config;
pub mod constants;
pub mod context;
pub mod embedding;
pub mod gateway;
pub mod generation;
pub mod hashing;
pub mod pipeline;
pub mod ranking;
pub mod retrieval;
pub mod storage;
pub mod text;

pub use analysis::{AnalysisResult, Checklist, ChecklistError, Concern, DEFAULT_CONCERNS};
pub use cache::{AnalysisCache, CacheTier, DEFAULT_MEMORY_CAPACITY};
pub use chunking::{Chunk, Chunker, ChunkerConfig, ChunkerError};
pub use config::{Config, ConfigError};
pub use context::{AssemblyError, ConcernContext, ContextAssembler, ContextSet};
pub use embedding::{
    Embedder, EmbeddingError, RelevanceScorer, Reranker, RerankerConfig, RerankerError,
    SentenceConfig, SentenceEmbedder,
};
pub use gateway::{AppState, create_router_with_state};
#[cfg(any(test, feature = "mock"))]
pub use generation::MockGenerator;
pub use generation::{GenaiGenerator, GenerationError, Generator, OfflineGenerator};
pub use hashing::ContentHash;
pub use pipeline::{
    AnalysisError, AnalysisPipeline, Collaborators, CollaboratorModes, PipelineConfig,
};
pub use ranking::{CandidateRanker, RankedCandidate, RankingError};
pub use retrieval::{
    CandidatePool, EnsembleRetriever, LexicalRetriever, RetrievalError, RetrievedChunk, Retriever,
    SemanticRetriever,
};
pub use storage::{CacheRecord, DiskResultStore, MemoryResultStore, ResultStore, StoreError};
