//! Sentence embedder (MiniLM-style BERT, mean pooled, L2 normalized).
//!
//! Use [`SentenceConfig::stub`] for tests or when no model directory is configured. The stub
//! hashes content terms into buckets, so texts sharing vocabulary still land close together.

/// Sentence embedder configuration.
pub mod config;


pub use config::SentenceConfig;

use std::sync::Arc;

use candle_core::{DType, Device, Tensor};
use candle_transformers::models::bert::BertModel;
use half::f16;
use tokenizers::Tokenizer;
use tracing::{debug, info, warn};

use crate::embedding::Embedder;
use crate::embedding::bert::{load_encoder, mmap_weights};
use crate::embedding::device::select_device;
use crate::embedding::error::EmbeddingError;
use crate::embedding::utils::{
    check_model_dir, load_bert_config, load_tokenizer_with_truncation, weights_path,
};
use crate::text::content_terms;

enum EmbedderBackend {
    Model {
        model: Arc<BertModel>,
        tokenizer: Arc<Tokenizer>,
        device: Device,
    },
    Stub,
}

pub struct SentenceEmbedder {
    backend: EmbedderBackend,
    config: SentenceConfig,
}

impl std::fmt::Debug for SentenceEmbedder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SentenceEmbedder")
            .field(
                "backend",
                &match &self.backend {
                    EmbedderBackend::Model { device, .. } => format!("Model({:?})", device),
                    EmbedderBackend::Stub => "Stub".to_string(),
                },
            )
            .field("embedding_dim", &self.config.embedding_dim)
            .field("max_seq_len", &self.config.max_seq_len)
            .finish()
    }
}

impl SentenceEmbedder {
    pub fn load(config: SentenceConfig) -> Result<Self, EmbeddingError> {
        config.validate()?;

        let Some(model_dir) = config.model_dir.clone() else {
            warn!("No embedding model configured, sentence embedder running in STUB mode");
            return Ok(Self {
                backend: EmbedderBackend::Stub,
                config,
            });
        };

        check_model_dir(&model_dir)?;
        let device = select_device();

        let bert_config = load_bert_config(&model_dir)?;
        if bert_config.hidden_size != config.embedding_dim {
            return Err(EmbeddingError::InvalidConfig {
                reason: format!(
                    "embedding_dim ({}) does not match model hidden_size ({})",
                    config.embedding_dim, bert_config.hidden_size
                ),
            });
        }

        let vb = mmap_weights(&weights_path(&model_dir), &device)?;
        let model = load_encoder(vb, &bert_config).map_err(|e| EmbeddingError::ModelLoadFailed {
            reason: format!("Failed to load BERT encoder: {}", e),
        })?;
        let tokenizer = load_tokenizer_with_truncation(&model_dir, config.max_seq_len)?;

        info!(
            model_dir = %model_dir.display(),
            embedding_dim = config.embedding_dim,
            max_seq_len = config.max_seq_len,
            ?device,
            "Sentence embedder loaded"
        );

        Ok(Self {
            backend: EmbedderBackend::Model {
                model: Arc::new(model),
                tokenizer: Arc::new(tokenizer),
                device,
            },
            config,
        })
    }

    pub fn stub() -> Self {
        Self {
            backend: EmbedderBackend::Stub,
            config: SentenceConfig::stub(),
        }
    }

    pub fn config(&self) -> &SentenceConfig {
        &self.config
    }

    fn embed_with_model(
        &self,
        text: &str,
        model: &BertModel,
        tokenizer: &Tokenizer,
        device: &Device,
    ) -> Result<Vec<f16>, EmbeddingError> {
        let encoding =
            tokenizer
                .encode(text, true)
                .map_err(|e| EmbeddingError::TokenizationFailed {
                    reason: e.to_string(),
                })?;

        if encoding.get_ids().is_empty() {
            return Ok(vec![f16::ZERO; self.config.embedding_dim]);
        }

        let input_ids = Tensor::new(encoding.get_ids(), device)?.unsqueeze(0)?;
        let type_ids = Tensor::new(encoding.get_type_ids(), device)?.unsqueeze(0)?;
        let attention_mask = Tensor::new(encoding.get_attention_mask(), device)?.unsqueeze(0)?;

        // [1, seq_len, hidden]
        let hidden = model.forward(&input_ids, &type_ids, Some(&attention_mask))?;

        // Mean over real tokens only.
        let mask = attention_mask.to_dtype(DType::F32)?.unsqueeze(2)?;
        let summed = hidden.broadcast_mul(&mask)?.sum(1)?;
        let counts = mask.sum(1)?;
        let pooled = summed
            .broadcast_div(&counts)?
            .squeeze(0)?
            .to_vec1::<f32>()?;

        debug!(
            text_len = text.len(),
            token_count = encoding.get_ids().len(),
            "Generated embedding"
        );

        Ok(normalize_to_f16(pooled))
    }

    fn embed_stub(&self, text: &str) -> Vec<f16> {
        let dim = self.config.embedding_dim;
        let mut embedding = vec![0.0f32; dim];

        for term in content_terms(text) {
            let digest = blake3::hash(term.as_bytes());
            let bytes = digest.as_bytes();
            let bucket = u64::from_le_bytes([
                bytes[0], bytes[1], bytes[2], bytes[3], bytes[4], bytes[5], bytes[6], bytes[7],
            ]) as usize
                % dim;
            let sign = if bytes[8] & 1 == 0 { 1.0 } else { -1.0 };
            embedding[bucket] += sign;
        }

        normalize_to_f16(embedding)
    }
}

impl Embedder for SentenceEmbedder {
    fn embed(&self, text: &str) -> Result<Vec<f16>, EmbeddingError> {
        match &self.backend {
            EmbedderBackend::Model {
                model,
                tokenizer,
                device,
            } => self.embed_with_model(text, model, tokenizer, device),
            EmbedderBackend::Stub => Ok(self.embed_stub(text)),
        }
    }

    fn embedding_dim(&self) -> usize {
        self.config.embedding_dim
    }

    fn is_stub(&self) -> bool {
        matches!(self.backend, EmbedderBackend::Stub)
    }
}

fn normalize_to_f16(mut embedding: Vec<f32>) -> Vec<f16> {
    let norm: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm > 0.0 {
        for x in &mut embedding {
            *x /= norm;
        }
    }

    embedding.into_iter().map(f16::from_f32).collect()
}
