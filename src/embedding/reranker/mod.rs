pub mod config;
pub mod error;

#[cfg(test)]
mod tests;

pub use config::RerankerConfig;
pub use error::RerankerError;

use std::collections::HashSet;

use candle_core::Tensor;
use tokenizers::Tokenizer;
use tracing::{debug, info, warn};

use crate::embedding::RelevanceScorer;
use crate::embedding::bert::CrossEncoderModel;
use crate::embedding::device::select_device;
use crate::embedding::utils::{
    check_model_dir, load_bert_config, load_tokenizer_with_truncation, weights_path,
};
use crate::text::content_terms;

/// Cross-encoder relevance scorer.
pub struct Reranker {
    device: candle_core::Device,
    config: RerankerConfig,
    model: Option<CrossEncoderModel>,
    tokenizer: Option<Tokenizer>,
}

impl std::fmt::Debug for Reranker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reranker")
            .field("device", &format!("{:?}", self.device))
            .field("config", &self.config)
            .field("model_loaded", &self.is_model_loaded())
            .finish()
    }
}

impl Reranker {
    pub fn load(config: RerankerConfig) -> Result<Self, RerankerError> {
        if let Err(msg) = config.validate() {
            return Err(RerankerError::InvalidConfig { reason: msg });
        }

        let device = select_device();
        debug!(?device, "Selected compute device for reranker");

        let Some(model_path) = config.model_path.clone() else {
            warn!("No reranker model configured, operating in stub mode");
            return Ok(Self {
                device,
                config,
                model: None,
                tokenizer: None,
            });
        };

        check_model_dir(&model_path)?;

        info!(model_path = %model_path.display(), "Loading reranker model");

        let bert_config = load_bert_config(&model_path)?;
        let model = CrossEncoderModel::load(&weights_path(&model_path), &bert_config, &device)
            .map_err(|e| RerankerError::ModelLoadFailed {
                reason: format!("Failed to load cross-encoder: {}", e),
            })?;
        let tokenizer = load_tokenizer_with_truncation(&model_path, config.max_seq_len)?;

        info!("Reranker model loaded successfully");

        Ok(Self {
            device,
            config,
            model: Some(model),
            tokenizer: Some(tokenizer),
        })
    }

    pub fn stub() -> Result<Self, RerankerError> {
        Self::load(RerankerConfig::stub())
    }

    pub fn is_model_loaded(&self) -> bool {
        self.model.is_some()
    }

    pub fn config(&self) -> &RerankerConfig {
        &self.config
    }

    pub fn device(&self) -> &candle_core::Device {
        &self.device
    }

    fn score_with_model(
        &self,
        model: &CrossEncoderModel,
        tokenizer: &Tokenizer,
        query: &str,
        candidate: &str,
    ) -> Result<f32, RerankerError> {
        let tokens = tokenizer.encode((query, candidate), true).map_err(|e| {
            RerankerError::TokenizationFailed {
                reason: e.to_string(),
            }
        })?;

        let token_ids = Tensor::new(tokens.get_ids(), &self.device)?.unsqueeze(0)?;
        let type_ids = Tensor::new(tokens.get_type_ids(), &self.device)?.unsqueeze(0)?;
        let attention_mask = Tensor::new(tokens.get_attention_mask(), &self.device)?.unsqueeze(0)?;

        let logits = model
            .forward(&token_ids, &type_ids, Some(&attention_mask))
            .map_err(|e| RerankerError::InferenceFailed {
                reason: e.to_string(),
            })?;

        logits
            .flatten_all()?
            .to_vec1::<f32>()?
            .first()
            .copied()
            .ok_or_else(|| RerankerError::InferenceFailed {
                reason: "cross-encoder returned no logits".to_string(),
            })
    }

    /// Content-term recall and Jaccard overlap, squashed into `(0, 1)`.
    fn placeholder_score(query: &str, candidate: &str) -> f32 {
        let query_terms: HashSet<String> = content_terms(query).collect();
        let candidate_terms: HashSet<String> = content_terms(candidate).collect();

        if query_terms.is_empty() {
            return 0.0;
        }

        let matches = query_terms.intersection(&candidate_terms).count();
        let recall = matches as f32 / query_terms.len() as f32;
        let union = query_terms.union(&candidate_terms).count();
        let jaccard = matches as f32 / union as f32;

        let base = 0.6 * recall + 0.4 * jaccard;
        1.0 / (1.0 + (-8.0 * (base - 0.5)).exp())
    }
}

impl RelevanceScorer for Reranker {
    fn score(&self, query: &str, candidate: &str) -> Result<f32, RerankerError> {
        let score = match (&self.model, &self.tokenizer) {
            (Some(model), Some(tokenizer)) => {
                self.score_with_model(model, tokenizer, query, candidate)?
            }
            _ => Self::placeholder_score(query, candidate),
        };

        debug!(
            query_len = query.len(),
            candidate_len = candidate.len(),
            score,
            "Scored query-candidate pair"
        );

        Ok(score)
    }

    fn is_stub(&self) -> bool {
        !self.is_model_loaded()
    }
}
