use candle::{DType, Device, Result, Tensor};
use candle_core as candle;
use candle_core::IndexOp;
use candle_nn::{Linear, Module, VarBuilder};
use candle_transformers::models::bert::{BertModel, Config};
use std::path::Path;
use std::sync::Arc;

/// Sentence-transformers checkpoints ship with or without a `bert.`/`roberta.` prefix.
fn model_root<'a>(vb: VarBuilder<'a>) -> VarBuilder<'a> {
    if vb.contains_tensor("bert.embeddings.word_embeddings.weight") {
        vb.pp("bert")
    } else if vb.contains_tensor("roberta.embeddings.word_embeddings.weight") {
        vb.pp("roberta")
    } else {
        vb
    }
}

pub(crate) fn load_encoder(vb: VarBuilder, config: &Config) -> Result<BertModel> {
    BertModel::load(model_root(vb), config)
}

pub(crate) fn mmap_weights(weights: &Path, device: &Device) -> Result<VarBuilder<'static>> {
    // SAFETY: the weights file is opened read-only and not modified while mapped.
    unsafe { VarBuilder::from_mmaped_safetensors(&[weights], DType::F32, device) }
}

struct CrossEncoderInner {
    encoder: BertModel,
    pooler: Linear,
    classifier: Linear,
}

/// BERT encoder with a tanh pooler over `[CLS]` and a single-logit classification head
/// (`BertForSequenceClassification`, as in the ms-marco cross-encoders).
#[derive(Clone)]
pub struct CrossEncoderModel(Arc<CrossEncoderInner>);

impl CrossEncoderModel {
    pub fn load(weights: &Path, config: &Config, device: &Device) -> Result<Self> {
        Self::from_var_builder(mmap_weights(weights, device)?, config)
    }

    pub(crate) fn from_var_builder(vb: VarBuilder, config: &Config) -> Result<Self> {
        let root = model_root(vb.clone());
        let encoder = BertModel::load(root.clone(), config)?;
        let pooler = candle_nn::linear(
            config.hidden_size,
            config.hidden_size,
            root.pp("pooler").pp("dense"),
        )?;
        let classifier = candle_nn::linear(config.hidden_size, 1, vb.pp("classifier"))?;

        Ok(Self(Arc::new(CrossEncoderInner {
            encoder,
            pooler,
            classifier,
        })))
    }

    /// Returns logits shaped `[batch, 1]`.
    pub fn forward(
        &self,
        input_ids: &Tensor,
        token_type_ids: &Tensor,
        attention_mask: Option<&Tensor>,
    ) -> Result<Tensor> {
        let hidden = self
            .0
            .encoder
            .forward(input_ids, token_type_ids, attention_mask)?;
        let cls = hidden.i((.., 0, ..))?;
        let pooled = self.0.pooler.forward(&cls)?.tanh()?;
        self.0.classifier.forward(&pooled)
    }
}
