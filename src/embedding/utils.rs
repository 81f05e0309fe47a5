use std::path::{Path, PathBuf};

use candle_transformers::models::bert::Config as BertConfig;
use tokenizers::{Tokenizer, TruncationParams};

use super::error::EmbeddingError;

pub const CONFIG_FILE: &str = "config.json";
pub const WEIGHTS_FILE: &str = "model.safetensors";
pub const TOKENIZER_FILE: &str = "tokenizer.json";

/// Checks that `model_dir` holds the three files a BERT-family model needs.
pub fn check_model_dir(model_dir: &Path) -> Result<(), EmbeddingError> {
    if !model_dir.is_dir() {
        return Err(EmbeddingError::ModelNotFound {
            path: model_dir.to_path_buf(),
        });
    }

    for file in [CONFIG_FILE, WEIGHTS_FILE, TOKENIZER_FILE] {
        if !model_dir.join(file).exists() {
            return Err(EmbeddingError::ModelLoadFailed {
                reason: format!("Missing {} in {}", file, model_dir.display()),
            });
        }
    }

    Ok(())
}

pub fn load_bert_config(model_dir: &Path) -> Result<BertConfig, EmbeddingError> {
    let raw = std::fs::read_to_string(model_dir.join(CONFIG_FILE))?;
    serde_json::from_str(&raw).map_err(|e| EmbeddingError::ModelLoadFailed {
        reason: format!("Failed to parse {}: {}", CONFIG_FILE, e),
    })
}

pub fn weights_path(model_dir: &Path) -> PathBuf {
    model_dir.join(WEIGHTS_FILE)
}

/// Loads `tokenizer.json` from `model_dir`, truncating inputs to `max_len` tokens.
pub fn load_tokenizer_with_truncation(
    model_dir: &Path,
    max_len: usize,
) -> Result<Tokenizer, EmbeddingError> {
    let path = model_dir.join(TOKENIZER_FILE);
    let mut tokenizer =
        Tokenizer::from_file(&path).map_err(|e| EmbeddingError::TokenizationFailed {
            reason: format!("Failed to load {}: {}", path.display(), e),
        })?;

    tokenizer
        .with_truncation(Some(TruncationParams {
            max_length: max_len,
            ..Default::default()
        }))
        .map_err(|e| EmbeddingError::TokenizationFailed {
            reason: format!("Failed to configure truncation: {}", e),
        })?;

    Ok(tokenizer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_check_model_dir_missing_dir() {
        let err = check_model_dir(Path::new("/nonexistent/model")).unwrap_err();
        assert!(matches!(err, EmbeddingError::ModelNotFound { .. }));
    }

    #[test]
    fn test_check_model_dir_missing_files() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "{}").unwrap();

        let err = check_model_dir(dir.path()).unwrap_err();
        assert!(err.to_string().contains(WEIGHTS_FILE));
    }

    #[test]
    fn test_load_bert_config_rejects_garbage() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "not json").unwrap();

        let err = load_bert_config(dir.path()).unwrap_err();
        assert!(matches!(err, EmbeddingError::ModelLoadFailed { .. }));
    }
}
