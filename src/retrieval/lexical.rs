use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use super::{RetrievalError, RetrievedChunk, Retriever, top_k_by_score};
use crate::chunking::Chunk;
use crate::text::terms;

/// BM25 Okapi parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bm25Params {
    /// Term-frequency saturation.
    pub k1: f32,
    /// Length normalization.
    pub b: f32,
    /// Floor for non-positive IDF values, as a fraction of the mean IDF.
    pub epsilon: f32,
}

impl Default for Bm25Params {
    fn default() -> Self {
        Self {
            k1: 1.5,
            b: 0.75,
            epsilon: 0.25,
        }
    }
}

/// Term-overlap retriever scored with BM25.
#[derive(Debug)]
pub struct LexicalRetriever {
    texts: Vec<Arc<str>>,
    term_freqs: Vec<HashMap<String, u32>>,
    doc_lens: Vec<f32>,
    avg_doc_len: f32,
    idf: HashMap<String, f32>,
    params: Bm25Params,
}

impl LexicalRetriever {
    pub fn new(chunks: &[Chunk]) -> Self {
        Self::with_params(chunks, Bm25Params::default())
    }

    pub fn with_params(chunks: &[Chunk], params: Bm25Params) -> Self {
        let texts: Vec<Arc<str>> = chunks.iter().map(|c| Arc::from(c.text.as_str())).collect();

        let mut term_freqs = Vec::with_capacity(chunks.len());
        let mut doc_lens = Vec::with_capacity(chunks.len());
        let mut doc_freqs: HashMap<String, u32> = HashMap::new();

        for chunk in chunks {
            let mut freqs: HashMap<String, u32> = HashMap::new();
            let mut len = 0usize;
            for term in terms(&chunk.text) {
                *freqs.entry(term).or_default() += 1;
                len += 1;
            }
            for term in freqs.keys() {
                *doc_freqs.entry(term.clone()).or_default() += 1;
            }
            doc_lens.push(len as f32);
            term_freqs.push(freqs);
        }

        let total_len: f32 = doc_lens.iter().sum();
        let avg_doc_len = if doc_lens.is_empty() || total_len == 0.0 {
            1.0
        } else {
            total_len / doc_lens.len() as f32
        };

        let idf = Self::compute_idf(&doc_freqs, chunks.len(), params.epsilon);

        debug!(
            chunks = chunks.len(),
            vocabulary = idf.len(),
            avg_doc_len,
            "Built lexical index"
        );

        Self {
            texts,
            term_freqs,
            doc_lens,
            avg_doc_len,
            idf,
            params,
        }
    }

    /// Okapi IDF; terms present in most chunks would go negative and get `epsilon * mean_idf`.
    fn compute_idf(
        doc_freqs: &HashMap<String, u32>,
        num_docs: usize,
        epsilon: f32,
    ) -> HashMap<String, f32> {
        let n = num_docs as f32;
        let mut idf: HashMap<String, f32> = doc_freqs
            .iter()
            .map(|(term, &df)| {
                let df = df as f32;
                (term.clone(), ((n - df + 0.5) / (df + 0.5)).ln())
            })
            .collect();

        if idf.is_empty() {
            return idf;
        }

        let mean = idf.values().sum::<f32>() / idf.len() as f32;
        let floor = epsilon * mean;
        for value in idf.values_mut() {
            if *value < 0.0 {
                *value = floor;
            }
        }

        idf
    }

    pub fn params(&self) -> &Bm25Params {
        &self.params
    }

    pub fn len(&self) -> usize {
        self.texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }

    /// BM25 score of every chunk against `query`, in document order.
    pub fn scores(&self, query: &str) -> Vec<f32> {
        let query_terms: Vec<String> = terms(query).collect();
        let Bm25Params { k1, b, .. } = self.params;

        self.term_freqs
            .iter()
            .zip(&self.doc_lens)
            .map(|(freqs, &doc_len)| {
                let norm = k1 * (1.0 - b + b * doc_len / self.avg_doc_len);
                query_terms
                    .iter()
                    .filter_map(|term| {
                        let tf = *freqs.get(term)? as f32;
                        let idf = self.idf.get(term).copied().unwrap_or(0.0);
                        Some(idf * tf * (k1 + 1.0) / (tf + norm))
                    })
                    .sum()
            })
            .collect()
    }
}

impl Retriever for LexicalRetriever {
    fn name(&self) -> &'static str {
        "lexical"
    }

    fn query(&self, query: &str, k: usize) -> Result<Vec<RetrievedChunk>, RetrievalError> {
        Ok(top_k_by_score(&self.texts, self.scores(query), k))
    }
}
