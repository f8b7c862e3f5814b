// ============================================================
// Layer 4 — Translation Sample Source
// ============================================================
// Implements Burn's Dataset trait over one persisted split.
//
// The split file is read once into memory as `{x, y}` records.
// Token ids are NOT cached: every `get(i)` runs the tokenizer
// on pair i again, so the tokenizer's normalization pipeline
// (NFD, lower-case, accent stripping) applies at access time.
//
//   data/valid.json ──load──▶ Vec<SentencePair>
//                                  │  get(i)
//                                  ▼
//                       tokenizer.encode(x_i), encode(y_i)
//                                  │
//                                  ▼
//                      EncodedSample { src_ids, trg_ids }

use anyhow::{Context, Result};
use burn::data::dataset::Dataset;
use std::{fs, path::Path};

use crate::domain::sentence_pair::SentencePair;
use crate::infra::tokenizer_store::TrainedTokenizer;

/// Token ids of one pair, variable length on both sides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedSample {
    pub src_ids: Vec<u32>,
    pub trg_ids: Vec<u32>,
}

pub struct TranslationDataset {
    pairs:     Vec<SentencePair>,
    tokenizer: TrainedTokenizer,
    /// Where the pairs came from, for error messages
    origin:    String,
}

impl TranslationDataset {
    pub fn new(pairs: Vec<SentencePair>, tokenizer: TrainedTokenizer) -> Self {
        Self {
            pairs,
            tokenizer,
            origin: "in-memory pairs".to_string(),
        }
    }

    /// Read a split file written by the splitter.
    pub fn load(path: &Path, tokenizer: TrainedTokenizer) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("Cannot read split '{}'", path.display()))?;
        let pairs: Vec<SentencePair> = serde_json::from_str(&json)
            .with_context(|| format!("Malformed split records in '{}'", path.display()))?;

        tracing::info!("Loaded {} pairs from '{}'", pairs.len(), path.display());
        Ok(Self {
            pairs,
            tokenizer,
            origin: path.display().to_string(),
        })
    }

    /// Encode pair `index`; `None` when out of range.
    pub fn encode(&self, index: usize) -> Option<Result<EncodedSample>> {
        let pair = self.pairs.get(index)?;
        Some(self.encode_pair(pair))
    }

    fn encode_pair(&self, pair: &SentencePair) -> Result<EncodedSample> {
        Ok(EncodedSample {
            src_ids: self.tokenizer.encode(&pair.x)?,
            trg_ids: self.tokenizer.encode(&pair.y)?,
        })
    }
}

impl Dataset<EncodedSample> for TranslationDataset {
    // None means "past the end" to the loader, so an encoding
    // failure cannot be reported through it and ends the process.
    fn get(&self, index: usize) -> Option<EncodedSample> {
        match self.encode(index)? {
            Ok(sample) => Some(sample),
            Err(e) => {
                tracing::error!("Cannot encode pair {} of '{}': {:#}", index, self.origin, e);
                panic!("Cannot encode pair {index} of '{}': {e:#}", self.origin);
            }
        }
    }

    fn len(&self) -> usize {
        self.pairs.len()
    }
}
