// ============================================================
// Layer 2 — PreviewUseCase
// ============================================================
// Builds the same data loader a training loop would use and
// walks it for one epoch on the CPU backend, so the output of
// `setup` can be checked without a model:
//
//   Step 1: Load config.yaml          (special tokens)
//   Step 2: Load the tokenizer        (Layer 6 - infra)
//   Step 3: Load the split, decode    (Layer 4 - data)
//           its first pair as a check
//   Step 4: Build the loader          (Layer 4 - data)
//   Step 5: Iterate, record shapes

use anyhow::Result;
use std::path::PathBuf;

use crate::data::{
    batcher::{build_loader, LoaderConfig, Mode},
    dataset::TranslationDataset,
};
use crate::domain::family::{Family, Split, VocabSize};
use crate::infra::{config::PrepConfig, layout::Layout, tokenizer_store::TokenizerStore};

type PreviewBackend = burn::backend::NdArray;

#[derive(Debug, Clone)]
pub struct PreviewConfig {
    pub root:       PathBuf,
    pub split:      Split,
    pub family:     Family,
    pub size:       VocabSize,
    pub batch_size: usize,
    pub mode:       Mode,
    /// Overrides the id looked up from the configured pad token
    pub pad_id:     Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreviewReport {
    pub batches:     usize,
    pub samples:     usize,
    pub max_src_len: usize,
    pub max_trg_len: usize,
}

pub struct PreviewUseCase {
    config: PreviewConfig,
}

impl PreviewUseCase {
    pub fn new(config: PreviewConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self) -> Result<PreviewReport> {
        let cfg    = &self.config;
        let layout = Layout::new(&cfg.root);
        let prep   = PrepConfig::load(&layout.config())?;

        let tokenizer = TokenizerStore::new(layout.clone()).load(cfg.family, cfg.size)?;
        let pad_id = match cfg.pad_id {
            Some(id) => id,
            None => tokenizer.token_id(&prep.vocab.pad_token)?,
        };
        tracing::info!(
            "Previewing '{}' with {}_{} (vocab {}, pad_id {})",
            cfg.split,
            cfg.family,
            cfg.size,
            tokenizer.vocab_size(),
            pad_id
        );

        let dataset = TranslationDataset::load(&layout.split(cfg.split), tokenizer.clone())?;
        if let Some(first) = dataset.encode(0) {
            let first = first?;
            tracing::info!(
                "First pair decodes to: {:?} → {:?}",
                tokenizer.decode(&first.src_ids)?,
                tokenizer.decode(&first.trg_ids)?
            );
        }

        let loader  = build_loader::<PreviewBackend, _>(
            dataset,
            &LoaderConfig::new(cfg.batch_size, cfg.mode, pad_id),
            Default::default(),
        );

        let mut report = PreviewReport::default();
        for batch in loader.iter() {
            let [rows, src_len] = batch.src.dims();
            let [_, trg_len]    = batch.trg.dims();
            tracing::debug!(
                "batch {}: src [{}, {}], trg [{}, {}]",
                report.batches,
                rows,
                src_len,
                rows,
                trg_len
            );

            report.batches     += 1;
            report.samples     += rows;
            report.max_src_len  = report.max_src_len.max(src_len);
            report.max_trg_len  = report.max_trg_len.max(trg_len);
        }

        tracing::info!(
            "{} batches, {} samples, longest src {}, longest trg {}",
            report.batches,
            report.samples,
            report.max_src_len,
            report.max_trg_len
        );
        Ok(report)
    }
}
