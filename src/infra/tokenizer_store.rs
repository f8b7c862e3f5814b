// ============================================================
// Layer 6 — Tokenizer Store
// ============================================================
// Trains, saves and loads the tokenizers built on top of the
// `tokenizers` crate.
//
// Every family shares the same front half of the pipeline:
//
//   normalizer:    NFD → Lowercase → StripAccents
//   pre-tokenizer: Whitespace
//
// and differs only in the model/trainer pair:
//
//   WL  → WordLevel  + WordLevelTrainer  (min_frequency 2)
//   BPE → BPE        + BpeTrainer        (min_frequency 2)
//   WP  → WordPiece  + WordPieceTrainer
//   UNI → Unigram    + UnigramTrainer    (knows the unk token)
//
// Each trainer gets the special tokens as [pad, unk, bos, eos].
// Trainers insert special tokens before learned entries, so
// they take ids 0..=3 in that order.
//
// The concrete model type must match the trainer's associated
// Model, so each family builds its own TokenizerImpl<M, ...>
// through the generic `train_with`.
// The saved JSON loads back as a plain `tokenizers::Tokenizer`.

use anyhow::{anyhow, Context, Result};
use serde::Serialize;
use std::{fs, path::Path, path::PathBuf};
use tokenizers::{
    models::{
        bpe::{BpeTrainer, BPE},
        unigram::{Unigram, UnigramTrainer},
        wordlevel::{WordLevel, WordLevelTrainer},
        wordpiece::{WordPiece, WordPieceTrainer},
    },
    normalizers::{Lowercase, Sequence, StripAccents, NFD},
    pre_tokenizers::whitespace::Whitespace,
    AddedToken, DecoderWrapper, Model, NormalizerWrapper, PostProcessorWrapper,
    PreTokenizerWrapper, Tokenizer, TokenizerBuilder, TokenizerImpl, Trainer,
};

use crate::domain::error::PrepError;
use crate::domain::family::{Family, VocabSize};
use crate::infra::config::VocabConfig;
use crate::infra::layout::Layout;

type FamilyTokenizer<M> =
    TokenizerImpl<M, NormalizerWrapper, PreTokenizerWrapper, PostProcessorWrapper, DecoderWrapper>;

pub struct TokenizerStore {
    layout: Layout,
}

impl TokenizerStore {
    pub fn new(layout: Layout) -> Self {
        Self { layout }
    }

    /// Train one `(family, size)` tokenizer over the corpus and save it.
    /// Returns the artifact path.
    pub fn train(&self, family: Family, size: VocabSize, vocab: &VocabConfig) -> Result<PathBuf> {
        let out = self.layout.tokenizer(family, size);
        self.train_to(family, size.tokens(), vocab, &out)?;
        Ok(out)
    }

    /// Load a previously trained artifact.
    pub fn load(&self, family: Family, size: VocabSize) -> Result<TrainedTokenizer> {
        TrainedTokenizer::from_file(&self.layout.tokenizer(family, size))
    }

    fn train_to(
        &self,
        family:     Family,
        vocab_size: usize,
        vocab:      &VocabConfig,
        out:        &Path,
    ) -> Result<()> {
        let corpus = self.layout.corpus();
        if !corpus.exists() {
            return Err(PrepError::MissingCorpus(corpus).into());
        }
        if let Some(dir) = out.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Cannot create tokenizer directory '{}'", dir.display()))?;
        }

        tracing::info!(
            "Training {} tokenizer (vocab_size={}) on '{}'",
            family,
            vocab_size,
            corpus.display()
        );

        let unk      = vocab.unk_token.clone();
        let specials = special_tokens(vocab);

        match family {
            Family::WordLevel => {
                let model = WordLevel::builder()
                    .unk_token(unk)
                    .build()
                    .map_err(|e| anyhow!("Cannot build WordLevel model: {e}"))?;
                let mut trainer = WordLevelTrainer::builder()
                    .vocab_size(vocab_size)
                    .min_frequency(2)
                    .special_tokens(specials)
                    .build()?;
                train_with(model, &mut trainer, &corpus, out)
            }
            Family::Bpe => {
                let model = BPE::builder()
                    .unk_token(unk)
                    .build()
                    .map_err(|e| anyhow!("Cannot build BPE model: {e}"))?;
                let mut trainer = BpeTrainer::builder()
                    .vocab_size(vocab_size)
                    .min_frequency(2)
                    .special_tokens(specials)
                    .build();
                train_with(model, &mut trainer, &corpus, out)
            }
            Family::WordPiece => {
                let model = WordPiece::builder()
                    .unk_token(unk)
                    .build()
                    .map_err(|e| anyhow!("Cannot build WordPiece model: {e}"))?;
                let mut trainer = WordPieceTrainer::builder()
                    .vocab_size(vocab_size)
                    .special_tokens(specials)
                    .build();
                train_with(model, &mut trainer, &corpus, out)
            }
            Family::Unigram => {
                let mut trainer = UnigramTrainer::builder()
                    .vocab_size(u32::try_from(vocab_size)?)
                    .unk_token(Some(unk))
                    .special_tokens(specials)
                    .build()?;
                train_with(Unigram::default(), &mut trainer, &corpus, out)
            }
        }
    }
}

fn special_tokens(vocab: &VocabConfig) -> Vec<AddedToken> {
    vocab
        .special_tokens()
        .iter()
        .map(|t| AddedToken::from(t.to_string(), true))
        .collect()
}

fn normalizer() -> NormalizerWrapper {
    Sequence::new(vec![NFD.into(), Lowercase.into(), StripAccents.into()]).into()
}

fn train_with<M, T>(model: M, trainer: &mut T, corpus: &Path, out: &Path) -> Result<()>
where
    M: Model + Serialize + Send + Sync,
    T: Trainer<Model = M> + Sync,
{
    let mut tokenizer: FamilyTokenizer<M> = TokenizerBuilder::new()
        .with_model(model)
        .with_normalizer(Some(normalizer()))
        .with_pre_tokenizer(Some(Whitespace::default().into()))
        .build()
        .map_err(|e| anyhow!("Cannot assemble tokenizer: {e}"))?;

    tokenizer
        .train_from_files(trainer, vec![corpus.to_string_lossy().into_owned()])
        .map_err(|e| anyhow!("Tokenizer training failed: {e}"))?;

    tokenizer
        .save(out, false)
        .map_err(|e| anyhow!("Cannot save tokenizer to '{}': {e}", out.display()))?;

    tracing::info!(
        "Saved tokenizer with {} entries to '{}'",
        tokenizer.get_vocab_size(true),
        out.display()
    );
    Ok(())
}

// ─── TrainedTokenizer ─────────────────────────────────────────────────────────
/// A loaded artifact, ready to encode sample text.
#[derive(Clone)]
pub struct TrainedTokenizer {
    inner: Tokenizer,
}

impl TrainedTokenizer {
    pub fn from_file(path: &Path) -> Result<Self> {
        let inner = Tokenizer::from_file(path)
            .map_err(|e| anyhow!("Cannot load tokenizer from '{}': {e}", path.display()))?;
        tracing::debug!("Loaded tokenizer from '{}'", path.display());
        Ok(Self { inner })
    }

    /// Text → token ids, normalization included.
    pub fn encode(&self, text: &str) -> Result<Vec<u32>> {
        let encoding = self
            .inner
            .encode(text, false)
            .map_err(|e| anyhow!("Tokenisation error: {e}"))?;
        Ok(encoding.get_ids().to_vec())
    }

    /// Token ids → text, dropping special tokens.
    pub fn decode(&self, ids: &[u32]) -> Result<String> {
        self.inner
            .decode(ids, true)
            .map_err(|e| anyhow!("Decoding error: {e}"))
    }

    /// Id of a token that must exist, e.g. the pad token.
    pub fn token_id(&self, token: &str) -> Result<u32, PrepError> {
        self.inner
            .token_to_id(token)
            .ok_or_else(|| PrepError::MissingSpecialToken(token.to_string()))
    }

    pub fn vocab_size(&self) -> usize {
        self.inner.get_vocab_size(true)
    }
}
